use super::models::QueryParams;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::{header::HeaderMap, Method};

/// One HTTP round trip against the API, returning the raw response body.
///
/// Implementors only provide [`Transport::request`]; the verb helpers shape
/// their arguments the way the API expects and funnel into it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `method` to `path` (relative to the base URL). Any failure,
    /// including a non-2xx status, is reported as [`crate::Error::RemoteApi`].
    async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<String>,
        parameters: Option<QueryParams>,
        headers: HeaderMap,
    ) -> Result<String>;

    /// The API wants booleans as `"true"`/`"false"` in query strings.
    async fn get(&self, path: &str, mut parameters: QueryParams, headers: HeaderMap) -> Result<String> {
        parameters.normalize_booleans();
        self.request(path, Method::GET, None, Some(parameters), headers)
            .await
    }

    async fn post(&self, path: &str, body: Option<String>, headers: HeaderMap) -> Result<String> {
        self.request(path, Method::POST, body, None, headers).await
    }

    async fn put(&self, path: &str, body: String, headers: HeaderMap) -> Result<String> {
        self.request(path, Method::PUT, Some(body), None, headers)
            .await
    }

    async fn patch(&self, path: &str, body: String, headers: HeaderMap) -> Result<String> {
        self.request(path, Method::PATCH, Some(body), None, headers)
            .await
    }

    async fn delete(&self, path: &str, body: Option<String>, headers: HeaderMap) -> Result<String> {
        self.request(path, Method::DELETE, body, None, headers)
            .await
    }
}
