use super::{client::Transport, models::QueryParams};
use crate::{
    config::ClientConfig,
    error::{Error, Result},
};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT},
    Method, StatusCode,
};
use serde::Deserialize;

const X_AUTH_KEY: &str = "x-auth-key";
const X_AUTH_EMAIL: &str = "x-auth-email";

/// `reqwest`-backed [`Transport`] bound to one base URL and credential set.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    code: Option<i64>,
    message: Option<String>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(Self::build_headers(config)?)
            .timeout(config.timeout_duration())
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_headers(config: &ClientConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("user_agent", &config.user_agent)?);

        let mut api_key = header_value("api_key", &config.api_key)?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static(X_AUTH_KEY), api_key);

        headers.insert(
            HeaderName::from_static(X_AUTH_EMAIL),
            header_value("email", &config.email)?,
        );
        headers.insert(CONTENT_TYPE, header_value("content_type", &config.content_type)?);
        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<String>,
        parameters: Option<QueryParams>,
        headers: HeaderMap,
    ) -> Result<String> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url).headers(headers);
        if let Some(parameters) = parameters.filter(|p| !p.is_empty()) {
            request = request.query(&parameters.to_pairs());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| Error::RemoteApi {
            status: e.status().map(|s| s.as_u16()),
            message: format!("{method} {url} failed: {e}"),
            remote_message: None,
            remote_code: None,
        })?;

        let status = response.status();
        debug!("{} {} -> {}", method, url, status);

        let text = response.text().await.map_err(|e| Error::RemoteApi {
            status: Some(status.as_u16()),
            message: format!("failed to read response of {method} {url}: {e}"),
            remote_message: None,
            remote_code: None,
        })?;

        if status.is_success() {
            return Ok(text);
        }

        let error = rejection(&method, &url, status, &text);
        warn!("{}", error);
        Err(error)
    }
}

/// Builds the error for a non-2xx reply from the first entry of its `errors` array.
fn rejection(method: &Method, url: &str, status: StatusCode, text: &str) -> Error {
    let first = serde_json::from_str::<ErrorBody>(text)
        .unwrap_or_default()
        .errors
        .into_iter()
        .next();
    let (remote_code, remote_message) = match first {
        Some(entry) => (entry.code, entry.message),
        None => (None, None),
    };

    Error::RemoteApi {
        status: Some(status.as_u16()),
        message: format!("{method} {url} returned {status}"),
        remote_message,
        remote_code,
    }
}

fn header_value(field: &'static str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::Configuration(format!("{field} cannot be sent as an HTTP header")))
}
