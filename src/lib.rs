//! Client for the Cloudflare v4 API: zones, zone settings and DNS records.
//!
//! ```no_run
//! use cfclient::{ClientConfig, Cloudflare, QueryParams};
//! use reqwest::header::HeaderMap;
//!
//! # async fn run() -> cfclient::Result<()> {
//! let api = Cloudflare::new(ClientConfig::new("your@email.com", "YourApiKeyHere"))?;
//! let zones = api
//!     .get_zones(QueryParams::new().with("name", "midomain.com"), HeaderMap::new())
//!     .await?;
//! println!("{zones}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;

pub use api::models::{
    CacheLevel, DnsRecord, DnsRecordType, DnsRecordUpdate, MinifyValue, QueryParams, Toggle,
    ZoneSetting,
};
pub use api::{Cloudflare, HttpClient, Transport};
pub use config::ClientConfig;
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
