use super::{
    client::Transport,
    http::HttpClient,
    models::{require, CacheLevel, DnsRecord, DnsRecordUpdate, MinifyValue, QueryParams, ZoneSetting},
};
use crate::{
    config::ClientConfig,
    error::{Error, Result},
};
use reqwest::header::HeaderMap;
use serde::Serialize;

const CACHE_LEVEL: &str = "cache_level";
const MINIFY: &str = "minify";

/// Typed entry point to the Cloudflare v4 API.
///
/// Every method validates its arguments before touching the transport and
/// returns the raw JSON body of the response; decoding the `success`/`result`
/// envelope is left to the caller.
pub struct Cloudflare<T = HttpClient> {
    config: ClientConfig,
    transport: T,
}

impl Cloudflare<HttpClient> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.check()?;
        let transport = HttpClient::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Cloudflare<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.check()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get_zones(&self, parameters: QueryParams, headers: HeaderMap) -> Result<String> {
        self.transport.get("zones", parameters, headers).await
    }

    pub async fn get_cache_level(
        &self,
        zone_id: &str,
        parameters: QueryParams,
        headers: HeaderMap,
    ) -> Result<String> {
        self.get_setting(zone_id, CACHE_LEVEL, parameters, headers)
            .await
    }

    pub async fn get_minify(
        &self,
        zone_id: &str,
        parameters: QueryParams,
        headers: HeaderMap,
    ) -> Result<String> {
        self.get_setting(zone_id, MINIFY, parameters, headers).await
    }

    pub async fn set_cache_level(
        &self,
        zone_id: &str,
        level: CacheLevel,
        headers: HeaderMap,
    ) -> Result<String> {
        self.set_setting(zone_id, CACHE_LEVEL, &ZoneSetting { value: level }, headers)
            .await
    }

    pub async fn set_minify(
        &self,
        zone_id: &str,
        value: MinifyValue,
        headers: HeaderMap,
    ) -> Result<String> {
        self.set_setting(zone_id, MINIFY, &ZoneSetting { value }, headers)
            .await
    }

    pub async fn get_dns_records(
        &self,
        zone_id: &str,
        parameters: QueryParams,
        headers: HeaderMap,
    ) -> Result<String> {
        require_zone(zone_id)?;
        self.transport
            .get(&records_path(zone_id), parameters, headers)
            .await
    }

    pub async fn create_dns_record(
        &self,
        zone_id: &str,
        record: &DnsRecord,
        headers: HeaderMap,
    ) -> Result<String> {
        require_zone(zone_id)?;
        record.validate()?;
        let body = encode(record)?;
        self.transport
            .post(&records_path(zone_id), Some(body), headers)
            .await
    }

    pub async fn get_dns_record_details(
        &self,
        zone_id: &str,
        record_id: &str,
        headers: HeaderMap,
    ) -> Result<String> {
        let path = record_path(zone_id, record_id)?;
        self.transport.get(&path, QueryParams::new(), headers).await
    }

    pub async fn update_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DnsRecordUpdate,
        headers: HeaderMap,
    ) -> Result<String> {
        let path = record_path(zone_id, record_id)?;
        record.validate()?;
        let body = encode(record)?;
        self.transport.put(&path, body, headers).await
    }

    pub async fn delete_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        headers: HeaderMap,
    ) -> Result<String> {
        let path = record_path(zone_id, record_id)?;
        self.transport.delete(&path, None, headers).await
    }

    async fn get_setting(
        &self,
        zone_id: &str,
        setting: &str,
        parameters: QueryParams,
        headers: HeaderMap,
    ) -> Result<String> {
        require_zone(zone_id)?;
        self.transport
            .get(&setting_path(zone_id, setting), parameters, headers)
            .await
    }

    async fn set_setting<V: Serialize + Sync>(
        &self,
        zone_id: &str,
        setting: &str,
        body: &ZoneSetting<V>,
        headers: HeaderMap,
    ) -> Result<String> {
        require_zone(zone_id)?;
        let body = encode(body)?;
        self.transport
            .patch(&setting_path(zone_id, setting), body, headers)
            .await
    }
}

fn require_zone(zone_id: &str) -> Result<()> {
    require("zone_id", zone_id)
}

fn setting_path(zone_id: &str, setting: &str) -> String {
    format!("zones/{zone_id}/settings/{setting}")
}

fn records_path(zone_id: &str) -> String {
    format!("zones/{zone_id}/dns_records")
}

fn record_path(zone_id: &str, record_id: &str) -> Result<String> {
    require_zone(zone_id)?;
    require("record_id", record_id)?;
    Ok(format!("zones/{zone_id}/dns_records/{record_id}"))
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String> {
    serde_json::to_string(body).map_err(|e| Error::invalid("body", e.to_string()))
}
