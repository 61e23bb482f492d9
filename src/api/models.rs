use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

pub const MIN_TTL: i64 = 120;
pub const MAX_TTL: i64 = 2_147_483_647;
/// Cloudflare reads a TTL of 1 as "automatic".
pub const AUTOMATIC_TTL: i64 = 1;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DnsRecordType {
    A,
    AAAA,
    CNAME,
    TXT,
    SRV,
    LOC,
    MX,
    NS,
    SPF,
}

impl DnsRecordType {
    pub const ALL: [Self; 9] = [
        Self::A,
        Self::AAAA,
        Self::CNAME,
        Self::TXT,
        Self::SRV,
        Self::LOC,
        Self::MX,
        Self::NS,
        Self::SPF,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
            Self::CNAME => "CNAME",
            Self::TXT => "TXT",
            Self::SRV => "SRV",
            Self::LOC => "LOC",
            Self::MX => "MX",
            Self::NS => "NS",
            Self::SPF => "SPF",
        }
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DnsRecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::invalid("type", format!("`{s}` is not a valid DNS record type")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheLevel {
    Aggressive,
    Basic,
    Simplified,
}

impl CacheLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Basic => "basic",
            Self::Simplified => "simplified",
        }
    }
}

impl fmt::Display for CacheLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aggressive" => Ok(Self::Aggressive),
            "basic" => Ok(Self::Basic),
            "simplified" => Ok(Self::Simplified),
            other => Err(Error::invalid(
                "value",
                format!("`{other}` is not one of: aggressive, basic or simplified"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    On,
    Off,
}

impl From<bool> for Toggle {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::On
        } else {
            Self::Off
        }
    }
}

/// Per-asset switches of the `minify` zone setting. Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifyValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js: Option<Toggle>,
}

/// Body of a zone setting update: `{"value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSetting<T> {
    pub value: T,
}

/// Body for creating a DNS record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl DnsRecord {
    pub fn new(
        record_type: DnsRecordType,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            record_type,
            name: name.into(),
            content: content.into(),
            ttl: None,
            locked: None,
            proxied: None,
            priority: None,
        }
    }

    pub fn ttl(mut self, ttl: i64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn proxied(mut self, proxied: bool) -> Self {
        self.proxied = Some(proxied);
        self
    }

    pub fn priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("content", &self.content)
    }
}

impl TryFrom<Value> for DnsRecord {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let body = as_object(&value)?;
        let missing = ["type", "name", "content"]
            .into_iter()
            .find(|key| body.get(*key).map_or(true, Value::is_null));
        if let Some(key) = missing {
            return Err(Error::MissingArgument(key));
        }

        Ok(Self {
            record_type: string_field(body, "type")?
                .unwrap_or_default()
                .parse()?,
            name: string_field(body, "name")?.unwrap_or_default(),
            content: string_field(body, "content")?.unwrap_or_default(),
            ttl: int_field(body, "ttl")?,
            locked: bool_field(body, "locked")?,
            proxied: bool_field(body, "proxied")?,
            priority: priority_field(body)?,
        })
    }
}

/// Body for overwriting a DNS record. Only `content` is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<DnsRecordType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl DnsRecordUpdate {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            record_type: None,
            name: None,
            content: content.into(),
            ttl: None,
            locked: None,
            proxied: None,
            priority: None,
        }
    }

    pub fn record_type(mut self, record_type: DnsRecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn ttl(mut self, ttl: i64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn proxied(mut self, proxied: bool) -> Self {
        self.proxied = Some(proxied);
        self
    }

    pub fn priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("content", &self.content)?;
        match self.ttl {
            Some(ttl) => validate_ttl(ttl),
            None => Ok(()),
        }
    }
}

impl TryFrom<Value> for DnsRecordUpdate {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let body = as_object(&value)?;
        let content = string_field(body, "content")?.ok_or(Error::MissingArgument("content"))?;

        Ok(Self {
            record_type: string_field(body, "type")?
                .map(|t| t.parse())
                .transpose()?,
            name: string_field(body, "name")?,
            content,
            ttl: int_field(body, "ttl")?,
            locked: bool_field(body, "locked")?,
            proxied: bool_field(body, "proxied")?,
            priority: priority_field(body)?,
        })
    }
}

/// A TTL is either [`AUTOMATIC_TTL`] or within `MIN_TTL..=MAX_TTL` seconds.
pub fn validate_ttl(ttl: i64) -> Result<()> {
    if ttl == AUTOMATIC_TTL || (MIN_TTL..=MAX_TTL).contains(&ttl) {
        return Ok(());
    }
    Err(Error::invalid(
        "ttl",
        format!("{ttl} must be between 120 and 2,147,483,647 seconds, or 1 for automatic"),
    ))
}

/// Query string parameters for GET requests.
///
/// Values may nest; on the wire objects flatten to `key[sub]=value` and
/// arrays to `key[0]=value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Map<String, Value>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rewrites every boolean, at any depth, as the string `"true"` or `"false"`.
    pub fn normalize_booleans(&mut self) {
        self.0.values_mut().for_each(stringify_booleans);
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            flatten(key.clone(), value, &mut pairs);
        }
        pairs
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn stringify_booleans(value: &mut Value) {
    match value {
        Value::Bool(b) => *value = Value::String(b.to_string()),
        Value::Array(items) => items.iter_mut().for_each(stringify_booleans),
        Value::Object(map) => map.values_mut().for_each(stringify_booleans),
        _ => {}
    }
}

fn flatten(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(format!("{key}[{i}]"), item, pairs);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                flatten(format!("{key}[{sub}]"), item, pairs);
            }
        }
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingArgument(field));
    }
    Ok(())
}

fn as_object(value: &Value) -> Result<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::invalid("body", "expected a JSON object"))
}

fn string_field(body: &Map<String, Value>, key: &'static str) -> Result<Option<String>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::invalid(key, format!("expected a string, got {other}"))),
    }
}

fn int_field(body: &Map<String, Value>, key: &'static str) -> Result<Option<i64>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| Error::invalid(key, format!("expected an integer, got {value}"))),
    }
}

fn bool_field(body: &Map<String, Value>, key: &'static str) -> Result<Option<bool>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(Error::invalid(key, format!("expected a boolean, got {other}"))),
    }
}

fn priority_field(body: &Map<String, Value>) -> Result<Option<u16>> {
    int_field(body, "priority")?
        .map(|p| {
            u16::try_from(p).map_err(|_| Error::invalid("priority", format!("{p} is out of range")))
        })
        .transpose()
}
