use crate::{
    ClientConfig, Cloudflare, DnsRecord, DnsRecordType, DnsRecordUpdate, Error, MinifyValue,
    QueryParams, Toggle,
};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ZONE: &str = "023e105f4ecef8ad9ca31a8372d0c353";
const RECORD: &str = "372e67954025e0ba6aaa6d586b9e0b59";

// Helper function to create a client pointed at the mock server
fn client_for(server: &MockServer) -> Cloudflare {
    let config = ClientConfig::new("user@example.com", "test_key")
        .with_base_url(format!("{}/client/v4/", server.uri()));
    Cloudflare::new(config).unwrap()
}

#[tokio::test]
async fn get_zones_sends_auth_headers_and_returns_raw_body() {
    let server = MockServer::start().await;
    let raw = r#"{"success":true,"errors":[],"messages":[],"result":[{"id":"023e105f4ecef8ad9ca31a8372d0c353","name":"midomain.com"}]}"#;

    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .and(query_param("name", "midomain.com"))
        .and(header("X-Auth-Email", "user@example.com"))
        .and(header("X-Auth-Key", "test_key"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(raw))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let body = api
        .get_zones(QueryParams::new().with("name", "midomain.com"), HeaderMap::new())
        .await
        .unwrap();

    assert_eq!(body, raw);
}

#[tokio::test]
async fn boolean_query_parameters_are_sent_as_strings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/client/v4/zones/{ZONE}/dns_records")))
        .and(query_param("proxied", "true"))
        .and(query_param("per_page", "300"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let params = QueryParams::new().with("proxied", true).with("per_page", 300);
    api.get_dns_records(ZONE, params, HeaderMap::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("proxied=true"), "query was {query}");
}

#[tokio::test]
async fn extra_headers_are_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/client/v4/zones/{ZONE}/settings/minify")))
        .and(header("X-Request-Id", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("x-request-id", HeaderValue::from_static("abc123"));

    let api = client_for(&server);
    api.get_minify(ZONE, QueryParams::new(), headers)
        .await
        .unwrap();
}

#[tokio::test]
async fn set_cache_level_patches_setting() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("/client/v4/zones/{ZONE}/settings/cache_level")))
        .and(body_json(json!({ "value": "aggressive" })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let body = api
        .set_cache_level(ZONE, "aggressive".parse().unwrap(), HeaderMap::new())
        .await
        .unwrap();

    assert_eq!(body, r#"{"success":true}"#);
}

#[tokio::test]
async fn set_minify_patches_setting() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("/client/v4/zones/{ZONE}/settings/minify")))
        .and(body_json(json!({ "value": { "css": "on", "js": "off" } })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let value = MinifyValue {
        css: Some(Toggle::On),
        html: None,
        js: Some(Toggle::Off),
    };
    let api = client_for(&server);
    api.set_minify(ZONE, value, HeaderMap::new()).await.unwrap();
}

#[tokio::test]
async fn dns_record_lifecycle_uses_expected_verbs() {
    let server = MockServer::start().await;
    let records = format!("/client/v4/zones/{ZONE}/dns_records");
    let record = format!("{records}/{RECORD}");

    Mock::given(method("POST"))
        .and(path(records.as_str()))
        .and(body_json(json!({
            "type": "CNAME",
            "name": "cf-test",
            "content": "midomain.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("created"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(record.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("details"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(record.as_str()))
        .and(body_json(json!({
            "type": "TXT",
            "name": "cf-test-updated",
            "content": "midomain.com",
            "ttl": 220,
            "locked": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("updated"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(record.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);

    let create = DnsRecord::new(DnsRecordType::CNAME, "cf-test", "midomain.com");
    assert_eq!(
        api.create_dns_record(ZONE, &create, HeaderMap::new())
            .await
            .unwrap(),
        "created"
    );
    assert_eq!(
        api.get_dns_record_details(ZONE, RECORD, HeaderMap::new())
            .await
            .unwrap(),
        "details"
    );

    let update = DnsRecordUpdate::new("midomain.com")
        .record_type(DnsRecordType::TXT)
        .name("cf-test-updated")
        .locked(true)
        .ttl(220);
    assert_eq!(
        api.update_dns_record(ZONE, RECORD, &update, HeaderMap::new())
            .await
            .unwrap(),
        "updated"
    );
    assert_eq!(
        api.delete_dns_record(ZONE, RECORD, HeaderMap::new())
            .await
            .unwrap(),
        "deleted"
    );
}

#[tokio::test]
async fn remote_rejection_carries_cloudflare_message_and_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/client/v4/zones/{ZONE}/settings/cache_level")))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"success":false,"errors":[{"message":"invalid zone","code":1003}],"messages":[],"result":null}"#,
        ))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api
        .get_cache_level(ZONE, QueryParams::new(), HeaderMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RemoteApi { status: Some(400), .. }));
    assert_eq!(err.remote_message(), Some("invalid zone"));
    assert_eq!(err.remote_code(), Some(1003));
}

#[tokio::test]
async fn server_error_without_payload_is_still_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api
        .get_zones(QueryParams::new(), HeaderMap::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.remote_code(), None);
}

#[tokio::test]
async fn invalid_update_never_reaches_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let update = DnsRecordUpdate::new("1.2.3.4").ttl(119);
    let err = api
        .update_dns_record(ZONE, RECORD, &update, HeaderMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidValue { field: "ttl", .. }));
}

#[tokio::test]
async fn unreachable_host_is_a_remote_error_without_status() {
    let config = ClientConfig::new("user@example.com", "test_key")
        .with_base_url("http://127.0.0.1:1/client/v4/")
        .with_timeout(2);
    let api = Cloudflare::new(config).unwrap();

    let err = api
        .get_zones(QueryParams::new(), HeaderMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RemoteApi { status: None, .. }));
}
