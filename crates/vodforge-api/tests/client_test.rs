//! HTTP-level tests for the platform client against a mock server.

use assert_matches::assert_matches;
use serde_json::json;
use vodforge_api::models::{
    CodecConfigType, HttpsInput, MuxingStream, StartEncodingRequest, Status,
};
use vodforge_api::{BitmovinClient, ClientConfig, CodecConfigId, EncodingId, Error, StreamId};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(result: serde_json::Value) -> serde_json::Value {
    json!({
        "requestId": "req-1",
        "status": "SUCCESS",
        "data": { "result": result, "messages": [] }
    })
}

fn client_for(server: &MockServer) -> BitmovinClient {
    let config = ClientConfig::new("test-key")
        .with_base_url(format!("{}/v1", server.uri()))
        .with_tenant_org_id("org-1");
    BitmovinClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_create_sends_auth_headers_and_returns_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/encoding/inputs/https"))
        .and(header("X-Api-Key", "test-key"))
        .and(header("X-Tenant-Org-Id", "org-1"))
        .and(body_json(json!({"host": "media.example.com", "name": "Input"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(envelope(json!({"id": "in-123"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let id = client
        .create_https_input(&HttpsInput {
            host: "media.example.com".into(),
            name: "Input".into(),
        })
        .await
        .unwrap();

    assert_eq!(id.as_str(), "in-123");
}

#[tokio::test]
async fn test_org_header_is_omitted_without_org() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/encoding/encodings/enc-1/status"))
        .and(header("X-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "status": "RUNNING",
            "progress": 10
        }))))
        .mount(&server)
        .await;

    let config = ClientConfig::new("test-key").with_base_url(format!("{}/v1", server.uri()));
    let client = BitmovinClient::new(&config).unwrap();
    client
        .encoding_status(&EncodingId::from("enc-1"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("x-tenant-org-id"));
}

#[tokio::test]
async fn test_error_envelope_is_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/encoding/encodings"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "requestId": "req-2",
            "status": "ERROR",
            "data": {
                "code": 1000,
                "message": "Invalid cloud region",
                "developerMessage": "cloudRegion MOON_1 is not supported",
                "details": []
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .create_encoding(&vodforge_api::models::Encoding {
            name: "x".into(),
            cloud_region: "MOON_1".into(),
            encoder_version: "STABLE".into(),
        })
        .await;

    assert_matches!(
        result,
        Err(Error::Api { status: 400, code: Some(1000), ref message, .. })
            if message == "Invalid cloud region"
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/encoding/configurations/cfg-1/type"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.codec_config_type(&CodecConfigId::from("cfg-1")).await;

    assert_matches!(
        result,
        Err(Error::Decode { ref path, .. }) if path == "/encoding/configurations/cfg-1/type"
    );
}

#[tokio::test]
async fn test_list_walks_all_pages() {
    let server = MockServer::start().await;

    let first_page: Vec<_> = (0..100)
        .map(|i| json!({"id": format!("mux-{i}"), "streams": [{"streamId": format!("s-{i}")}]}))
        .collect();

    Mock::given(method("GET"))
        .and(path("/v1/encoding/encodings/enc-1/muxings/fmp4"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "totalCount": 101,
            "offset": 0,
            "limit": 100,
            "items": first_page
        }))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/encoding/encodings/enc-1/muxings/fmp4"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "totalCount": 101,
            "offset": 100,
            "limit": 100,
            "items": [{"id": "mux-100", "streams": [{"streamId": "s-100"}]}]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let muxings = client
        .list_fmp4_muxings(&EncodingId::from("enc-1"))
        .await
        .unwrap();

    assert_eq!(muxings.len(), 101);
    assert_eq!(muxings[100].id.as_str(), "mux-100");
    assert_eq!(
        muxings[100].streams,
        vec![MuxingStream {
            stream_id: StreamId::from("s-100")
        }]
    );
}

#[tokio::test]
async fn test_codec_lookup_uses_type_specific_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/encoding/configurations/cfg-9/type"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({"type": "DOLBY_ATMOS"}))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/encoding/configurations/audio/dolby-atmos/cfg-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "cfg-9",
            "bitrate": 448000,
            "rate": 48000
        }))))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let id = CodecConfigId::from("cfg-9");
    let codec_type = client.codec_config_type(&id).await.unwrap();
    assert_eq!(codec_type, CodecConfigType::DolbyAtmos);

    let details = client.get_codec_configuration(codec_type, &id).await.unwrap();
    assert_eq!(details.bitrate, Some(448000));
}

#[tokio::test]
async fn test_unsupported_codec_type_is_rejected_locally() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let result = client
        .get_codec_configuration(CodecConfigType::Other, &CodecConfigId::from("cfg"))
        .await;

    assert_matches!(result, Err(Error::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_start_encoding_and_read_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/encoding/encodings/enc-7/start"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"id": "enc-7"}))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/encoding/encodings/enc-7/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "status": "FINISHED",
            "progress": 100,
            "messages": [{"type": "INFO", "text": "done"}]
        }))))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let id = EncodingId::from("enc-7");
    client
        .start_encoding(&id, &StartEncodingRequest::default())
        .await
        .unwrap();

    let task = client.encoding_status(&id).await.unwrap();
    assert_eq!(task.status, Status::Finished);
    assert_eq!(task.progress, Some(100));
    assert!(task.error_messages().is_empty());
}
