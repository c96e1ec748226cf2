//! Shared mock platform for workflow tests.
//!
//! [`MockApi`] wraps a wiremock server speaking the response envelope, so a
//! test only states which resources exist and what ids they get.

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use vodforge::poller::Poller;
use vodforge::recipes::Session;
use vodforge_api::{BitmovinClient, ClientConfig};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn envelope(result: Value) -> Value {
    json!({
        "requestId": "req-test",
        "status": "SUCCESS",
        "data": { "result": result, "messages": [] }
    })
}

pub struct MockApi {
    pub server: MockServer,
}

impl MockApi {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Session polling without delay.
    pub fn session(&self) -> Session {
        let config =
            ClientConfig::new("test-key").with_base_url(format!("{}/v1", self.server.uri()));
        let client = BitmovinClient::new(&config).expect("client");
        Session::new(client, Poller::new(Duration::ZERO))
    }

    /// POST `route` answers with `id`, exactly once.
    pub async fn created(&self, route: &str, id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/v1{route}")))
            .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({ "id": id }))))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// POST `route` whose body contains `body` answers with `id`, exactly once.
    pub async fn created_matching(&self, route: &str, body: Value, id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/v1{route}")))
            .and(body_partial_json(body))
            .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({ "id": id }))))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn get(&self, route: &str, result: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/v1{route}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(result)))
            .mount(&self.server)
            .await;
    }

    /// One-page list response.
    pub async fn list(&self, route: &str, items: Value) {
        let total = items.as_array().map_or(0, Vec::len);
        self.get(
            route,
            json!({ "items": items, "totalCount": total, "offset": 0, "limit": 100 }),
        )
        .await;
    }

    /// POST `route` is accepted with `expected` calls.
    pub async fn started(&self, route: &str, expected: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/v1{route}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    pub async fn status(&self, route: &str, status: &str) {
        self.get(route, json!({ "status": status, "progress": 100 }))
            .await;
    }

    /// Any request to `route` with `http_method` fails the test on drop.
    pub async fn never(&self, http_method: &str, route: &str) {
        Mock::given(method(http_method))
            .and(path(format!("/v1{route}")))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}
