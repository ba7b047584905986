/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for localbitcoins-adapter tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use localbitcoins_adapter::{
    ClientConfig, FixedNonce, LocalbitcoinsClient, Result, Transport, TransportRequest,
    TransportResponse,
};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use sha2::Sha256;
use wiremock::MockServer;

pub const TEST_KEY: &str = "testkey";
pub const TEST_SECRET: &str = "testsecret";
pub const TEST_NONCE: u64 = 1_000_000_000_000;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server with a pinned nonce
#[allow(dead_code)]
pub fn mock_client(server: &MockServer) -> LocalbitcoinsClient {
    LocalbitcoinsClient::new(ClientConfig::new(TEST_KEY, TEST_SECRET).with_base_url(server.uri()))
        .expect("client init")
        .with_nonce_source(Arc::new(FixedNonce(TEST_NONCE)))
}

/// Independent HMAC-SHA256 uppercase-hex reference
pub fn reference_signature(secret: &str, message: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("hmac key");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes()).to_uppercase()
}

/// Transport that records requests and replays a canned response
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordingTransport {
    pub requests: Arc<Mutex<Vec<TransportRequest>>>,
    status: StatusCode,
    body: String,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            status,
            body: body.to_string(),
        }
    }

    pub fn recorded(&self) -> Vec<TransportRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().expect("lock").push(request);
        Ok(TransportResponse {
            status: self.status,
            headers: HeaderMap::new(),
            body: self.body.clone(),
        })
    }
}
