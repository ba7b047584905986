/*
[INPUT]:  Fully signed request (url, method, body, headers)
[OUTPUT]: Raw HTTP response (status, headers, body)
[POS]:    HTTP layer - wire transport abstraction
[UPDATE]: When adding transports or changing connection options
*/

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode, Url};

use crate::http::{LocalbitcoinsError, Result};
use crate::http::config::ClientConfig;

/// Request handed to a transport, already signed
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: Url,
    pub method: Method,
    pub body: String,
    pub headers: HeaderMap,
}

/// Raw response as received from the wire
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Sends signed requests
///
/// Implementations must pass headers and body through untouched. Errors are
/// returned as-is to the caller; no retries happen at this layer.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Default transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    /// Build a reqwest client with the configured timeouts; zero timeouts are rejected
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.timeout_ms == 0 || config.connect_timeout_ms == 0 {
            return Err(LocalbitcoinsError::config(
                "timeouts must be at least one millisecond",
            ));
        }
        let http_client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self { http_client })
    }

    /// Wrap an existing reqwest client (shared connection pool, custom TLS)
    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .http_client
            .request(request.method, request.url)
            .headers(request.headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
