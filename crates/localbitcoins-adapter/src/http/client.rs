/*
[INPUT]:  Client configuration, nonce source and transport
[OUTPUT]: Signed API calls returning ApiResponse values
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use tracing::{debug, warn};

use crate::auth::{MonotonicNonce, NonceSource};
use crate::http::config::ClientConfig;
use crate::http::params::Params;
use crate::http::response::ApiResponse;
use crate::http::signature::{RequestSigner, SignedRequest};
use crate::http::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::http::{LocalbitcoinsError, Result};

/// HTTP client for the LocalBitcoins API
///
/// Cheap to share behind an `Arc`; every call is independent apart from the
/// nonce source, which serializes nonce issuance.
#[derive(Debug, Clone)]
pub struct LocalbitcoinsClient {
    base_url: String,
    signer: RequestSigner,
    nonce_source: Arc<dyn NonceSource>,
    transport: Arc<dyn Transport>,
    debug: bool,
    deserialize: bool,
    extra_params: Params,
    extra_headers: HeaderMap,
}

impl LocalbitcoinsClient {
    /// Create a client using the reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends through a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let signer = RequestSigner::new(config.credentials())?;

        Url::parse(&config.base_url)?;
        let base_url = config.base_url.trim_matches('/').to_string();

        let mut extra_headers = HeaderMap::new();
        for (name, value) in &config.extra_headers {
            let name = HeaderName::try_from(name.as_str()).map_err(|e| {
                LocalbitcoinsError::config(format!("invalid extra header name {name:?}: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                LocalbitcoinsError::config(format!("invalid value for extra header {name}: {e}"))
            })?;
            extra_headers.insert(name, value);
        }

        Ok(Self {
            base_url,
            signer,
            nonce_source: Arc::new(MonotonicNonce::new()),
            transport,
            debug: config.debug,
            deserialize: config.deserialize,
            extra_params: config.extra_params,
            extra_headers,
        })
    }

    /// Replace the nonce source (tests pin it, multi-process setups share a counter)
    pub fn with_nonce_source(mut self, nonce_source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = nonce_source;
        self
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>/<path>/` with surrounding slashes normalized
    pub fn endpoint_url(&self, relative_path: &str) -> Result<Url> {
        let url = format!("{}/{}/", self.base_url, relative_path.trim_matches('/'));
        Ok(Url::parse(&url)?)
    }

    /// Sign and send a request
    pub async fn request(
        &self,
        method: Method,
        relative_path: &str,
        params: &Params,
    ) -> Result<ApiResponse> {
        self.request_with_headers(method, relative_path, params, &HeaderMap::new())
            .await
    }

    /// Sign and send a request with additional one-time headers
    ///
    /// `relative_path` is signed exactly as given. For GET the signed params
    /// go on the query string since the body is always empty.
    pub async fn request_with_headers(
        &self,
        method: Method,
        relative_path: &str,
        params: &Params,
        headers: &HeaderMap,
    ) -> Result<ApiResponse> {
        let signed = self.sign(&method, relative_path, params)?;

        let mut url = self.endpoint_url(relative_path)?;
        if method == Method::GET && !signed.encoded_params.is_empty() {
            url.set_query(Some(&signed.encoded_params));
        }

        let mut request_headers = self.extra_headers.clone();
        for (name, value) in headers {
            request_headers.insert(name.clone(), value.clone());
        }
        for (name, value) in &signed.headers {
            request_headers.insert(name.clone(), value.clone());
        }

        debug!(method = %method, url = %url, nonce = signed.nonce, "sending signed request");
        if signed.body.is_empty() && !signed.encoded_params.is_empty() && method == Method::GET {
            debug!("suppressing body for GET request");
        }

        let response = self
            .transport
            .send(TransportRequest {
                url,
                method,
                body: signed.body,
                headers: request_headers,
            })
            .await?;

        if response.status.is_success() {
            debug!(status = %response.status, "response received");
        } else {
            warn!(status = %response.status, path = relative_path, "API returned error status");
        }

        ApiResponse::from_transport(response, self.deserialize)
    }

    /// Merge client-level params and sign with a fresh nonce
    pub fn sign(&self, method: &Method, relative_path: &str, params: &Params) -> Result<SignedRequest> {
        let mut merged = self.extra_params.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

        let nonce = self.nonce_source.next_nonce();
        let signed = self.signer.sign(method, relative_path, &merged, nonce)?;

        if self.debug {
            let message =
                self.signer
                    .canonical_message(signed.nonce, relative_path, &signed.encoded_params);
            debug!(
                method = %method,
                params = ?merged,
                message = %message,
                "signed request"
            );
        }

        Ok(signed)
    }

    pub async fn get(&self, relative_path: &str, params: &Params) -> Result<ApiResponse> {
        self.request(Method::GET, relative_path, params).await
    }

    pub async fn post(&self, relative_path: &str, params: &Params) -> Result<ApiResponse> {
        self.request(Method::POST, relative_path, params).await
    }
}
