/*
[INPUT]:  Raw transport response and the deserialize flag
[OUTPUT]: ApiResponse (status + data + headers)
[POS]:    HTTP layer - response wrapping and JSON decoding
[UPDATE]: When response handling or decoding changes
*/

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::transport::TransportResponse;
use crate::http::{LocalbitcoinsError, Result};

/// Response payload, decoded or raw
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(Value),
    Raw(String),
}

/// Result of one API call. Non-2xx statuses are returned here, not as errors.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub data: ResponseData,
    pub headers: HeaderMap,
    raw_body: String,
}

impl ApiResponse {
    /// Wrap a transport response, decoding JSON when `deserialize` is set
    ///
    /// An empty body decodes to `null`. A non-2xx body that is not JSON (a
    /// proxy error page, say) is kept as raw text so the status survives.
    pub fn from_transport(response: TransportResponse, deserialize: bool) -> Result<Self> {
        let data = if deserialize {
            if response.body.trim().is_empty() {
                ResponseData::Json(Value::Null)
            } else {
                match serde_json::from_str(&response.body) {
                    Ok(value) => ResponseData::Json(value),
                    Err(_) if !response.status.is_success() => {
                        ResponseData::Raw(response.body.clone())
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        } else {
            ResponseData::Raw(response.body.clone())
        };

        Ok(Self {
            status: response.status,
            data,
            headers: response.headers,
            raw_body: response.body,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body exactly as received
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// Decoded JSON, if the client deserializes responses
    pub fn json(&self) -> Option<&Value> {
        match &self.data {
            ResponseData::Json(value) => Some(value),
            ResponseData::Raw(_) => None,
        }
    }

    /// Deserialize the body into a caller-defined type
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.data {
            ResponseData::Json(value) => Ok(serde_json::from_value(value.clone())?),
            ResponseData::Raw(raw) => Ok(serde_json::from_str(raw)?),
        }
    }

    /// Turn a non-2xx response into `LocalbitcoinsError::Server`
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(LocalbitcoinsError::server_error(self.status, self.raw_body))
        }
    }
}
