/*
[INPUT]:  Client configuration, credentials and endpoint arguments
[OUTPUT]: Signed HTTP requests and ApiResponse values
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod response;
pub mod signature;
pub mod transport;
pub mod wallet;

pub use error::{LocalbitcoinsError, Result};
pub use signature::{RequestSigner, SignedRequest};

pub use client::LocalbitcoinsClient;
pub use config::ClientConfig;
pub use params::{Params, decode_params, encode_params, params_from};
pub use response::{ApiResponse, ResponseData};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
