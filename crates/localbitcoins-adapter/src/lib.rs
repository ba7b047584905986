/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public LocalBitcoins adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;

// Re-export commonly used types from auth
pub use auth::{Credentials, FixedNonce, MonotonicNonce, NonceSource, SystemClockNonce};

// Re-export commonly used types from http
pub use http::{
    ApiResponse,
    ClientConfig,
    LocalbitcoinsClient,
    LocalbitcoinsError,
    Params,
    RequestSigner,
    ResponseData,
    Result,
    SignedRequest,
    Transport,
    TransportRequest,
    TransportResponse,
};
