/*
[INPUT]:  API key/secret and the wall clock
[OUTPUT]: Validated credentials and replay-safe nonces
[POS]:    Auth layer - key material and nonce issuance for request signing
[UPDATE]: When credential handling or nonce strategy changes
*/

pub mod credentials;
pub mod nonce;

pub use credentials::Credentials;
pub use nonce::{FixedNonce, MAX_NONCE, MonotonicNonce, NonceSource, SystemClockNonce, unix_millis};
