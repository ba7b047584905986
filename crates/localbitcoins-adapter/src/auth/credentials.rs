/*
[INPUT]:  API key and secret from client configuration
[OUTPUT]: Validated, immutable credential pair
[POS]:    Auth layer - HMAC key material
[UPDATE]: When credential format or validation rules change
*/

use std::fmt;

use crate::http::{LocalbitcoinsError, Result};

/// API key/secret pair used to sign every request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: Vec<u8>,
}

impl Credentials {
    /// Create a credential pair. Validation happens in [`Credentials::validate`].
    pub fn new(key: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// The API authentication key (sent as `Apiauth-Key`)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw secret bytes used as the HMAC key
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Fail fast when either half of the pair is empty
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(LocalbitcoinsError::config("API key is empty"));
        }
        if self.secret.is_empty() {
            return Err(LocalbitcoinsError::config("API secret is empty"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}
