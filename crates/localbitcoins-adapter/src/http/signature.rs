/*
[INPUT]:  Method, relative path, params, nonce and API credentials
[OUTPUT]: Signed request (Apiauth-* headers, form body)
[POS]:    HTTP layer - HMAC-SHA256 request signing for every API call
[UPDATE]: When changing signing algorithm or header format
*/

use hmac::{Hmac, Mac};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use sha2::Sha256;

use crate::auth::{Credentials, MAX_NONCE};
use crate::http::params::{FORM_CONTENT_TYPE, Params, encode_params};
use crate::http::{LocalbitcoinsError, Result};

type HmacSha256 = Hmac<Sha256>;

pub const APIAUTH_KEY: HeaderName = HeaderName::from_static("apiauth-key");
pub const APIAUTH_NONCE: HeaderName = HeaderName::from_static("apiauth-nonce");
pub const APIAUTH_SIGNATURE: HeaderName = HeaderName::from_static("apiauth-signature");

const SUPPORTED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
];

/// Everything needed to put one authenticated call on the wire
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub relative_path: String,
    /// Form-encoded params exactly as they were signed
    pub encoded_params: String,
    pub nonce: u64,
    /// Uppercase hex HMAC-SHA256
    pub signature: String,
    pub headers: HeaderMap,
    /// Always empty for GET
    pub body: String,
}

/// Signs requests with the Apiauth HMAC scheme
///
/// Message: `{nonce}{key}{relative_path}{urlencoded_params}` with no separators,
/// HMAC-SHA256 keyed by the API secret, rendered as uppercase hex.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Create a signer; fails when key or secret is empty
    pub fn new(credentials: Credentials) -> Result<Self> {
        credentials.validate()?;
        Ok(Self { credentials })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build the exact string the server recomputes
    pub fn canonical_message(&self, nonce: u64, relative_path: &str, encoded_params: &str) -> String {
        format!(
            "{nonce}{key}{relative_path}{encoded_params}",
            key = self.credentials.key()
        )
    }

    /// HMAC-SHA256 of `message` under the API secret, uppercase hex
    pub fn sign_message(&self, message: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.credentials.secret())
            .map_err(|e| LocalbitcoinsError::config(format!("Failed to create HMAC: {e}")))?;
        mac.update(message.as_bytes());
        Ok(hex::encode_upper(mac.finalize().into_bytes()))
    }

    /// Sign one request
    ///
    /// GET params are covered by the signature but never sent as a body;
    /// every other method carries them as a form-encoded body.
    pub fn sign(
        &self,
        method: &Method,
        relative_path: &str,
        params: &Params,
        nonce: u64,
    ) -> Result<SignedRequest> {
        check_method(method)?;
        if nonce == 0 || nonce > MAX_NONCE {
            return Err(LocalbitcoinsError::config(format!(
                "nonce {nonce} is not a positive 63-bit integer"
            )));
        }

        let encoded_params = encode_params(params);
        let message = self.canonical_message(nonce, relative_path, &encoded_params);
        let signature = self.sign_message(&message)?;

        let mut headers = HeaderMap::with_capacity(4);
        let key = HeaderValue::from_str(self.credentials.key()).map_err(|_| {
            LocalbitcoinsError::config("API key contains characters not allowed in a header")
        })?;
        headers.insert(APIAUTH_KEY, key);
        headers.insert(APIAUTH_NONCE, HeaderValue::from(nonce));
        // hex digits are always a valid header value
        headers.insert(
            APIAUTH_SIGNATURE,
            HeaderValue::from_str(&signature)
                .map_err(|e| LocalbitcoinsError::config(e.to_string()))?,
        );

        let body = if *method == Method::GET {
            String::new()
        } else {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
            encoded_params.clone()
        };

        Ok(SignedRequest {
            method: method.clone(),
            relative_path: relative_path.to_string(),
            encoded_params,
            nonce,
            signature,
            headers,
            body,
        })
    }
}

/// Reject verbs the API does not define
pub fn check_method(method: &Method) -> Result<()> {
    if SUPPORTED_METHODS.contains(method) {
        Ok(())
    } else {
        Err(LocalbitcoinsError::UnsupportedMethod(method.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::params::params_from;
    use rstest::rstest;

    const NONCE: u64 = 1_000_000_000_000;

    fn signer() -> RequestSigner {
        RequestSigner::new(Credentials::new("testkey", "testsecret")).expect("valid credentials")
    }

    fn reference_hmac(secret: &[u8], message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret).unwrap();
        mac.update(message.as_bytes());
        mac.finalize()
            .into_bytes()
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect()
    }

    #[test]
    fn test_canonical_message_has_no_separators() {
        let message = signer().canonical_message(NONCE, "/api/wallet/", "");
        assert_eq!(message, "1000000000000testkey/api/wallet/");

        let message = signer().canonical_message(NONCE, "/api/ads/", "baz=quux&foo=bar");
        assert_eq!(message, "1000000000000testkey/api/ads/baz=quux&foo=bar");
    }

    #[test]
    fn test_reference_vector() {
        let signed = signer()
            .sign(&Method::GET, "/api/wallet/", &Params::new(), NONCE)
            .unwrap();

        assert_eq!(
            signed.signature,
            "45CC31340398746E59C6FD877C5D482019BF7B43295342B4C872AA48B2A08489"
        );
        let expected = reference_hmac(b"testsecret", "1000000000000testkey/api/wallet/");
        assert_eq!(signed.signature, expected);
        assert_eq!(signed.signature.len(), 64);
        assert!(signed.signature.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_rfc4231_vector_uppercase() {
        // RFC 4231 test case 2
        let signer = RequestSigner::new(Credentials::new("k", "Jefe")).unwrap();
        assert_eq!(
            signer.sign_message("what do ya want for nothing?").unwrap(),
            "5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843"
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let params = params_from([("currency", "BTC")]);
        let a = signer().sign(&Method::POST, "/api/wallet-send/", &params, NONCE).unwrap();
        let b = signer().sign(&Method::POST, "/api/wallet-send/", &params, NONCE).unwrap();
        assert_eq!(a.signature, b.signature);
        assert_eq!(a.body, b.body);
    }

    #[rstest]
    #[case::nonce("testkey", "/api/wallet/", "BTC", NONCE + 1)]
    #[case::key("otherkey", "/api/wallet/", "BTC", NONCE)]
    #[case::path("testkey", "/api/wallet-balance/", "BTC", NONCE)]
    #[case::param_value("testkey", "/api/wallet/", "ETH", NONCE)]
    fn test_each_field_changes_signature(
        #[case] key: &str,
        #[case] path: &str,
        #[case] currency: &str,
        #[case] nonce: u64,
    ) {
        let base = signer()
            .sign(&Method::POST, "/api/wallet/", &params_from([("currency", "BTC")]), NONCE)
            .unwrap();

        let changed_signer = RequestSigner::new(Credentials::new(key, "testsecret")).unwrap();
        let changed = changed_signer
            .sign(&Method::POST, path, &params_from([("currency", currency)]), nonce)
            .unwrap();

        assert_ne!(base.signature, changed.signature);
    }

    #[test]
    fn test_secret_changes_signature() {
        let other = RequestSigner::new(Credentials::new("testkey", "othersecret")).unwrap();
        assert_ne!(
            signer().sign_message("1000000000000testkey/api/wallet/").unwrap(),
            other.sign_message("1000000000000testkey/api/wallet/").unwrap()
        );
    }

    #[test]
    fn test_get_signs_params_but_sends_no_body() {
        let params = params_from([("foo", "bar"), ("baz", "quux")]);
        let signed = signer().sign(&Method::GET, "/api/ads/", &params, NONCE).unwrap();

        assert_eq!(signed.body, "");
        assert_eq!(signed.encoded_params, "baz=quux&foo=bar");
        assert_eq!(
            signed.signature,
            reference_hmac(b"testsecret", "1000000000000testkey/api/ads/baz=quux&foo=bar")
        );
        assert!(signed.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_get_without_params_has_empty_body() {
        let signed = signer().sign(&Method::GET, "/api/myself/", &Params::new(), NONCE).unwrap();
        assert_eq!(signed.body, "");
        assert_eq!(signed.encoded_params, "");
    }

    #[rstest]
    #[case(Method::POST)]
    #[case(Method::PUT)]
    #[case(Method::PATCH)]
    #[case(Method::DELETE)]
    #[case(Method::HEAD)]
    fn test_non_get_sends_form_body(#[case] method: Method) {
        let params = params_from([("address", "1abc"), ("amount", "0.5")]);
        let signed = signer().sign(&method, "/api/wallet-send/", &params, NONCE).unwrap();

        assert_eq!(signed.body, "address=1abc&amount=0.5");
        assert_eq!(signed.body, signed.encoded_params);
        assert_eq!(signed.headers[CONTENT_TYPE], FORM_CONTENT_TYPE);
        assert_eq!(signed.headers.len(), 4);
    }

    #[test]
    fn test_get_headers_are_exactly_auth_headers() {
        let signed = signer().sign(&Method::GET, "/api/wallet/", &Params::new(), NONCE).unwrap();

        assert_eq!(signed.headers.len(), 3);
        assert_eq!(signed.headers[APIAUTH_KEY], "testkey");
        assert_eq!(signed.headers[APIAUTH_NONCE], "1000000000000");
        assert_eq!(signed.headers[APIAUTH_SIGNATURE], signed.signature.as_str());
    }

    #[test]
    fn test_empty_credentials_rejected_before_signing() {
        let err = RequestSigner::new(Credentials::new("", "testsecret")).unwrap_err();
        assert!(matches!(err, LocalbitcoinsError::Configuration(_)));

        let err = RequestSigner::new(Credentials::new("testkey", "")).unwrap_err();
        assert!(matches!(err, LocalbitcoinsError::Configuration(_)));
    }

    #[test]
    fn test_unsupported_method() {
        let err = signer()
            .sign(&Method::TRACE, "/api/wallet/", &Params::new(), NONCE)
            .unwrap_err();
        assert!(matches!(err, LocalbitcoinsError::UnsupportedMethod(m) if m == "TRACE"));
    }

    #[test]
    fn test_nonce_range() {
        assert!(signer().sign(&Method::GET, "/api/wallet/", &Params::new(), 0).is_err());
        assert!(
            signer()
                .sign(&Method::GET, "/api/wallet/", &Params::new(), MAX_NONCE + 1)
                .is_err()
        );
        assert!(
            signer()
                .sign(&Method::GET, "/api/wallet/", &Params::new(), MAX_NONCE)
                .is_ok()
        );
    }
}
