/*
[INPUT]:  Request parameters as key/value pairs
[OUTPUT]: application/x-www-form-urlencoded strings (and back)
[POS]:    HTTP layer - parameter encoding shared by signing and transmission
[UPDATE]: When parameter ordering or encoding rules change
*/

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Request parameters. Sorted keys give one stable encoding for signing and sending.
pub type Params = BTreeMap<String, String>;

/// Content type for non-GET request bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Form-encode params in key order; empty params encode to ""
pub fn encode_params(params: &Params) -> String {
    if params.is_empty() {
        return String::new();
    }
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

/// Decode a form-encoded string. Repeated keys keep the last value.
pub fn decode_params(encoded: &str) -> Params {
    form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect()
}

/// Build params from any iterator of pairs
pub fn params_from<K, V, I>(pairs: I) -> Params
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
