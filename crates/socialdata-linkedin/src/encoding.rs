//! Query-string helpers matching what LinkedIn expects on the wire.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a single URL component.
pub(crate) fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `application/x-www-form-urlencoded` serialization; spaces become `+`.
pub(crate) fn form_encode(pairs: &[(&str, &str)]) -> String {
    let encode = |s: &str| encode_component(s).replace("%20", "+");
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Reverses form encoding on a whole query string.
pub(crate) fn form_decode(query: &str) -> String {
    percent_decode_str(&query.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}
