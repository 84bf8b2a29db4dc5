//! Item identifier encoding for marketplace query strings.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes left untouched: ASCII alphanumerics plus `-`, `_`, `.`, `~` and `/`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode an item name for embedding in a URL query component.
///
/// Spaces become `%20` (not `+`), so the same string works for both
/// marketplaces. Non-ASCII characters are encoded as UTF-8 escapes.
pub fn encode_identifier(name: &str) -> String {
    utf8_percent_encode(name, QUERY_COMPONENT).to_string()
}
