//! Encoding of identifiers into single path segments.
//!
//! A multi-level namespace travels as one segment: each level is
//! form-url-encoded and the levels are joined with `%1F`, the encoded ASCII
//! unit separator. Because the separator is itself encoded it can never
//! appear in an encoded level.

use url::form_urlencoded;

use crate::catalog::types::Namespace;

const NAMESPACE_SEPARATOR: &str = "%1F";

/// Form-url-encode a single value (space becomes `+`).
pub fn encode_string(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Inverse of [`encode_string`]. Malformed escapes are kept literally.
pub fn decode_string(encoded: &str) -> String {
    // The form parser splits on `&` and `=`; escape them so the whole
    // segment decodes as a single key.
    let escaped = encoded.replace('&', "%26").replace('=', "%3D");
    form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

pub fn encode_namespace(namespace: &Namespace) -> String {
    namespace
        .levels()
        .iter()
        .map(|level| encode_string(level))
        .collect::<Vec<_>>()
        .join(NAMESPACE_SEPARATOR)
}

pub fn decode_namespace(encoded: &str) -> Namespace {
    Namespace::of(encoded.split(NAMESPACE_SEPARATOR).map(decode_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_encoding() {
        assert_eq!(encode_string("a b/c"), "a+b%2Fc");
        assert_eq!(decode_string("a+b%2Fc"), "a b/c");
        assert_eq!(decode_string("x=y&z"), "x=y&z");
        assert_eq!(decode_string(""), "");
    }

    #[test]
    fn test_namespace_encoding() {
        let ns = Namespace::of(["accounting", "tax rates"]);
        let encoded = encode_namespace(&ns);
        assert_eq!(encoded, "accounting%1Ftax+rates");
        assert_eq!(decode_namespace(&encoded), ns);
    }

    #[test]
    fn test_single_level_namespace() {
        assert_eq!(decode_namespace("accounting"), Namespace::of(["accounting"]));
    }

    #[test]
    fn test_separator_inside_level_is_escaped() {
        let ns = Namespace::of(["a%1Fb"]);
        assert_eq!(decode_namespace(&encode_namespace(&ns)), ns);
    }
}
