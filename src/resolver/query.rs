//! Query string decoding shared by requests and candidate filenames.

use std::collections::BTreeMap;
use url::form_urlencoded;

/// Query parameters keyed by name. Ordered so logs and CLI output are stable.
pub type QueryParams = BTreeMap<String, String>;

/// Decode a `key=value&...` string (no leading `?`).
///
/// Uses form decoding: `+` becomes a space and percent escapes are
/// decoded. When a key repeats, the last value wins.
pub fn parse_query(raw: &str) -> QueryParams {
    form_urlencoded::parse(raw.as_bytes()).into_owned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let query = parse_query("a=1&b=two");
        assert_eq!(query.len(), 2);
        assert_eq!(query["a"], "1");
        assert_eq!(query["b"], "two");
    }

    #[test]
    fn test_parse_decodes_and_last_wins() {
        let query = parse_query("name=John+Doe&id=a%2Fb&id=c");
        assert_eq!(query["name"], "John Doe");
        assert_eq!(query["id"], "c");
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_query("").is_empty());
    }
}
