//! UTF-8 percent-encoding for titles and query values
//!
//! Two flavours are needed: query encoding (form style, space becomes `+`)
//! for the configurable link base, and page-path encoding (space becomes `_`)
//! for the default wiki article path.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched by form-style query encoding.
///
/// Space is also removed from the set so it can be turned into `+` afterwards.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'*')
    .remove(b'_')
    .remove(b' ');

/// Characters left untouched in a page path
const TITLE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'*')
    .remove(b'(')
    .remove(b')')
    .remove(b',')
    .remove(b';')
    .remove(b'@')
    .remove(b':')
    .remove(b'/');

/// Encode text for use in a URL query string
///
/// ASCII alphanumerics and `.-*_` pass through, a space becomes `+` and every
/// other UTF-8 byte is written as `%XX` with uppercase hex digits.
pub fn encode_query(text: &str) -> String {
    utf8_percent_encode(text, QUERY).to_string().replace(' ', "+")
}

/// Encode a page title for use as an article path segment
pub fn encode_title(title: &str) -> String {
    let underscored = title.trim().replace(' ', "_");
    utf8_percent_encode(&underscored, TITLE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_query_space_becomes_plus() {
        assert_eq!(encode_query("Main Page"), "Main+Page");
    }

    #[test]
    fn test_encode_query_keeps_unreserved() {
        assert_eq!(encode_query("a.b-c*d_e"), "a.b-c*d_e");
    }

    #[test]
    fn test_encode_query_escapes_reserved() {
        assert_eq!(encode_query("a+b&c=d/e"), "a%2Bb%26c%3Dd%2Fe");
        assert_eq!(encode_query("~"), "%7E");
    }

    #[test]
    fn test_encode_query_utf8_bytes() {
        assert_eq!(encode_query("Zürich"), "Z%C3%BCrich");
        assert_eq!(encode_query("日本"), "%E6%97%A5%E6%9C%AC");
    }

    #[test]
    fn test_encode_query_empty() {
        assert_eq!(encode_query(""), "");
    }

    #[test]
    fn test_encode_title_underscores() {
        assert_eq!(encode_title(" Main Page "), "Main_Page");
    }

    #[test]
    fn test_encode_title_keeps_path_characters() {
        assert_eq!(encode_title("Help:Contents/Sub (x)"), "Help:Contents/Sub_(x)");
        assert_eq!(encode_title("A&B?"), "A%26B%3F");
    }
}
