//! RFC 8941 structured-field string lists.
//!
//! Only the subset the fetchurl protocol needs: encoding a list of URLs for
//! the `X-Source-Urls` request header, and decoding server lists from
//! configuration. Encoding is strict; decoding is a permissive cursor scan
//! that skips non-string members and item parameters instead of rejecting
//! the whole value.

/// Encode a list of strings as an RFC 8941 string list.
///
/// Each member is double-quoted with `\` and `"` escaped. An empty list
/// encodes to an empty string; callers should omit the header entirely in
/// that case.
pub fn encode_string_list(items: &[impl AsRef<str>]) -> String {
    items
        .iter()
        .map(|s| {
            let escaped = s.as_ref().replace('\\', "\\\\").replace('"', "\\\"");
            format!("\"{escaped}\"")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decode the string members of an RFC 8941 list.
///
/// Non-string members (bare tokens, booleans, numbers) and item parameters
/// (`;key=value`) are skipped. An unterminated quoted string consumes the
/// rest of the input. Empty input decodes to an empty list.
pub fn decode_string_list(input: &str) -> Vec<String> {
    let bytes = input.as_bytes();
    let mut items = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && matches!(bytes[i], b' ' | b'\t') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        if bytes[i] != b'"' {
            // Not a string member: skip to the next top-level comma.
            while i < bytes.len() && bytes[i] != b',' {
                i += 1;
            }
            i += 1;
            continue;
        }
        i += 1;

        let mut item = String::new();
        while i < bytes.len() {
            match bytes[i] {
                b'\\' if i + 1 < bytes.len() => {
                    item.push(bytes[i + 1] as char);
                    i += 2;
                }
                b'"' => {
                    i += 1;
                    break;
                }
                c => {
                    item.push(c as char);
                    i += 1;
                }
            }
        }
        items.push(item);

        // Skip trailing parameters and whitespace up to the next comma.
        while i < bytes.len() && bytes[i] != b',' {
            i += 1;
        }
        i += 1;
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_basic() {
        assert_eq!(
            encode_string_list(&["https://a.com", "https://b.com"]),
            r#""https://a.com", "https://b.com""#
        );
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_string_list(&[] as &[&str]), "");
    }

    #[test]
    fn test_encode_escapes() {
        assert_eq!(
            encode_string_list(&[r#"a"b"#, r"c\d"]),
            r#""a\"b", "c\\d""#
        );
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_string_list(""), Vec::<String>::new());
        assert_eq!(decode_string_list("   "), Vec::<String>::new());
    }

    #[test]
    fn test_decode_basic() {
        assert_eq!(
            decode_string_list(r#""https://a.com", "https://b.com""#),
            vec!["https://a.com", "https://b.com"]
        );
    }

    #[test]
    fn test_decode_skips_parameters() {
        assert_eq!(
            decode_string_list(r#""https://a.com";q=0.9, "https://b.com""#),
            vec!["https://a.com", "https://b.com"]
        );
    }

    #[test]
    fn test_decode_skips_non_string_members() {
        assert_eq!(
            decode_string_list(r#"token, "https://a.com", ?1, 42"#),
            vec!["https://a.com"]
        );
    }

    #[test]
    fn test_decode_unescapes() {
        assert_eq!(decode_string_list(r#""a\"b", "c\\d""#), vec![r#"a"b"#, r"c\d"]);
    }

    #[test]
    fn test_decode_unterminated_quote_consumes_rest() {
        assert_eq!(decode_string_list(r#""abc, def"#), vec!["abc, def"]);
    }

    #[test]
    fn test_roundtrip() {
        let urls = vec![
            "https://cdn.example.com/file.tar.gz".to_string(),
            "https://mirror.org/archive.tgz".to_string(),
        ];
        assert_eq!(decode_string_list(&encode_string_list(&urls)), urls);
    }
}
