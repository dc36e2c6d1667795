use memchr::memchr;

// Longest accepted reference body between `&` and `;` (`#x10FFFF` is 8).
const MAX_REFERENCE_LEN: usize = 8;

/// Decode the small set of character references editor markup actually uses.
///
/// Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`. Numeric:
/// `&#215;` and `&#xD7;`, semicolon-terminated only. Anything else, including
/// surrogate or out-of-range scalars, passes through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return s.to_string();
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;

    while i < bytes.len() {
        let Some(rel) = memchr(b'&', &bytes[i..]) else {
            out.push_str(&s[i..]);
            break;
        };
        let amp = i + rel;
        out.push_str(&s[i..amp]);

        match decode_reference(&s[amp + 1..]) {
            Some((ch, consumed)) => {
                out.push(ch);
                i = amp + 1 + consumed;
            }
            None => {
                out.push('&');
                i = amp + 1;
            }
        }
    }

    out
}

/// Decode the reference body that follows an `&`. Returns the character and
/// the number of bytes consumed including the trailing `;`.
fn decode_reference(rest: &str) -> Option<(char, usize)> {
    let window = &rest.as_bytes()[..rest.len().min(MAX_REFERENCE_LEN + 1)];
    let semi = memchr(b';', window)?;
    let body = &rest[..semi];

    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        _ => {
            let numeric = body.strip_prefix('#')?;
            let value = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) if is_all(hex, |b| b.is_ascii_hexdigit()) => {
                    u32::from_str_radix(hex, 16).ok()?
                }
                None if is_all(numeric, |b| b.is_ascii_digit()) => numeric.parse::<u32>().ok()?,
                _ => return None,
            };
            char::from_u32(value)?
        }
    };

    Some((ch, semi + 1))
}

fn is_all(s: &str, pred: impl Fn(u8) -> bool) -> bool {
    !s.is_empty() && s.bytes().all(pred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(decode_entities("120\u{d7}32"), "120\u{d7}32");
    }

    #[test]
    fn decodes_named_references() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("I&apos;m"), "I'm");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{00A0}b");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_entities("&#215;"), "\u{d7}");
        assert_eq!(decode_entities("&#xD7;"), "\u{d7}");
        assert_eq!(decode_entities("&#x1F600;"), "\u{1F600}");
    }

    #[test]
    fn passes_through_malformed_references() {
        assert_eq!(decode_entities("&amp"), "&amp");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#;"), "&#;");
        assert_eq!(decode_entities("a & b"), "a & b");
    }
}
