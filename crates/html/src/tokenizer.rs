//! Small markup tokenizer for rendered editor fragments.
//!
//! Supports text, start/end tags with quoted or bare attributes, comments,
//! doctype, and raw text inside `<style>`/`<script>`. Tag and attribute names
//! are ASCII `[A-Za-z0-9:_-]` and lowercased. There is no HTML5 error
//! recovery: malformed constructs degrade to text or are skipped.
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "wbr"
    )
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    // Slice endpoints are only taken at ASCII structural bytes, so they stay on
    // UTF-8 boundaries.
    while i < len {
        if bytes[i] != b'<' {
            let end = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            let text = decode_entities(&input[i..end]);
            if !text.is_empty() {
                emit(&mut out, Token::Text(text));
            }
            i = end;
            continue;
        }

        let rest = &input[i..];
        if let Some(body) = rest.strip_prefix(COMMENT_START) {
            match body.find(COMMENT_END) {
                Some(end) => {
                    emit(&mut out, Token::Comment(body[..end].to_string()));
                    i += COMMENT_START.len() + end + COMMENT_END.len();
                }
                None => {
                    emit(&mut out, Token::Comment(body.to_string()));
                    i = len;
                }
            }
            continue;
        }

        if rest.len() >= 9 && rest.as_bytes()[..9].eq_ignore_ascii_case(b"<!doctype") {
            let Some(end) = memchr(b'>', rest.as_bytes()) else {
                break;
            };
            emit(&mut out, Token::Doctype(rest[2..end].trim().to_string()));
            i += end + 1;
            continue;
        }

        if bytes.get(i + 1) == Some(&b'/') {
            let start = i + 2;
            let mut j = start;
            while j < len && is_name_byte(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            j = memchr(b'>', &bytes[j..]).map_or(len, |rel| j + rel + 1);
            if !name.is_empty() {
                emit(&mut out, Token::EndTag(name));
            }
            i = j;
            continue;
        }

        let start = i + 1;
        let mut j = start;
        while j < len && is_name_byte(bytes[j]) {
            j += 1;
        }
        if j == start {
            // A lone `<` is text.
            emit(&mut out, Token::Text("<".to_string()));
            i += 1;
            continue;
        }
        let name = input[start..j].to_ascii_lowercase();
        let (attributes, mut self_closing, after) = read_attributes(input, j);
        self_closing |= is_void_element(&name);
        i = after;

        let rawtext = !self_closing && (name == "style" || name == "script");
        emit(
            &mut out,
            Token::StartTag {
                name: name.clone(),
                attributes,
                self_closing,
            },
        );

        if rawtext {
            let (body, close_end) = find_rawtext_end(&input[i..], &name);
            if !body.is_empty() {
                emit(&mut out, Token::Text(body.to_string()));
            }
            emit(&mut out, Token::EndTag(name));
            i += close_end;
        }
    }

    out
}

fn emit(out: &mut Vec<Token>, token: Token) {
    log::trace!(target: "html.tokenizer", "emit token: {token:?}");
    out.push(token);
}

type Attributes = Vec<(String, Option<String>)>;

/// Read attributes starting right after the tag name. Returns the attributes,
/// whether the tag was written self-closing, and the index after `>`.
fn read_attributes(input: &str, mut k: usize) -> (Attributes, bool, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attributes = Vec::new();

    loop {
        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        if k >= len {
            return (attributes, false, len);
        }
        match bytes[k] {
            b'>' => return (attributes, false, k + 1),
            b'/' if bytes.get(k + 1) == Some(&b'>') => return (attributes, true, k + 2),
            b'/' => {
                k += 1;
                continue;
            }
            _ => {}
        }

        let name_start = k;
        while k < len && is_name_byte(bytes[k]) {
            k += 1;
        }
        if k == name_start {
            k += 1;
            continue;
        }
        let name = input[name_start..k].to_ascii_lowercase();

        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        if k >= len || bytes[k] != b'=' {
            attributes.push((name, None));
            continue;
        }
        k += 1;
        while k < len && bytes[k].is_ascii_whitespace() {
            k += 1;
        }

        let value = if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
            let quote = bytes[k];
            let vstart = k + 1;
            let vend = memchr(quote, &bytes[vstart..]).map_or(len, |rel| vstart + rel);
            k = (vend + 1).min(len);
            decode_entities(&input[vstart..vend])
        } else {
            let vstart = k;
            while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                if bytes[k] == b'/' && bytes.get(k + 1) == Some(&b'>') {
                    break;
                }
                k += 1;
            }
            decode_entities(&input[vstart..k])
        };
        attributes.push((name, Some(value)));
    }
}

/// Locate `</name>` (ASCII case-insensitive) in raw text. Returns the body and
/// the offset just past the close tag; an unterminated element runs to the end.
fn find_rawtext_end<'a>(haystack: &'a str, name: &str) -> (&'a str, usize) {
    let bytes = haystack.as_bytes();
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &bytes[i..]) {
        let at = i + rel;
        let tag_start = at + 2;
        let tag_end = tag_start + name.len();
        if bytes.get(at + 1) == Some(&b'/')
            && bytes
                .get(tag_start..tag_end)
                .is_some_and(|t| t.eq_ignore_ascii_case(name.as_bytes()))
        {
            let mut k = tag_end;
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if bytes.get(k) == Some(&b'>') {
                return (&haystack[..at], k + 1);
            }
        }
        i = at + 1;
    }
    (haystack, haystack.len())
}
