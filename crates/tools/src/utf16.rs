/// UTF-16 offset helpers for DOM-style text positions.
///
/// Hosts address text in UTF-16 code units (DOM `Range`/caret offsets) while
/// Rust strings are UTF-8. These helpers translate between the two without
/// ever producing a slice endpoint inside a multi-byte character.

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Map a UTF-16 offset to a byte index in `s`.
///
/// - Offsets past the end clamp to `s.len()`.
/// - An offset that lands between the two halves of a surrogate pair clamps
///   back to the start of that character.
pub fn byte_index_for_utf16(s: &str, offset: usize) -> usize {
    let mut units = 0usize;
    for (idx, ch) in s.char_indices() {
        if units >= offset {
            return idx;
        }
        let next = units + ch.len_utf16();
        if next > offset {
            return idx;
        }
        units = next;
    }
    s.len()
}

/// Slice `s` between two UTF-16 offsets with `String.prototype.slice`
/// semantics: offsets are clamped to the text, and `start >= end` yields "".
pub fn slice_utf16(s: &str, start: usize, end: usize) -> &str {
    let start = byte_index_for_utf16(s, start);
    let end = byte_index_for_utf16(s, end);
    if start >= end {
        return "";
    }
    &s[start..end]
}

/// One Unicode scalar value together with its UTF-16 range in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodePoint<'a> {
    pub text: &'a str,
    pub ch: char,
    pub start: usize,
    pub end: usize,
}

/// Iterate `s` by code point, reporting each point's UTF-16 range.
///
/// A surrogate pair is a single item spanning two code units.
pub fn code_points(s: &str) -> CodePoints<'_> {
    CodePoints {
        source: s,
        chars: s.char_indices(),
        offset: 0,
    }
}

pub struct CodePoints<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>,
    offset: usize,
}

impl<'a> Iterator for CodePoints<'a> {
    type Item = CodePoint<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, ch) = self.chars.next()?;
        let start = self.offset;
        self.offset += ch.len_utf16();
        Some(CodePoint {
            text: &self.source[idx..idx + ch.len_utf8()],
            ch,
            start,
            end: self.offset,
        })
    }
}
