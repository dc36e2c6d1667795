/// Whitespace as matched by the ECMAScript `\s` class.
///
/// This differs from `char::is_whitespace` in two places: U+FEFF (BOM) counts,
/// U+0085 (NEL) does not.
#[inline]
pub fn is_ecma_whitespace(ch: char) -> bool {
    match ch {
        '\u{0009}' // Character Tabulation
        | '\u{000A}' // Line Feed
        | '\u{000B}' // Line Tabulation
        | '\u{000C}' // Form Feed
        | '\u{000D}' // Carriage Return
        | '\u{0020}' // Space
        | '\u{00A0}' // No-break Space
        | '\u{1680}' // Ogham Space Mark
        | '\u{2028}' // Line Separator
        | '\u{2029}' // Paragraph Separator
        | '\u{202F}' // Narrow No-break Space
        | '\u{205F}' // Medium Mathematical Space
        | '\u{3000}' // Ideographic Space
        | '\u{FEFF}' // Zero Width No-break Space
        => true,

        // En Quad through Hair Space.
        ch if ('\u{2000}'..='\u{200A}').contains(&ch) => true,

        _ => false,
    }
}

/// Break opportunities for the simulated line breaker: ASCII collapsible
/// whitespace only, so NBSP keeps words together.
#[inline]
pub fn is_ascii_break_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\u{0C}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ecmascript_class() {
        for ch in [' ', '\t', '\n', '\u{A0}', '\u{2003}', '\u{3000}', '\u{FEFF}'] {
            assert!(is_ecma_whitespace(ch), "{ch:?} should be whitespace");
        }
        for ch in ['a', '\u{85}', '\u{200B}', '-'] {
            assert!(!is_ecma_whitespace(ch), "{ch:?} should not be whitespace");
        }
    }

    #[test]
    fn nbsp_is_not_a_break_opportunity() {
        assert!(is_ascii_break_space(' '));
        assert!(!is_ascii_break_space('\u{A0}'));
    }
}
