use css::{ComputedStyle, LineHeight};

/// Text metrics for the simulated renderer, measured one code point at a
/// time so every character gets its own box.
pub trait TextMeasurer {
    /// Horizontal advance of `ch` in CSS px.
    fn advance(&self, ch: char, style: &ComputedStyle) -> f32;

    /// Used line height in CSS px.
    fn line_height(&self, style: &ComputedStyle) -> f32;
}

/// Every visible character advances by the same fraction of its font size.
#[derive(Clone, Copy, Debug)]
pub struct MonoMeasurer {
    pub advance_ratio: f32,
    pub normal_line_height: f32,
}

impl Default for MonoMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.5,
            normal_line_height: css::NORMAL_LINE_HEIGHT_FACTOR,
        }
    }
}

fn is_zero_width(ch: char) -> bool {
    matches!(ch, '\n' | '\u{200B}'..='\u{200D}' | '\u{FEFF}' | '\u{0300}'..='\u{036F}')
}

impl TextMeasurer for MonoMeasurer {
    fn advance(&self, ch: char, style: &ComputedStyle) -> f32 {
        if is_zero_width(ch) {
            0.0
        } else {
            style.font_size * self.advance_ratio
        }
    }

    fn line_height(&self, style: &ComputedStyle) -> f32 {
        match style.line_height {
            LineHeight::Normal => style.font_size * self.normal_line_height,
            _ => style.line_height_px(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_scales_with_font_size() {
        let m = MonoMeasurer {
            advance_ratio: 0.5,
            normal_line_height: 1.5,
        };
        let style = ComputedStyle {
            font_size: 20.0,
            ..ComputedStyle::initial()
        };
        assert_eq!(m.advance('W', &style), 10.0);
        assert_eq!(m.advance('\u{301}', &style), 0.0);
        assert_eq!(m.line_height(&style), 30.0);
    }
}
