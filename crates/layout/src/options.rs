use serde::{Deserialize, Serialize};

/// Distance in px inside a line box at which run-mode caret probes are placed.
pub const CARET_PROBE_INSET: f32 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Measure every code point, then coalesce same-row neighbours. Correct at
    /// wrap boundaries; does not need caret hit testing.
    #[default]
    Character,
    /// One run per span line box, sliced by caret hit testing. Cheaper, but
    /// drops a line box whenever its edges resolve ambiguously.
    Run,
}

impl From<bool> for Granularity {
    fn from(character_level: bool) -> Self {
        if character_level {
            Granularity::Character
        } else {
            Granularity::Run
        }
    }
}

/// How character mode reduces a code point's range rects to one box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubRectPolicy {
    /// First range rect with non-zero width, else the range bounding rect.
    #[default]
    FirstNonEmpty,
    /// Always the range bounding rect.
    BoundingRect,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub granularity: Granularity,
    pub sub_rect: SubRectPolicy,
}

impl ExtractOptions {
    pub fn character() -> Self {
        Self::from(true)
    }

    pub fn run() -> Self {
        Self::from(false)
    }

    pub fn with_sub_rect(mut self, policy: SubRectPolicy) -> Self {
        self.sub_rect = policy;
        self
    }
}

impl From<bool> for ExtractOptions {
    fn from(character_level: bool) -> Self {
        Self {
            granularity: Granularity::from(character_level),
            ..Self::default()
        }
    }
}

impl From<Granularity> for ExtractOptions {
    fn from(granularity: Granularity) -> Self {
        Self {
            granularity,
            ..Self::default()
        }
    }
}
