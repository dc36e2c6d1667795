use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A rendering scene: markup plus the few knobs the simulated renderer needs.
///
/// ```toml
/// markup = '<div id="editor"><span data-text>Hi there</span></div>'
/// stylesheet = "span { font: 16px sans-serif }"
/// container = "editor"
/// origin = [8.0, 40.0]
/// width = 200.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub markup: String,
    #[serde(default)]
    pub stylesheet: String,
    /// `id` attribute of the container element. Defaults to the first
    /// element in the document.
    #[serde(default)]
    pub container: Option<String>,
    /// Viewport position of the container's border box.
    #[serde(default)]
    pub origin: [f32; 2],
    /// Content-box width available for line breaking.
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default)]
    pub padding: f32,
    /// Advance of every visible character as a fraction of its font size.
    #[serde(default = "default_advance_ratio")]
    pub advance_ratio: f32,
    /// `line-height: normal` as a multiple of the font size.
    #[serde(default = "default_normal_line_height")]
    pub normal_line_height: f32,
    #[serde(default)]
    pub caret: CaretConfig,
}

/// Which caret-from-point primitives the simulated host exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaretConfig {
    pub position_from_point: bool,
    pub range_from_point: bool,
}

impl Default for CaretConfig {
    fn default() -> Self {
        Self {
            position_from_point: true,
            range_from_point: true,
        }
    }
}

fn default_width() -> f32 {
    300.0
}

fn default_advance_ratio() -> f32 {
    0.5
}

fn default_normal_line_height() -> f32 {
    css::NORMAL_LINE_HEIGHT_FACTOR
}

impl Scene {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            stylesheet: String::new(),
            container: None,
            origin: [0.0, 0.0],
            width: default_width(),
            padding: 0.0,
            advance_ratio: default_advance_ratio(),
            normal_line_height: default_normal_line_height(),
            caret: CaretConfig::default(),
        }
    }

    pub fn from_toml_str(input: &str) -> Result<Self, SceneError> {
        let scene: Scene = toml::from_str(input).map_err(SceneError::Toml)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let input = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    pub(crate) fn validate(&self) -> Result<(), SceneError> {
        let positive = |name: &'static str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SceneError::InvalidGeometry { field: name, value: v })
            }
        };
        positive("width", self.width)?;
        positive("advance_ratio", self.advance_ratio)?;
        positive("normal_line_height", self.normal_line_height)?;
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(SceneError::InvalidGeometry {
                field: "padding",
                value: self.padding,
            });
        }
        if !self.origin.iter().all(|v| v.is_finite()) {
            return Err(SceneError::InvalidGeometry {
                field: "origin",
                value: f32::NAN,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum SceneError {
    Io { path: PathBuf, source: std::io::Error },
    Toml(toml::de::Error),
    MissingContainer { id: Option<String> },
    InvalidGeometry { field: &'static str, value: f32 },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io { path, source } => {
                write!(f, "failed to read scene {}: {source}", path.display())
            }
            SceneError::Toml(err) => write!(f, "invalid scene: {err}"),
            SceneError::MissingContainer { id: Some(id) } => {
                write!(f, "no element with id \"{id}\" in scene markup")
            }
            SceneError::MissingContainer { id: None } => {
                f.write_str("scene markup contains no element")
            }
            SceneError::InvalidGeometry { field, value } => {
                write!(f, "scene {field} must be a finite positive number, got {value}")
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io { source, .. } => Some(source),
            SceneError::Toml(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_omitted_fields() {
        let scene = Scene::from_toml_str("markup = '<div><span data-text>x</span></div>'")
            .expect("valid scene");
        assert_eq!(scene.width, 300.0);
        assert_eq!(scene.origin, [0.0, 0.0]);
        assert_eq!(scene.caret, CaretConfig::default());
        assert_eq!(scene.normal_line_height, 1.2);
    }

    #[test]
    fn caret_primitives_can_be_disabled() {
        let scene = Scene::from_toml_str(
            "markup = '<div></div>'\n[caret]\nposition_from_point = false\n",
        )
        .expect("valid scene");
        assert!(!scene.caret.position_from_point);
        assert!(scene.caret.range_from_point);
    }

    #[test]
    fn rejects_bad_geometry_and_unknown_keys() {
        let err = Scene::from_toml_str("markup = ''\nwidth = 0.0").expect_err("zero width");
        assert!(matches!(err, SceneError::InvalidGeometry { field: "width", .. }));

        let err = Scene::from_toml_str("markup = ''\nwidht = 10.0").expect_err("typo");
        assert!(matches!(err, SceneError::Toml(_)));
        assert!(err.to_string().starts_with("invalid scene"));
    }
}
