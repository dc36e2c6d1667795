//! Fixture loading and snapshot formatting for extraction tests.
//!
//! A fixture is a TOML file with a `[scene]` table (see [`sim_host::Scene`])
//! and an `[expect]` table holding snapshot lines per granularity:
//!
//! ```toml
//! [scene]
//! markup = '<div><span data-text>Hi there</span></div>'
//! stylesheet = "span { font: 16px/20px sans-serif }"
//!
//! [expect]
//! character = ['"Hi" 0,0 16,20 16px / 20px sans-serif', '"there" 24,0 64,20 16px / 20px sans-serif']
//! run = ['"Hi there" 0,0 64,20 16px / 20px sans-serif']
//! ```

use layout::{Diagnostic, ExtractOptions, Granularity, Layout, TextRun, extract_layout};
use serde::Deserialize;
use sim_host::{Scene, SimHost};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Expectations {
    #[serde(default)]
    pub character: Option<Vec<String>>,
    #[serde(default)]
    pub run: Option<Vec<String>>,
    /// `Debug` renderings of the diagnostics reported in character mode.
    #[serde(default)]
    pub character_diagnostics: Option<Vec<String>>,
    #[serde(default)]
    pub run_diagnostics: Option<Vec<String>>,
}

impl Expectations {
    pub fn lines(&self, granularity: Granularity) -> Option<&[String]> {
        match granularity {
            Granularity::Character => self.character.as_deref(),
            Granularity::Run => self.run.as_deref(),
        }
    }

    pub fn diagnostics(&self, granularity: Granularity) -> Option<&[String]> {
        match granularity {
            Granularity::Character => self.character_diagnostics.as_deref(),
            Granularity::Run => self.run_diagnostics.as_deref(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureFile {
    scene: Scene,
    #[serde(default)]
    expect: Expectations,
}

#[derive(Clone, Debug)]
pub struct Fixture {
    pub name: String,
    pub path: PathBuf,
    pub scene: Scene,
    pub expect: Expectations,
}

impl Fixture {
    pub fn host(&self) -> SimHost {
        SimHost::new(&self.scene)
            .unwrap_or_else(|err| panic!("fixture '{}' has an invalid scene: {err}", self.name))
    }

    /// Extract with `granularity`, returning the layout and the diagnostics
    /// reported along the way.
    pub fn extract(&self, granularity: Granularity) -> (Layout, Vec<Diagnostic>) {
        let host = self.host();
        let mut diagnostics = Vec::new();
        let layout = extract_layout(
            &host,
            host.container(),
            ExtractOptions::from(granularity),
            &mut diagnostics,
        );
        (layout, diagnostics)
    }
}

pub fn load_fixture(path: &Path) -> Result<Fixture, String> {
    let input = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let file: FixtureFile =
        toml::from_str(&input).map_err(|err| format!("invalid fixture {}: {err}", path.display()))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Fixture {
        name,
        path: path.to_path_buf(),
        scene: file.scene,
        expect: file.expect,
    })
}

/// Every `*.toml` fixture in `dir`, sorted by file name.
pub fn load_fixtures(dir: &Path) -> Vec<Fixture> {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|err| panic!("failed to read {}: {err}", dir.display()));
    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    paths
        .iter()
        .map(|path| load_fixture(path).unwrap_or_else(|err| panic!("{err}")))
        .collect()
}

/// Restricts fixture runs to names containing `SPANLAYOUT_FIXTURE`, when set.
pub struct FixtureFilter {
    needle: Option<String>,
}

impl FixtureFilter {
    pub fn from_env() -> Self {
        let needle = std::env::var("SPANLAYOUT_FIXTURE")
            .ok()
            .filter(|v| !v.trim().is_empty());
        Self { needle }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.needle.as_deref().is_none_or(|n| name.contains(n))
    }
}

/// `"text" left,top right,bottom font`, with `-` for an absent font.
pub fn snapshot_line(run: &TextRun) -> String {
    format!(
        "\"{}\" {},{} {},{} {}",
        escape_text(&run.text),
        run.left,
        run.top,
        run.right,
        run.bottom,
        run.font.as_deref().unwrap_or("-")
    )
}

pub fn snapshot_lines(layout: &Layout) -> Vec<String> {
    layout.lines().iter().map(snapshot_line).collect()
}

pub fn diagnostic_lines(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| format!("{d:?}")).collect()
}

/// Pretty JSON for failure messages.
pub fn layout_json(layout: &Layout) -> String {
    serde_json::to_string_pretty(layout).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{a0}' => out.push_str("\\u{A0}"),
            ch if ch < ' ' => {
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let max = expected.len().max(actual.len());
    let missing = "<missing>";
    let line = |lines: &[String], i: usize| lines.get(i).map_or(missing, String::as_str).to_owned();
    let mut out = String::new();

    let mismatch = (0..max).find(|&i| line(expected, i) != line(actual, i));
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for idx in start..end {
            let marker = if idx == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {}", idx + 1, line(expected, idx));
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {}", idx + 1, line(actual, idx));
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_whitespace_and_quotes() {
        assert_eq!(escape_text("a\"b\tc\u{a0}"), "a\\\"b\\tc\\u{A0}");
        assert_eq!(escape_text("\u{1}"), "\\u{01}");
    }

    #[test]
    fn diff_points_at_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["a".to_string(), "c".to_string(), "d".to_string()];
        let diff = diff_lines(&expected, &actual);
        assert!(diff.starts_with("first mismatch at line 2"), "{diff}");
        assert!(diff.contains(">    2  expected: b"), "{diff}");
        assert!(diff.contains("   3  expected: <missing>"), "{diff}");
        assert!(diff.ends_with("expected 2 lines, actual 3 lines\n"), "{diff}");
    }
}
