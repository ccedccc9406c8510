use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::data::bucket::{DifficultyRange, PositionRange};

/// Environment variable pointing at an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "KEYWORD_GAP_CONFIG";

// ---------------------------------------------------------------------------
// Analysis configuration
// ---------------------------------------------------------------------------

/// Settings shared by the loader and the initial filter selections.
///
/// Every field is optional in the JSON file; absent fields keep their
/// defaults:
///
/// ```json
/// {
///   "delimiter": ";",
///   "column_renames": { "Search Volume": "Volume" },
///   "default_position_ranges": ["1-3", "4-10"],
///   "default_kd_ranges": ["0-15", "16-25"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Field separator of both input and exported files.
    pub delimiter: char,
    /// Source column name → canonical column name.
    pub column_renames: BTreeMap<String, String>,
    /// Position ranges selected when the application starts.
    pub default_position_ranges: Vec<PositionRange>,
    /// Keyword difficulty ranges selected when the application starts.
    pub default_kd_ranges: Vec<DifficultyRange>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let column_renames = [
            ("Search Volume", "Volume"),
            ("CPC", "CPC (USD)"),
            ("SERP Features by Keyword", "SERP Features"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        Self {
            delimiter: ';',
            column_renames,
            default_position_ranges: vec![PositionRange::Top3, PositionRange::Top10],
            default_kd_ranges: vec![DifficultyRange::VeryEasy, DifficultyRange::Easy],
        }
    }
}

impl AnalysisConfig {
    /// Load from `$KEYWORD_GAP_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(text).context("parsing config JSON")?;
        if !config.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got '{}'", config.delimiter);
        }
        Ok(config)
    }

    /// The delimiter as the byte the CSV reader and writer expect.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b';'
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json(r#"{ "delimiter": "," }"#).unwrap();
        assert_eq!(config.delimiter_byte(), b',');
        assert_eq!(config.column_renames.get("CPC").map(String::as_str), Some("CPC (USD)"));
        assert_eq!(
            config.default_position_ranges,
            vec![PositionRange::Top3, PositionRange::Top10]
        );
    }

    #[test]
    fn ranges_deserialize_from_labels() {
        let config = AnalysisConfig::from_json(
            r#"{ "default_position_ranges": ["51-100", "Other"], "default_kd_ranges": [">65"] }"#,
        )
        .unwrap();
        assert_eq!(
            config.default_position_ranges,
            vec![PositionRange::Top100, PositionRange::Other]
        );
        assert_eq!(config.default_kd_ranges, vec![DifficultyRange::VeryHard]);
    }

    #[test]
    fn rejects_unknown_labels_and_wide_delimiters() {
        assert!(AnalysisConfig::from_json(r#"{ "default_kd_ranges": ["0-10"] }"#).is_err());
        assert!(AnalysisConfig::from_json(r#"{ "delimiter": "§" }"#).is_err());
    }
}
