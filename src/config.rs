use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::Result;
use crate::extract::DEFAULT_DAY_BLOCK_CAP;

/// Runtime options. Every field carries a default so the tool runs
/// without a config file at all.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Knobs for the text-extraction heuristics.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Which match wins when a day block holds several candidate totals
    /// lines (sub-totals, adjacent day panels).
    #[serde(default)]
    pub tie_break: TieBreak,
    /// Upper bound on a day block, in bytes, for when no later day label
    /// terminates it.
    #[serde(default = "default_day_block_cap")]
    pub day_block_cap: usize,
}

fn default_day_block_cap() -> usize {
    DEFAULT_DAY_BLOCK_CAP
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            tie_break: TieBreak::default(),
            day_block_cap: DEFAULT_DAY_BLOCK_CAP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    #[default]
    First,
    Last,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub date_format: DateFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            date_format: DateFormat::default(),
        }
    }
}

/// How the per-row calendar date is rendered in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// YYYY-MM-DD
    #[default]
    Iso,
    /// DD/MM/YYYY
    Uk,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let cfg: Config = toml::from_str(
            r#"
            [extraction]
            tie_break = "last"
            day_block_cap = 800

            [output]
            date_format = "uk"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.extraction.tie_break, TieBreak::Last);
        assert_eq!(cfg.extraction.day_block_cap, 800);
        assert_eq!(cfg.output.date_format, DateFormat::Uk);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.extraction.tie_break, TieBreak::First);
        assert_eq!(cfg.extraction.day_block_cap, DEFAULT_DAY_BLOCK_CAP);
        assert_eq!(cfg.output.date_format, DateFormat::Iso);
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        let cfg: Config = toml::from_str("[extraction]\ntie_break = \"last\"\n").unwrap();
        assert_eq!(cfg.extraction.tie_break, TieBreak::Last);
        assert_eq!(cfg.extraction.day_block_cap, DEFAULT_DAY_BLOCK_CAP);
    }

    #[test]
    fn test_unknown_tie_break_rejected() {
        let result: std::result::Result<Config, toml::de::Error> =
            toml::from_str("[extraction]\ntie_break = \"middle\"\n");
        assert!(result.is_err());
    }
}
