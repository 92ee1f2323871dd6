//! Configuration file support for ferro-clinvar.
//!
//! This module loads the filter settings from a JSON file and merges them
//! with command-line overrides into a [`FilterConfig`].
//!
//! # Example Configuration
//!
//! ```json
//! {
//!   "size_limit": 500000,
//!   "exclude_keywords": ["22q11", "microdeletion", "16p11"],
//!   "accepted_years": [2022, 2023, 2024, 2025],
//!   "keyword_case_sensitive": true
//! }
//! ```
//!
//! Every key is optional; missing keys take the defaults of
//! [`FilterConfig::default`].
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `config/filtering.json` in current directory
//! 2. `~/.config/ferro/filtering.json`
//!
//! CLI flags take precedence over config file settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FilterError;
use crate::filter::{FilterConfig, KeywordMatch};
use crate::Result;

/// Filter settings as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSettings {
    /// Maximum estimated event size in base pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<u64>,
    /// Phenotype keywords, in match order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_keywords: Option<Vec<String>>,
    /// Accepted submission years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_years: Option<Vec<i32>>,
    /// Whether keywords match case-sensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_case_sensitive: Option<bool>,
}

impl FilterSettings {
    /// Load settings from the default locations.
    ///
    /// Returns `None` when no config file exists; a file that exists but
    /// cannot be read or parsed is an error.
    pub fn load() -> Result<Option<Self>> {
        for path in Self::search_paths() {
            if path.exists() {
                tracing::info!(path = %path.display(), "loading filter settings");
                return Self::load_from_path(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Candidate config file paths, in search order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config").join("filtering.json")];
        if let Some(home) = dirs_home() {
            paths.push(home.join(".config").join("ferro").join("filtering.json"));
        }
        paths
    }

    /// Load settings from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FilterError::Io {
            msg: format!("{}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    /// Parse settings from JSON content.
    pub fn parse(content: &str) -> Result<Self> {
        let settings: FilterSettings = serde_json::from_str(content)
            .map_err(|e| FilterError::config(format!("invalid filter settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if let Some(keywords) = &self.exclude_keywords {
            if keywords.iter().any(|k| k.is_empty()) {
                // An empty keyword is contained in every phenotype.
                return Err(FilterError::config("exclude_keywords must not contain empty strings"));
            }
        }
        if let Some(years) = &self.accepted_years {
            if years.is_empty() {
                return Err(FilterError::config("accepted_years must not be empty"));
            }
        }
        Ok(())
    }

    /// Convert these settings to a [`FilterConfig`].
    pub fn to_filter_config(&self) -> FilterConfig {
        let mut config = FilterConfig::default();
        if let Some(limit) = self.size_limit {
            config.size_threshold_bp = limit;
        }
        if let Some(keywords) = &self.exclude_keywords {
            config.excluded_phenotype_keywords = keywords.clone();
        }
        if let Some(years) = &self.accepted_years {
            config.accepted_years = years.iter().copied().collect();
        }
        if let Some(case_sensitive) = self.keyword_case_sensitive {
            config.keyword_match = if case_sensitive {
                KeywordMatch::CaseSensitive
            } else {
                KeywordMatch::CaseInsensitive
            };
        }
        config
    }

    /// Merge these settings with CLI arguments.
    /// CLI arguments take precedence; empty slices leave the file values.
    pub fn merge_with_cli(
        &self,
        cli_size_limit: Option<u64>,
        cli_keywords: &[String],
        cli_years: &[i32],
    ) -> FilterConfig {
        let mut config = self.to_filter_config();

        if let Some(limit) = cli_size_limit {
            config.size_threshold_bp = limit;
        }
        if !cli_keywords.is_empty() {
            config.excluded_phenotype_keywords = cli_keywords.to_vec();
        }
        if !cli_years.is_empty() {
            config.accepted_years = cli_years.iter().copied().collect();
        }

        config
    }

    /// Settings equal to the built-in defaults, spelled out.
    pub fn sample() -> Self {
        let defaults = FilterConfig::default();
        Self {
            size_limit: Some(defaults.size_threshold_bp),
            exclude_keywords: Some(defaults.excluded_phenotype_keywords),
            accepted_years: Some(defaults.accepted_years.into_iter().collect()),
            keyword_case_sensitive: Some(true),
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
