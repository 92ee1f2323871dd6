//! Filter configuration options

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default maximum estimated event size in base pairs.
///
/// Separates point variants and small indels, including multi-exon
/// deletions within one gene, from multi-gene structural events.
pub const DEFAULT_SIZE_THRESHOLD_BP: u64 = 500_000;

/// Default phenotype keywords that mark contiguous-gene syndromes.
pub const DEFAULT_EXCLUDED_KEYWORDS: [&str; 6] = [
    "22q11",
    "microdeletion",
    "microduplication",
    "deletion syndrome",
    "duplication syndrome",
    "16p11",
];

/// Default accepted submission years.
pub const DEFAULT_ACCEPTED_YEARS: std::ops::RangeInclusive<i32> = 2022..=2025;

/// How phenotype keywords are compared against the phenotype text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KeywordMatch {
    /// Raw substring containment (default)
    #[default]
    CaseSensitive,
    /// Substring containment after lowercasing both sides
    CaseInsensitive,
}

impl KeywordMatch {
    /// Whether `keyword` occurs in `text` under this matching mode.
    pub fn contains(&self, text: &str, keyword: &str) -> bool {
        match self {
            KeywordMatch::CaseSensitive => text.contains(keyword),
            KeywordMatch::CaseInsensitive => {
                text.to_lowercase().contains(&keyword.to_lowercase())
            }
        }
    }
}

impl std::fmt::Display for KeywordMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeywordMatch::CaseSensitive => write!(f, "case-sensitive"),
            KeywordMatch::CaseInsensitive => write!(f, "case-insensitive"),
        }
    }
}

impl std::str::FromStr for KeywordMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "case-sensitive" | "sensitive" | "exact" => Ok(KeywordMatch::CaseSensitive),
            "case-insensitive" | "insensitive" | "ignore-case" => {
                Ok(KeywordMatch::CaseInsensitive)
            }
            _ => Err(format!("Invalid keyword match mode: {}", s)),
        }
    }
}

/// Configuration for record classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Records with an estimated size strictly above this are rejected
    pub size_threshold_bp: u64,

    /// Phenotype keywords, checked in order; the first match is reported
    pub excluded_phenotype_keywords: Vec<String>,

    /// Keyword comparison mode
    pub keyword_match: KeywordMatch,

    /// Submission years that are retained
    pub accepted_years: BTreeSet<i32>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            size_threshold_bp: DEFAULT_SIZE_THRESHOLD_BP,
            excluded_phenotype_keywords: DEFAULT_EXCLUDED_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            keyword_match: KeywordMatch::default(),
            accepted_years: DEFAULT_ACCEPTED_YEARS.collect(),
        }
    }
}

impl FilterConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size threshold
    pub fn with_size_threshold(mut self, threshold_bp: u64) -> Self {
        self.size_threshold_bp = threshold_bp;
        self
    }

    /// Replace the excluded phenotype keywords
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_phenotype_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the keyword comparison mode
    pub fn with_keyword_match(mut self, mode: KeywordMatch) -> Self {
        self.keyword_match = mode;
        self
    }

    /// Replace the accepted submission years
    pub fn with_years<I: IntoIterator<Item = i32>>(mut self, years: I) -> Self {
        self.accepted_years = years.into_iter().collect();
        self
    }

    /// Whether a submission year is retained
    pub fn accepts_year(&self, year: i32) -> bool {
        self.accepted_years.contains(&year)
    }

    /// First excluded keyword found in `phenotype`, in configured order
    pub fn matching_keyword(&self, phenotype: &str) -> Option<&str> {
        self.excluded_phenotype_keywords
            .iter()
            .find(|kw| self.keyword_match.contains(phenotype, kw))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FilterConfig::default();
        assert_eq!(config.size_threshold_bp, 500_000);
        assert_eq!(config.excluded_phenotype_keywords.len(), 6);
        assert_eq!(config.excluded_phenotype_keywords[0], "22q11");
        assert_eq!(
            config.accepted_years.iter().copied().collect::<Vec<_>>(),
            vec![2022, 2023, 2024, 2025]
        );
        assert_eq!(config.keyword_match, KeywordMatch::CaseSensitive);
    }

    #[test]
    fn test_builder() {
        let config = FilterConfig::new()
            .with_size_threshold(1_000)
            .with_keywords(["16p11"])
            .with_years([2020])
            .with_keyword_match(KeywordMatch::CaseInsensitive);
        assert_eq!(config.size_threshold_bp, 1_000);
        assert_eq!(config.excluded_phenotype_keywords, vec!["16p11"]);
        assert!(config.accepts_year(2020));
        assert!(!config.accepts_year(2023));
        assert_eq!(config.keyword_match, KeywordMatch::CaseInsensitive);
    }

    #[test]
    fn test_matching_keyword_order() {
        let config = FilterConfig::new().with_keywords(["deletion syndrome", "22q11"]);
        // Both keywords occur; the first configured one is reported.
        assert_eq!(
            config.matching_keyword("22q11.2 deletion syndrome"),
            Some("deletion syndrome")
        );
        assert_eq!(config.matching_keyword("Cardiomyopathy"), None);
    }

    #[test]
    fn test_keyword_case_modes() {
        assert!(!KeywordMatch::CaseSensitive.contains("Microdeletion 1q21.1", "microdeletion"));
        assert!(KeywordMatch::CaseInsensitive.contains("Microdeletion 1q21.1", "microdeletion"));
        assert!(KeywordMatch::CaseSensitive.contains("16p11.2 microdeletion", "microdeletion"));
    }

    #[test]
    fn test_keyword_match_from_str() {
        assert_eq!(
            "case-insensitive".parse::<KeywordMatch>().unwrap(),
            KeywordMatch::CaseInsensitive
        );
        assert_eq!("exact".parse::<KeywordMatch>().unwrap(), KeywordMatch::CaseSensitive);
        assert!("fuzzy".parse::<KeywordMatch>().is_err());
        assert_eq!(KeywordMatch::CaseInsensitive.to_string(), "case-insensitive");
    }
}
