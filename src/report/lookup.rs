//! Lookup tables used to annotate summaries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::FilterError;
use crate::Result;

/// Country reported for a submitter missing from the centers table.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Submitter name used when the submitter cell is a placeholder.
pub const NOT_PROVIDED: &str = "Not provided";

/// Immutable lookups passed to [`Summary::build`](super::Summary::build).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTables {
    /// Submitter name to country
    pub submitter_country: BTreeMap<String, String>,
    /// Gene symbol to OMIM entry id
    pub gene_omim: BTreeMap<String, String>,
}

/// OMIM ids appear both as strings and as bare numbers in the wild.
#[derive(Deserialize)]
#[serde(untagged)]
enum OmimId {
    Text(String),
    Number(u64),
}

impl OmimId {
    fn into_string(self) -> String {
        match self {
            OmimId::Text(s) => s,
            OmimId::Number(n) => n.to_string(),
        }
    }
}

impl LookupTables {
    /// Empty tables: every submitter maps to [`UNKNOWN_COUNTRY`] and no gene
    /// has an OMIM id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the submitter table.
    pub fn with_submitter_country(mut self, table: BTreeMap<String, String>) -> Self {
        self.submitter_country = table;
        self
    }

    /// Replace the OMIM table.
    pub fn with_gene_omim(mut self, table: BTreeMap<String, String>) -> Self {
        self.gene_omim = table;
        self
    }

    /// Parse a `{"submitter": "country", ...}` JSON object.
    pub fn parse_centers(content: &str) -> Result<BTreeMap<String, String>> {
        serde_json::from_str(content)
            .map_err(|e| FilterError::config(format!("invalid centers table: {}", e)))
    }

    /// Parse a `{"GENE": "omim id", ...}` JSON object.
    pub fn parse_omim(content: &str) -> Result<BTreeMap<String, String>> {
        let raw: BTreeMap<String, OmimId> = serde_json::from_str(content)
            .map_err(|e| FilterError::config(format!("invalid OMIM table: {}", e)))?;
        Ok(raw.into_iter().map(|(k, v)| (k, v.into_string())).collect())
    }

    /// Load either table from disk; `None` paths leave that table empty.
    pub fn load(centers: Option<&Path>, omim: Option<&Path>) -> Result<Self> {
        let mut tables = Self::new();
        if let Some(path) = centers {
            tables.submitter_country = Self::parse_centers(&read(path)?)?;
            tracing::debug!(entries = tables.submitter_country.len(), "loaded centers table");
        }
        if let Some(path) = omim {
            tables.gene_omim = Self::parse_omim(&read(path)?)?;
            tracing::debug!(entries = tables.gene_omim.len(), "loaded OMIM table");
        }
        Ok(tables)
    }

    /// Country for a normalized submitter name.
    pub fn country_of(&self, submitter: &str) -> &str {
        self.submitter_country
            .get(submitter)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_COUNTRY)
    }

    /// OMIM id for a gene, if known.
    pub fn omim_of(&self, gene: &str) -> Option<&str> {
        self.gene_omim.get(gene).map(String::as_str)
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| FilterError::Io {
        msg: format!("{}: {}", path.display(), e),
    })
}

/// Normalize a submitter cell: placeholders become [`NOT_PROVIDED`].
pub fn submitter_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "N/A" || trimmed == "NA" {
        NOT_PROVIDED
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_centers() {
        let table = LookupTables::parse_centers(
            r#"{"Invitae": "USA", "Centogene AG - the Rare Disease Company": "Germany"}"#,
        )
        .unwrap();
        let tables = LookupTables::new().with_submitter_country(table);
        assert_eq!(tables.country_of("Invitae"), "USA");
        assert_eq!(tables.country_of("GeneDx"), UNKNOWN_COUNTRY);
    }

    #[test]
    fn test_parse_omim_mixed_ids() {
        let table = LookupTables::parse_omim(r#"{"COPA": "601924", "TBX4": 601719}"#).unwrap();
        let tables = LookupTables::new().with_gene_omim(table);
        assert_eq!(tables.omim_of("COPA"), Some("601924"));
        assert_eq!(tables.omim_of("TBX4"), Some("601719"));
        assert_eq!(tables.omim_of("FOXF1"), None);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(LookupTables::parse_centers("[1, 2]").is_err());
        assert!(LookupTables::parse_omim(r#"{"COPA": [1]}"#).is_err());
    }

    #[test]
    fn test_submitter_name() {
        assert_eq!(submitter_name(""), NOT_PROVIDED);
        assert_eq!(submitter_name("N/A"), NOT_PROVIDED);
        assert_eq!(submitter_name("  GeneDx "), "GeneDx");
    }

    #[test]
    fn test_load_without_paths() {
        assert_eq!(LookupTables::load(None, None).unwrap(), LookupTables::default());
    }
}
