//! Submission rows as produced by the ClinVar extraction step.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::types::{ReviewStatus, Significance};

/// Column headers of a submission table, in output order.
pub const RECORD_COLUMNS: [&str; 8] = [
    "Gene",
    "Phenotype",
    "Classification",
    "Variant (HGVS)",
    "Submission Date",
    "Submitter",
    "Consequence",
    "Review Status",
];

/// Cell values that mean "no value" in exported tables.
const PLACEHOLDERS: [&str; 5] = ["", "N/A", "NA", "nan", "NaT"];

/// Date-only layouts accepted for the submission date.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%b %d, %Y", "%d %b %Y", "%Y%m%d"];

/// Date-time layouts accepted for the submission date.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// One ClinVar submission for one phenotype.
///
/// A submission that lists several traits is flattened into one row per
/// trait upstream, so the same variant may appear several times with
/// different phenotypes.
///
/// All fields are kept as the raw text read from the table; missing columns
/// and empty cells are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct VariantRecord {
    /// Gene symbol the submission was retrieved for.
    #[serde(rename = "Gene", default)]
    pub gene: String,
    /// Condition name.
    #[serde(rename = "Phenotype", default)]
    pub phenotype: String,
    /// Germline classification text.
    #[serde(rename = "Classification", default)]
    pub classification: String,
    /// Variant name, usually an HGVS expression.
    #[serde(rename = "Variant (HGVS)", default)]
    pub variant_expression: String,
    /// Submission date, unparsed.
    #[serde(rename = "Submission Date", default)]
    pub submission_date: String,
    /// Submitting organization.
    #[serde(rename = "Submitter", default)]
    pub submitter: String,
    /// Molecular consequence.
    #[serde(rename = "Consequence", default)]
    pub consequence: String,
    /// Review status text.
    #[serde(rename = "Review Status", default)]
    pub review_status: String,
}

impl VariantRecord {
    /// Create a record with a gene and variant name.
    pub fn new(gene: impl Into<String>, variant_expression: impl Into<String>) -> Self {
        Self {
            gene: gene.into(),
            variant_expression: variant_expression.into(),
            ..Default::default()
        }
    }

    /// Set the phenotype.
    pub fn with_phenotype(mut self, phenotype: impl Into<String>) -> Self {
        self.phenotype = phenotype.into();
        self
    }

    /// Set the raw submission date.
    pub fn with_submission_date(mut self, date: impl Into<String>) -> Self {
        self.submission_date = date.into();
        self
    }

    /// Set the submitter.
    pub fn with_submitter(mut self, submitter: impl Into<String>) -> Self {
        self.submitter = submitter.into();
        self
    }

    /// Set the classification text.
    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = classification.into();
        self
    }

    /// Parsed submission date, or `None` if missing or unparseable.
    pub fn submission_date(&self) -> Option<NaiveDate> {
        parse_submission_date(&self.submission_date)
    }

    /// Year of the submission date.
    pub fn submission_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.submission_date().map(|d| d.year())
    }

    /// Typed classification.
    pub fn significance(&self) -> Significance {
        self.classification.parse().unwrap_or_default()
    }

    /// Typed review status.
    pub fn review(&self) -> ReviewStatus {
        self.review_status.parse().unwrap_or_default()
    }

    /// Field values in [`RECORD_COLUMNS`] order.
    pub fn fields(&self) -> [&str; 8] {
        [
            &self.gene,
            &self.phenotype,
            &self.classification,
            &self.variant_expression,
            &self.submission_date,
            &self.submitter,
            &self.consequence,
            &self.review_status,
        ]
    }
}

/// Parse a submission date in any of the layouts seen in ClinVar exports.
///
/// Returns `None` for placeholders and anything unparseable.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ferro_clinvar::clinvar::parse_submission_date;
///
/// let expected = NaiveDate::from_ymd_opt(2023, 5, 12);
/// assert_eq!(parse_submission_date("2023-05-12"), expected);
/// assert_eq!(parse_submission_date("May 12, 2023"), expected);
/// assert_eq!(parse_submission_date("2023-05-12T08:30:00Z"), expected);
/// assert_eq!(parse_submission_date("N/A"), None);
/// ```
pub fn parse_submission_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if PLACEHOLDERS.contains(&s) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}
