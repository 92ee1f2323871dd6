//! Rule-based classification of ClinVar submissions.
//!
//! Each record gets a size estimate and then passes through the rules in
//! [`RULES`] order: submission year, estimated size, phenotype keyword. The
//! first rule that fires rejects the record with a [`RejectionReason`]; a
//! record no rule rejects is kept.
//!
//! Classification is a pure function of the record and the configuration and
//! never fails.
//!
//! # Example
//!
//! ```
//! use ferro_clinvar::clinvar::VariantRecord;
//! use ferro_clinvar::filter::{classify, FilterConfig, RejectionKind};
//!
//! let config = FilterConfig::default();
//!
//! let record = VariantRecord::new("TBX4", "NC_000022.11:g.18648855_21800471del")
//!     .with_phenotype("Pulmonary hypertension")
//!     .with_submission_date("2023-02-01");
//!
//! let result = classify(&record, &config);
//! assert!(!result.kept());
//! assert_eq!(result.estimated_size_bp, 3_151_616);
//! assert_eq!(result.rejection_kind(), Some(RejectionKind::LargeGenomicEvent));
//! ```

mod config;
mod rules;

pub use config::{
    FilterConfig, KeywordMatch, DEFAULT_ACCEPTED_YEARS, DEFAULT_EXCLUDED_KEYWORDS,
    DEFAULT_SIZE_THRESHOLD_BP,
};
pub use rules::{RejectionKind, RejectionReason, Rule, RULES};

use serde::{Deserialize, Serialize};

use crate::clinvar::VariantRecord;
use crate::size::estimate_size;

/// Outcome of classifying one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Estimated event size in base pairs, present whatever the outcome.
    pub estimated_size_bp: u64,
    /// Why the record was rejected; `None` when kept.
    pub rejection_reason: Option<RejectionReason>,
}

impl ClassificationResult {
    /// Whether the record is kept.
    pub fn kept(&self) -> bool {
        self.rejection_reason.is_none()
    }

    /// Category of the rejection, if rejected.
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        self.rejection_reason.as_ref().map(RejectionReason::kind)
    }
}

/// A record joined with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// The input record, unchanged.
    pub record: VariantRecord,
    /// Its classification.
    pub result: ClassificationResult,
}

impl ClassifiedRecord {
    /// Classify `record` and keep both together.
    pub fn new(record: VariantRecord, config: &FilterConfig) -> Self {
        let result = classify(&record, config);
        Self { record, result }
    }
}

/// Classify a single record.
///
/// Rules are evaluated in [`RULES`] order and evaluation stops at the first
/// rejection. A record without a parseable submission date fails the date
/// rule; batch processing sets such records aside before calling this.
pub fn classify(record: &VariantRecord, config: &FilterConfig) -> ClassificationResult {
    let estimated_size_bp = estimate_size(&record.variant_expression);
    let rejection_reason = RULES
        .iter()
        .find_map(|rule| rule.check(record, estimated_size_bp, config));

    ClassificationResult {
        estimated_size_bp,
        rejection_reason,
    }
}
