//! ClinVar submission records.
//!
//! This module provides the input side of the filter: one [`VariantRecord`]
//! per (variant, phenotype) pair, exactly as extracted from ClinVar, plus
//! typed views of the classification and review-status columns.
//!
//! # Examples
//!
//! ```
//! use ferro_clinvar::clinvar::{Significance, VariantRecord};
//!
//! let record = VariantRecord::new("ANKLE2", "NM_015114.3(ANKLE2):c.1421-1G>C")
//!     .with_phenotype("Microcephaly 16, primary, autosomal recessive")
//!     .with_submission_date("2022-11-03")
//!     .with_classification("Pathogenic");
//!
//! assert_eq!(record.submission_year(), Some(2022));
//! assert!(record.significance().is_pathogenic());
//! ```
//!
//! # References
//!
//! - [ClinVar Data Dictionary](https://www.ncbi.nlm.nih.gov/clinvar/docs/help/)
//! - [ClinVar review status](https://www.ncbi.nlm.nih.gov/clinvar/docs/review_status/)

mod record;
mod types;

pub use record::{parse_submission_date, VariantRecord, RECORD_COLUMNS};
pub use types::{ReviewStatus, Significance};
