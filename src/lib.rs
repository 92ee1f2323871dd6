// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-clinvar: ClinVar submission filter
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Estimates the genomic size of each submission's variant expression and
//! rejects submissions outside the accepted years, above the size threshold,
//! or with a phenotype naming a syndromic copy-number event.
//!
//! # Example
//!
//! ```
//! use ferro_clinvar::{classify, estimate_size, FilterConfig, VariantRecord};
//!
//! assert_eq!(estimate_size("GRCh38/hg38 7q11.23(chr7:72700000-74300000)x1"), 1_600_000);
//!
//! let record = VariantRecord::new("ELN", "NM_000501.4:c.1315-1G>A")
//!     .with_phenotype("Supravalvar aortic stenosis")
//!     .with_submission_date("2024-05-14");
//! assert!(classify(&record, &FilterConfig::default()).kept());
//! ```

pub mod cli;
pub mod clinvar;
pub mod compare;
pub mod config;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod report;
pub mod size;
pub mod table;

// Re-export commonly used types
pub use clinvar::{ReviewStatus, Significance, VariantRecord};
pub use config::FilterSettings;
pub use error::{ErrorCode, FilterError};
pub use filter::{
    classify, ClassificationResult, ClassifiedRecord, FilterConfig, RejectionKind,
    RejectionReason,
};
pub use pipeline::{partition, FilterOutcome, FilterStats};
#[cfg(feature = "parallel")]
pub use pipeline::partition_parallel;
pub use size::{estimate, estimate_size, SizeEstimate, SizeRule};

/// Result type alias for ferro-clinvar operations
pub type Result<T> = std::result::Result<T, FilterError>;
