//! Summary reports over filtered submission tables.
//!
//! A report is built from the kept table, the `Rejection Reason` column of
//! the rejected table and the number of undated records. Submitters are
//! mapped to countries and genes to OMIM entries through [`LookupTables`],
//! which are loaded once and passed in.
//!
//! # Example
//!
//! ```
//! use ferro_clinvar::clinvar::VariantRecord;
//! use ferro_clinvar::filter::FilterConfig;
//! use ferro_clinvar::report::{LookupTables, Summary};
//!
//! let kept = vec![VariantRecord::new("COPA", "NM_004371.4:c.698G>A")
//!     .with_submission_date("2023-01-05")
//!     .with_submitter("Invitae")];
//! let reasons = vec!["Date out of range: 2019".to_string()];
//!
//! let summary = Summary::build(&kept, &reasons, 0, &LookupTables::new(), &FilterConfig::default());
//! assert_eq!(summary.totals.total, 2);
//! assert_eq!(summary.submitters[0].country, "Unknown");
//! ```

mod lookup;
mod summary;

pub use lookup::{submitter_name, LookupTables, NOT_PROVIDED, UNKNOWN_COUNTRY};
pub use summary::{
    CountryCount, GeneCount, RejectionBreakdown, SubmitterCount, Summary, Totals,
};
