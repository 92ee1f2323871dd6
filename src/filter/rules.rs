//! Rejection rules and reasons.
//!
//! Rules run in a fixed order and the first one that fires decides the
//! outcome. Reasons render to the strings stored in the rejected table's
//! `Rejection Reason` column; [`RejectionKind::detect`] recovers the kind
//! from such a string.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::FilterConfig;
use crate::clinvar::VariantRecord;

/// Why a record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// Submission year outside the accepted set (`None` when undated)
    DateOutOfRange { year: Option<i32> },
    /// Estimated size above the threshold
    LargeGenomicEvent { size_bp: u64, threshold_bp: u64 },
    /// Phenotype matched an excluded keyword
    SyndromePhenotype { keyword: String },
}

impl RejectionReason {
    /// The category of this reason.
    pub fn kind(&self) -> RejectionKind {
        match self {
            RejectionReason::DateOutOfRange { .. } => RejectionKind::DateOutOfRange,
            RejectionReason::LargeGenomicEvent { .. } => RejectionKind::LargeGenomicEvent,
            RejectionReason::SyndromePhenotype { .. } => RejectionKind::SyndromePhenotype,
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::DateOutOfRange { year: Some(year) } => {
                write!(f, "Date out of range: {}", year)
            }
            RejectionReason::DateOutOfRange { year: None } => {
                write!(f, "Date out of range: unknown")
            }
            RejectionReason::LargeGenomicEvent {
                size_bp,
                threshold_bp,
            } => write!(
                f,
                "Large Genomic Event (>{}): {} bp",
                format_threshold(*threshold_bp),
                size_bp
            ),
            RejectionReason::SyndromePhenotype { keyword } => {
                write!(f, "Syndrome Phenotype: {}", keyword)
            }
        }
    }
}

/// Render a threshold compactly: `500kb` when it is a whole number of
/// kilobases, otherwise `{n} bp`.
fn format_threshold(threshold_bp: u64) -> String {
    if threshold_bp > 0 && threshold_bp % 1000 == 0 {
        format!("{}kb", threshold_bp / 1000)
    } else {
        format!("{} bp", threshold_bp)
    }
}

/// Category of a rejection, for breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// Submission year outside the accepted set
    DateOutOfRange,
    /// Estimated size above the threshold
    LargeGenomicEvent,
    /// Phenotype matched an excluded keyword
    SyndromePhenotype,
}

impl RejectionKind {
    /// All kinds, in rule order.
    pub const ALL: [RejectionKind; 3] = [
        RejectionKind::DateOutOfRange,
        RejectionKind::LargeGenomicEvent,
        RejectionKind::SyndromePhenotype,
    ];

    /// Stable prefix of the rendered reason.
    pub fn label(&self) -> &'static str {
        match self {
            RejectionKind::DateOutOfRange => "Date out of range",
            RejectionKind::LargeGenomicEvent => "Large Genomic Event",
            RejectionKind::SyndromePhenotype => "Syndrome Phenotype",
        }
    }

    /// Recover the kind from a stored reason string.
    ///
    /// Matching is a case-insensitive substring search on [`Self::label`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_clinvar::filter::RejectionKind;
    ///
    /// assert_eq!(
    ///     RejectionKind::detect("Large Genomic Event (>500kb): 3151616 bp"),
    ///     Some(RejectionKind::LargeGenomicEvent)
    /// );
    /// assert_eq!(RejectionKind::detect("something else"), None);
    /// ```
    pub fn detect(reason: &str) -> Option<Self> {
        let lower = reason.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| lower.contains(&kind.label().to_lowercase()))
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single rejection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Submission year must be accepted
    DateRange,
    /// Estimated size must not exceed the threshold
    GenomicSize,
    /// Phenotype must not contain an excluded keyword
    SyndromePhenotype,
}

/// Rules in evaluation order.
pub const RULES: [Rule; 3] = [Rule::DateRange, Rule::GenomicSize, Rule::SyndromePhenotype];

impl Rule {
    /// Evaluate this rule; `Some` means the record is rejected.
    pub fn check(
        &self,
        record: &VariantRecord,
        size_bp: u64,
        config: &FilterConfig,
    ) -> Option<RejectionReason> {
        match self {
            Rule::DateRange => match record.submission_year() {
                Some(year) if config.accepts_year(year) => None,
                year => Some(RejectionReason::DateOutOfRange { year }),
            },
            Rule::GenomicSize => {
                (size_bp > config.size_threshold_bp).then_some(RejectionReason::LargeGenomicEvent {
                    size_bp,
                    threshold_bp: config.size_threshold_bp,
                })
            }
            Rule::SyndromePhenotype => config.matching_keyword(&record.phenotype).map(|kw| {
                RejectionReason::SyndromePhenotype {
                    keyword: kw.to_string(),
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display() {
        assert_eq!(
            RejectionReason::DateOutOfRange { year: Some(2021) }.to_string(),
            "Date out of range: 2021"
        );
        assert_eq!(
            RejectionReason::DateOutOfRange { year: None }.to_string(),
            "Date out of range: unknown"
        );
        assert_eq!(
            RejectionReason::LargeGenomicEvent {
                size_bp: 600_000,
                threshold_bp: 500_000
            }
            .to_string(),
            "Large Genomic Event (>500kb): 600000 bp"
        );
        assert_eq!(
            RejectionReason::LargeGenomicEvent {
                size_bp: 1_500,
                threshold_bp: 1_234
            }
            .to_string(),
            "Large Genomic Event (>1234 bp): 1500 bp"
        );
        assert_eq!(
            RejectionReason::SyndromePhenotype {
                keyword: "22q11".to_string()
            }
            .to_string(),
            "Syndrome Phenotype: 22q11"
        );
    }

    #[test]
    fn test_detect_roundtrip() {
        let reasons = [
            RejectionReason::DateOutOfRange { year: Some(2019) },
            RejectionReason::LargeGenomicEvent {
                size_bp: 1,
                threshold_bp: 0,
            },
            RejectionReason::SyndromePhenotype {
                keyword: "16p11".to_string(),
            },
        ];
        for reason in reasons {
            assert_eq!(RejectionKind::detect(&reason.to_string()), Some(reason.kind()));
        }
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(
            RejectionKind::detect("date out of range: 2021"),
            Some(RejectionKind::DateOutOfRange)
        );
        assert_eq!(
            RejectionKind::detect("large genomic event (> threshold): 600000 bp"),
            Some(RejectionKind::LargeGenomicEvent)
        );
    }

    #[test]
    fn test_rule_date_range() {
        let config = FilterConfig::default();
        let old = VariantRecord::new("COPA", "x").with_submission_date("2021-06-01");
        assert_eq!(
            Rule::DateRange.check(&old, 0, &config),
            Some(RejectionReason::DateOutOfRange { year: Some(2021) })
        );
        let recent = old.clone().with_submission_date("2024-06-01");
        assert_eq!(Rule::DateRange.check(&recent, 0, &config), None);
        let undated = old.with_submission_date("");
        assert_eq!(
            Rule::DateRange.check(&undated, 0, &config),
            Some(RejectionReason::DateOutOfRange { year: None })
        );
    }

    #[test]
    fn test_rule_size_boundary() {
        let config = FilterConfig::default();
        let record = VariantRecord::default();
        assert_eq!(Rule::GenomicSize.check(&record, 500_000, &config), None);
        assert!(Rule::GenomicSize.check(&record, 500_001, &config).is_some());
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            RULES,
            [Rule::DateRange, Rule::GenomicSize, Rule::SyndromePhenotype]
        );
    }
}
