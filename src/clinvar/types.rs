//! ClinVar classification vocabularies.
//!
//! Submission rows carry the germline classification and review status as
//! free text. These enums give them a typed view for summaries; the raw text
//! is always kept on the record and written back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Germline classification of a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Significance {
    /// Pathogenic
    Pathogenic,
    /// Pathogenic/Likely pathogenic (aggregate label used by some submitters)
    PathogenicLikelyPathogenic,
    /// Likely pathogenic
    LikelyPathogenic,
    /// Uncertain significance
    UncertainSignificance,
    /// Likely benign
    LikelyBenign,
    /// Benign
    Benign,
    /// Anything else, including an empty cell
    #[default]
    Other,
}

impl Significance {
    /// Label as written by ClinVar.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pathogenic => "Pathogenic",
            Self::PathogenicLikelyPathogenic => "Pathogenic/Likely pathogenic",
            Self::LikelyPathogenic => "Likely pathogenic",
            Self::UncertainSignificance => "Uncertain significance",
            Self::LikelyBenign => "Likely benign",
            Self::Benign => "Benign",
            Self::Other => "Other",
        }
    }

    /// Pathogenic or likely pathogenic (P/LP).
    pub fn is_pathogenic(&self) -> bool {
        matches!(
            self,
            Self::Pathogenic | Self::PathogenicLikelyPathogenic | Self::LikelyPathogenic
        )
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Significance {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace('_', " ");
        // Qualifiers such as ", low penetrance" do not change the class.
        let head = lower.split([',', ';']).next().unwrap_or_default().trim();
        Ok(match head {
            "pathogenic" => Self::Pathogenic,
            "pathogenic/likely pathogenic" | "likely pathogenic/pathogenic" => {
                Self::PathogenicLikelyPathogenic
            }
            "likely pathogenic" => Self::LikelyPathogenic,
            "uncertain significance" | "vus" => Self::UncertainSignificance,
            "likely benign" => Self::LikelyBenign,
            "benign" => Self::Benign,
            _ => Self::Other,
        })
    }
}

/// Review status of a submission, ordered by the ClinVar star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ReviewStatus {
    /// No assertion criteria, no classification, or flagged (0 stars)
    #[default]
    NoAssertion,
    /// Criteria provided, single submitter (1 star)
    SingleSubmitter,
    /// Criteria provided, conflicting classifications (1 star)
    Conflicting,
    /// Criteria provided, multiple submitters, no conflicts (2 stars)
    MultipleSubmitters,
    /// Reviewed by expert panel (3 stars)
    ExpertPanel,
    /// Practice guideline (4 stars)
    PracticeGuideline,
}

impl ReviewStatus {
    /// Star rating (0-4).
    pub fn stars(&self) -> u8 {
        match self {
            Self::NoAssertion => 0,
            Self::SingleSubmitter | Self::Conflicting => 1,
            Self::MultipleSubmitters => 2,
            Self::ExpertPanel => 3,
            Self::PracticeGuideline => 4,
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Ok(if lower.contains("practice guideline") {
            Self::PracticeGuideline
        } else if lower.contains("expert panel") {
            Self::ExpertPanel
        } else if lower.contains("multiple submitters") {
            Self::MultipleSubmitters
        } else if lower.contains("conflicting") {
            Self::Conflicting
        } else if lower.contains("single submitter") || lower == "criteria provided" {
            Self::SingleSubmitter
        } else {
            Self::NoAssertion
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_significance_from_str() {
        assert_eq!("Pathogenic".parse::<Significance>().unwrap(), Significance::Pathogenic);
        assert_eq!(
            "likely_pathogenic".parse::<Significance>().unwrap(),
            Significance::LikelyPathogenic
        );
        assert_eq!(
            "Pathogenic/Likely pathogenic".parse::<Significance>().unwrap(),
            Significance::PathogenicLikelyPathogenic
        );
        assert_eq!(
            "Pathogenic, low penetrance".parse::<Significance>().unwrap(),
            Significance::Pathogenic
        );
        assert_eq!("VUS".parse::<Significance>().unwrap(), Significance::UncertainSignificance);
        assert_eq!("".parse::<Significance>().unwrap(), Significance::Other);
        assert_eq!("N/A".parse::<Significance>().unwrap(), Significance::Other);
    }

    #[test]
    fn test_significance_is_pathogenic() {
        assert!(Significance::Pathogenic.is_pathogenic());
        assert!(Significance::LikelyPathogenic.is_pathogenic());
        assert!(Significance::PathogenicLikelyPathogenic.is_pathogenic());
        assert!(!Significance::UncertainSignificance.is_pathogenic());
        assert!(!Significance::Benign.is_pathogenic());
    }

    #[test]
    fn test_review_status_from_str() {
        assert_eq!(
            "criteria provided, single submitter".parse::<ReviewStatus>().unwrap(),
            ReviewStatus::SingleSubmitter
        );
        assert_eq!(
            "criteria provided, multiple submitters, no conflicts"
                .parse::<ReviewStatus>()
                .unwrap(),
            ReviewStatus::MultipleSubmitters
        );
        assert_eq!(
            "reviewed by expert panel".parse::<ReviewStatus>().unwrap(),
            ReviewStatus::ExpertPanel
        );
        assert_eq!(
            "no assertion criteria provided".parse::<ReviewStatus>().unwrap(),
            ReviewStatus::NoAssertion
        );
        assert_eq!("N/A".parse::<ReviewStatus>().unwrap(), ReviewStatus::NoAssertion);
    }

    #[test]
    fn test_review_status_stars() {
        assert_eq!(ReviewStatus::NoAssertion.stars(), 0);
        assert_eq!(ReviewStatus::Conflicting.stars(), 1);
        assert_eq!(ReviewStatus::MultipleSubmitters.stars(), 2);
        assert_eq!(ReviewStatus::ExpertPanel.stars(), 3);
        assert_eq!(ReviewStatus::PracticeGuideline.stars(), 4);
    }
}
