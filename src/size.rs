//! Genomic event size estimation from free-text variant names.
//!
//! ClinVar variant names come in several notations. A few of them carry a
//! range that can be turned into an approximate span in base pairs:
//!
//! | Notation               | Example                                                      |
//! |------------------------|--------------------------------------------------------------|
//! | chromosome coordinates | `GRCh38/hg38 22q11.21(chr22:18648855-21800471)x1`            |
//! | genomic range          | `NC_000022.11:g.18648855_21800471del`                        |
//! | uncertain breakpoints  | `NC_000022.11:g.(18600000_18648855)_(21800471_21900000)del`  |
//! | transcript (cDNA)      | `NM_000088.3:c.100_2300del`                                  |
//!
//! Anything else (substitutions, single-position edits, protein notation,
//! free text) estimates to zero. The estimator errs towards zero: a record
//! whose span cannot be determined unambiguously is never treated as large.
//!
//! # Example
//!
//! ```
//! use ferro_clinvar::size::{estimate, estimate_size, SizeRule};
//!
//! assert_eq!(estimate_size("NC_000022.11:g.18648855_21800471del"), 3_151_616);
//! assert_eq!(estimate_size("NM_000088.3:c.459A>G"), 0);
//!
//! let detail = estimate("NC_000022.11:g.(18600000_18648855)_(21800471_21900000)del");
//! assert_eq!(detail.rule, SizeRule::UncertainGenomicRange);
//! assert_eq!(detail.size_bp, 3_151_616);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static CHROMOSOME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"chr\w+:(\d+)-(\d+)").unwrap()
});

static TRANSCRIPT_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"c\.(\d+)_(\d+)").unwrap()
});

static INTEGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+").unwrap()
});

/// Marker that introduces genomic coordinates after a sequence accession.
const GENOMIC_MARKER: &str = ":g.";

/// Which notation produced a size estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeRule {
    /// `chr<name>:<start>-<end>`
    ChromosomeRange,
    /// `:g.<start>_<end>`
    GenomicRange,
    /// `:g.(<a>_<b>)_(<c>_<d>)`, measured between the inner bounds
    UncertainGenomicRange,
    /// `c.<start>_<end>`
    TranscriptRange,
    /// Genomic coordinates were present but could not be resolved
    Ambiguous,
    /// No recognizable range
    Unrecognized,
}

impl SizeRule {
    /// Short label used in CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeRule::ChromosomeRange => "chromosome-range",
            SizeRule::GenomicRange => "genomic-range",
            SizeRule::UncertainGenomicRange => "uncertain-genomic-range",
            SizeRule::TranscriptRange => "transcript-range",
            SizeRule::Ambiguous => "ambiguous",
            SizeRule::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for SizeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A size estimate together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEstimate {
    /// Estimated span in base pairs (0 when unknown).
    pub size_bp: u64,
    /// The notation that was recognized.
    pub rule: SizeRule,
}

impl SizeEstimate {
    fn new(size_bp: u64, rule: SizeRule) -> Self {
        Self { size_bp, rule }
    }

    fn ambiguous() -> Self {
        Self::new(0, SizeRule::Ambiguous)
    }

    fn unrecognized() -> Self {
        Self::new(0, SizeRule::Unrecognized)
    }

    /// Whether a span was actually measured.
    pub fn is_measured(&self) -> bool {
        !matches!(self.rule, SizeRule::Ambiguous | SizeRule::Unrecognized)
    }
}

/// Estimate the genomic span of a variant name in base pairs.
///
/// Returns 0 when no span can be extracted.
pub fn estimate_size(variant_expression: &str) -> u64 {
    estimate(variant_expression).size_bp
}

/// Estimate the genomic span of a variant name, reporting the matched rule.
///
/// Rules are tried in order and the first one that applies wins:
///
/// 1. chromosome coordinates, `chr<name>:<start>-<end>`
/// 2. genomic accession coordinates introduced by `:g.`; once this marker is
///    present its outcome is final, even when it resolves to zero
/// 3. transcript coordinates, `c.<start>_<end>`
pub fn estimate(variant_expression: &str) -> SizeEstimate {
    if let Some(caps) = CHROMOSOME_RANGE.captures(variant_expression) {
        return match (parse_position(&caps[1]), parse_position(&caps[2])) {
            (Some(start), Some(end)) => {
                SizeEstimate::new(start.abs_diff(end), SizeRule::ChromosomeRange)
            }
            _ => SizeEstimate::unrecognized(),
        };
    }

    if let Some(idx) = variant_expression.find(GENOMIC_MARKER) {
        let coords = &variant_expression[idx + GENOMIC_MARKER.len()..];
        let estimate = genomic_span(coords);
        if estimate.rule == SizeRule::Ambiguous {
            tracing::debug!(
                variant = variant_expression,
                "unresolved genomic breakpoints; size treated as 0"
            );
        }
        return estimate;
    }

    if let Some(caps) = TRANSCRIPT_RANGE.captures(variant_expression) {
        return match (parse_position(&caps[1]), parse_position(&caps[2])) {
            (Some(start), Some(end)) => {
                SizeEstimate::new(start.abs_diff(end), SizeRule::TranscriptRange)
            }
            _ => SizeEstimate::unrecognized(),
        };
    }

    SizeEstimate::unrecognized()
}

/// Resolve the span of the text following `:g.`.
///
/// Every integer is collected in order; `?` bounds contribute nothing.
/// Two integers are a plain range. Four integers are two uncertain
/// breakpoints `(a_b)_(c_d)` and yield the minimal span `c - b`, provided
/// `b < c`. Any other count is left unresolved.
fn genomic_span(coords: &str) -> SizeEstimate {
    let mut positions: Vec<u64> = Vec::with_capacity(4);
    for token in INTEGER.find_iter(coords) {
        let Some(pos) = parse_position(token.as_str()) else {
            return SizeEstimate::ambiguous();
        };
        positions.push(pos);
        if positions.len() > 4 {
            return SizeEstimate::ambiguous();
        }
    }

    match positions.as_slice() {
        [start, end] => SizeEstimate::new(start.abs_diff(*end), SizeRule::GenomicRange),
        [_, inner_start, inner_end, _] if inner_start < inner_end => SizeEstimate::new(
            inner_end - inner_start,
            SizeRule::UncertainGenomicRange,
        ),
        _ => SizeEstimate::ambiguous(),
    }
}

/// Parse a run of digits; values beyond `u64` are treated as unparseable.
fn parse_position(digits: &str) -> Option<u64> {
    digits.parse().ok()
}
