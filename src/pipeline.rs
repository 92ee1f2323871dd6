//! Batch filtering of submission tables.
//!
//! [`partition`] splits a table into kept, rejected and undated records.
//! Records without a parseable submission date never reach the classifier;
//! they are set aside as undated. Every other record is classified
//! independently, and both output lists keep the input order.
//!
//! With the `parallel` feature, [`partition_parallel`] does the same work on
//! a rayon pool and returns an identical [`FilterOutcome`].
//!
//! # Example
//!
//! ```
//! use ferro_clinvar::clinvar::VariantRecord;
//! use ferro_clinvar::filter::FilterConfig;
//! use ferro_clinvar::pipeline::partition;
//!
//! let records = vec![
//!     VariantRecord::new("DVL1", "NM_004421.3:c.1519del")
//!         .with_phenotype("Robinow syndrome")
//!         .with_submission_date("2023-08-09"),
//!     VariantRecord::new("DVL1", "NM_004421.3:c.1505del")
//!         .with_phenotype("Robinow syndrome")
//!         .with_submission_date("2019-08-09"),
//!     VariantRecord::new("DVL1", "NM_004421.3:c.1615del").with_submission_date("N/A"),
//! ];
//!
//! let outcome = partition(records, &FilterConfig::default());
//! assert_eq!(outcome.kept.len(), 1);
//! assert_eq!(outcome.rejected.len(), 1);
//! assert_eq!(outcome.undated.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::clinvar::VariantRecord;
use crate::filter::{ClassifiedRecord, FilterConfig, RejectionKind};

/// Result of filtering a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    /// Records no rule rejected, in input order.
    pub kept: Vec<ClassifiedRecord>,
    /// Rejected records with their reasons, in input order.
    pub rejected: Vec<ClassifiedRecord>,
    /// Records without a parseable submission date, in input order.
    pub undated: Vec<VariantRecord>,
}

impl FilterOutcome {
    /// Total number of input records.
    pub fn total(&self) -> usize {
        self.kept.len() + self.rejected.len() + self.undated.len()
    }

    /// Summary counts.
    pub fn stats(&self) -> FilterStats {
        let mut by_kind = BTreeMap::new();
        for kind in self
            .rejected
            .iter()
            .filter_map(|r| r.result.rejection_kind())
        {
            *by_kind.entry(kind).or_insert(0) += 1;
        }
        FilterStats {
            total: self.total(),
            kept: self.kept.len(),
            rejected: self.rejected.len(),
            undated: self.undated.len(),
            by_kind,
        }
    }

    fn from_classified(classified: Vec<Classified>) -> Self {
        let mut outcome = FilterOutcome::default();
        for item in classified {
            match item {
                Classified::Undated(record) => outcome.undated.push(record),
                Classified::Done(c) if c.result.kept() => outcome.kept.push(c),
                Classified::Done(c) => outcome.rejected.push(c),
            }
        }
        if !outcome.undated.is_empty() {
            tracing::warn!(
                count = outcome.undated.len(),
                "dropped records without a parseable submission date"
            );
        }
        tracing::info!(
            kept = outcome.kept.len(),
            rejected = outcome.rejected.len(),
            undated = outcome.undated.len(),
            "filtering complete"
        );
        outcome
    }
}

/// Counts from a filtering run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Input records
    pub total: usize,
    /// Kept records
    pub kept: usize,
    /// Rejected records
    pub rejected: usize,
    /// Undated records
    pub undated: usize,
    /// Rejections per kind
    pub by_kind: BTreeMap<RejectionKind, usize>,
}

impl FilterStats {
    /// Percentage of input records kept
    pub fn kept_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.kept as f64 / self.total as f64) * 100.0
        }
    }

    /// Rejections of one kind
    pub fn rejected_by(&self, kind: RejectionKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Per-record intermediate result.
enum Classified {
    Undated(VariantRecord),
    Done(ClassifiedRecord),
}

fn classify_one(record: VariantRecord, config: &FilterConfig) -> Classified {
    if record.submission_date().is_none() {
        Classified::Undated(record)
    } else {
        Classified::Done(ClassifiedRecord::new(record, config))
    }
}

/// Filter records sequentially.
pub fn partition<I>(records: I, config: &FilterConfig) -> FilterOutcome
where
    I: IntoIterator<Item = VariantRecord>,
{
    let classified = records
        .into_iter()
        .map(|r| classify_one(r, config))
        .collect();
    FilterOutcome::from_classified(classified)
}

/// Configuration for parallel filtering
#[cfg(feature = "parallel")]
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
    /// Number of threads (0 = use rayon default)
    pub num_threads: usize,
}

#[cfg(feature = "parallel")]
impl ParallelConfig {
    /// Create a new parallel configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of threads
    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }
}

/// Filter records on the global rayon pool.
///
/// Produces exactly the same outcome as [`partition`].
#[cfg(feature = "parallel")]
pub fn partition_parallel(records: Vec<VariantRecord>, config: &FilterConfig) -> FilterOutcome {
    use rayon::prelude::*;

    let classified = records
        .into_par_iter()
        .map(|r| classify_one(r, config))
        .collect();
    FilterOutcome::from_classified(classified)
}

/// Filter records on a dedicated pool sized by `parallel`.
#[cfg(feature = "parallel")]
pub fn partition_with(
    records: Vec<VariantRecord>,
    config: &FilterConfig,
    parallel: &ParallelConfig,
) -> crate::Result<FilterOutcome> {
    if parallel.num_threads == 0 {
        return Ok(partition_parallel(records, config));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel.num_threads)
        .build()
        .map_err(|e| crate::FilterError::config(format!("thread pool: {}", e)))?;
    Ok(pool.install(|| partition_parallel(records, config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<VariantRecord> {
        vec![
            VariantRecord::new("FOXF1", "NM_001451.3:c.416G>T")
                .with_phenotype("Alveolar capillary dysplasia")
                .with_submission_date("2022-04-01"),
            VariantRecord::new("FOXF1", "GRCh38/hg38 16q24.1(chr16:86000000-87000000)x1")
                .with_phenotype("Alveolar capillary dysplasia")
                .with_submission_date("2023-04-01"),
            VariantRecord::new("TBX4", "NM_018488.4:c.1112del")
                .with_phenotype("17q23.1q23.2 microdeletion syndrome")
                .with_submission_date("2024-04-01"),
            VariantRecord::new("TBX4", "NM_018488.4:c.401G>A")
                .with_phenotype("Ischiocoxopodopatellar syndrome")
                .with_submission_date(""),
            VariantRecord::new("TBX4", "NM_018488.4:c.702+1G>A")
                .with_phenotype("Pulmonary arterial hypertension")
                .with_submission_date("2020-01-15"),
            VariantRecord::new("FGF10", "NM_004465.2:c.620A>G")
                .with_phenotype("LADD syndrome")
                .with_submission_date("2025-06-30"),
        ]
    }

    #[test]
    fn test_partition_counts() {
        let outcome = partition(sample(), &FilterConfig::default());
        assert_eq!(outcome.total(), 6);
        assert_eq!(outcome.kept.len(), 2);
        assert_eq!(outcome.rejected.len(), 3);
        assert_eq!(outcome.undated.len(), 1);
    }

    #[test]
    fn test_partition_preserves_order() {
        let outcome = partition(sample(), &FilterConfig::default());
        let kept: Vec<_> = outcome
            .kept
            .iter()
            .map(|c| c.record.variant_expression.as_str())
            .collect();
        assert_eq!(kept, vec!["NM_001451.3:c.416G>T", "NM_004465.2:c.620A>G"]);

        let rejected: Vec<_> = outcome
            .rejected
            .iter()
            .map(|c| c.result.rejection_kind().unwrap())
            .collect();
        assert_eq!(
            rejected,
            vec![
                RejectionKind::LargeGenomicEvent,
                RejectionKind::SyndromePhenotype,
                RejectionKind::DateOutOfRange
            ]
        );
    }

    #[test]
    fn test_stats() {
        let stats = partition(sample(), &FilterConfig::default()).stats();
        assert_eq!(stats.total, 6);
        assert_eq!(stats.rejected_by(RejectionKind::DateOutOfRange), 1);
        assert_eq!(stats.rejected_by(RejectionKind::LargeGenomicEvent), 1);
        assert_eq!(stats.rejected_by(RejectionKind::SyndromePhenotype), 1);
        assert!((stats.kept_rate() - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_empty_input() {
        let outcome = partition(Vec::new(), &FilterConfig::default());
        assert_eq!(outcome.total(), 0);
        assert_eq!(outcome.stats().kept_rate(), 0.0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut records = Vec::new();
        for _ in 0..200 {
            records.extend(sample());
        }
        let config = FilterConfig::default();
        let sequential = partition(records.clone(), &config);
        let parallel = partition_parallel(records.clone(), &config);
        assert_eq!(sequential, parallel);

        let pooled = partition_with(records, &config, &ParallelConfig::new().with_num_threads(2))
            .unwrap();
        assert_eq!(sequential, pooled);
    }
}
