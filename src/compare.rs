//! Comparing two snapshots of a submission table.
//!
//! Records are matched on gene, variant expression, phenotype, submitter and
//! submission date. Other columns (classification, review status) may change
//! between fetches without the record counting as added or removed. Keys are
//! counted as a multiset, so a duplicated row in one snapshot shows up as a
//! difference.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

use crate::clinvar::VariantRecord;
use crate::Result;

/// Identity of a submission across snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub gene: String,
    pub variant_expression: String,
    pub phenotype: String,
    pub submitter: String,
    pub submission_date: String,
}

impl From<&VariantRecord> for RecordKey {
    fn from(record: &VariantRecord) -> Self {
        Self {
            gene: record.gene.trim().to_string(),
            variant_expression: record.variant_expression.trim().to_string(),
            phenotype: record.phenotype.trim().to_string(),
            submitter: record.submitter.trim().to_string(),
            submission_date: record.submission_date.trim().to_string(),
        }
    }
}

/// Per-gene record counts in both snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneDelta {
    pub old: usize,
    pub new: usize,
}

impl GeneDelta {
    /// Signed change from old to new.
    pub fn change(&self) -> i64 {
        self.new as i64 - self.old as i64
    }
}

/// Differences between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Records only in the new snapshot, in new-snapshot order
    pub added: Vec<VariantRecord>,
    /// Records only in the old snapshot, in old-snapshot order
    pub removed: Vec<VariantRecord>,
    /// Records present in both
    pub unchanged: usize,
    /// Counts per gene
    pub per_gene: BTreeMap<String, GeneDelta>,
}

impl Comparison {
    /// Whether both snapshots hold the same records.
    pub fn is_identical(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Genes whose count changed.
    pub fn changed_genes(&self) -> impl Iterator<Item = (&str, &GeneDelta)> {
        self.per_gene
            .iter()
            .filter(|(_, d)| d.old != d.new)
            .map(|(g, d)| (g.as_str(), d))
    }

    /// Render as plain text.
    pub fn write_text<W: Write>(&self, w: &mut W) -> Result<()> {
        writeln!(
            w,
            "Added: {}, Removed: {}, Unchanged: {}",
            self.added.len(),
            self.removed.len(),
            self.unchanged
        )?;
        let changed: Vec<_> = self.changed_genes().collect();
        if !changed.is_empty() {
            writeln!(w)?;
            writeln!(w, "Changed genes")?;
            for (gene, delta) in changed {
                writeln!(
                    w,
                    "  {:<12} {:>6} -> {:<6} ({:+})",
                    gene,
                    delta.old,
                    delta.new,
                    delta.change()
                )?;
            }
        }
        for record in &self.added {
            writeln!(w, "+ {}\t{}", record.gene, record.variant_expression)?;
        }
        for record in &self.removed {
            writeln!(w, "- {}\t{}", record.gene, record.variant_expression)?;
        }
        Ok(())
    }
}

/// Compare an old snapshot against a new one.
pub fn compare(old: &[VariantRecord], new: &[VariantRecord]) -> Comparison {
    let mut per_gene: BTreeMap<String, GeneDelta> = BTreeMap::new();
    for record in old {
        per_gene.entry(record.gene.trim().to_string()).or_default().old += 1;
    }
    for record in new {
        per_gene.entry(record.gene.trim().to_string()).or_default().new += 1;
    }

    // Remaining old occurrences per key; each new record consumes one.
    let mut pending: BTreeMap<RecordKey, usize> = BTreeMap::new();
    for record in old {
        *pending.entry(RecordKey::from(record)).or_insert(0) += 1;
    }

    let mut added = Vec::new();
    let mut unchanged = 0;
    for record in new {
        match pending.get_mut(&RecordKey::from(record)) {
            Some(n) if *n > 0 => {
                *n -= 1;
                unchanged += 1;
            }
            _ => added.push(record.clone()),
        }
    }

    // Emit leftovers in old order.
    let mut removed = Vec::new();
    for record in old.iter().rev() {
        if let Some(n) = pending.get_mut(&RecordKey::from(record)) {
            if *n > 0 {
                *n -= 1;
                removed.push(record.clone());
            }
        }
    }
    removed.reverse();

    tracing::info!(
        added = added.len(),
        removed = removed.len(),
        unchanged,
        "compared snapshots"
    );

    Comparison {
        added,
        removed,
        unchanged,
        per_gene,
    }
}
