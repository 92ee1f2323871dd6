//! Summary statistics over filtered tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

use super::lookup::{submitter_name, LookupTables};
use crate::clinvar::{Significance, VariantRecord};
use crate::filter::{FilterConfig, RejectionKind};
use crate::pipeline::FilterOutcome;
use crate::Result;

/// Record counts per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Records that passed every rule.
    pub kept: usize,
    /// Records rejected by a rule.
    pub rejected: usize,
    /// Records set aside for a missing or unparseable submission date.
    pub undated: usize,
    /// Sum of the three outcomes.
    pub total: usize,
}

/// Rejections grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionBreakdown {
    /// Count per recognized kind; every kind is present.
    pub by_kind: BTreeMap<RejectionKind, usize>,
    /// Reasons that match no known kind.
    pub unrecognized: usize,
}

/// Kept submissions for one gene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneCount {
    /// Gene symbol, trimmed.
    pub gene: String,
    /// OMIM id from the lookup tables, if the gene is mapped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omim: Option<String>,
    /// Number of kept submissions.
    pub count: usize,
}

/// Kept submissions from one submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitterCount {
    /// Submitter name; placeholders are reported as `Not provided`.
    pub submitter: String,
    /// Country from the lookup tables, or `Unknown`.
    pub country: String,
    /// Number of kept submissions.
    pub count: usize,
}

/// Kept submissions from submitters in one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    /// Country name, or `Unknown` for unmapped submitters.
    pub country: String,
    /// Number of kept submissions.
    pub count: usize,
}

/// Summary of a filtering run, ready for rendering.
///
/// Ranked lists are sorted by descending count, ties by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub totals: Totals,
    pub rejections: RejectionBreakdown,
    /// Kept submissions per year; accepted years are present even at zero.
    pub by_year: BTreeMap<i32, usize>,
    pub genes: Vec<GeneCount>,
    pub submitters: Vec<SubmitterCount>,
    pub countries: Vec<CountryCount>,
    pub by_significance: BTreeMap<Significance, usize>,
    /// Kept submissions classified pathogenic or likely pathogenic.
    pub pathogenic: usize,
    /// Kept submissions per review-status star rating.
    pub by_review_stars: BTreeMap<u8, usize>,
}

impl Summary {
    /// Build a summary from kept records and the reasons of rejected ones.
    pub fn build(
        kept: &[VariantRecord],
        rejected_reasons: &[String],
        undated: usize,
        tables: &LookupTables,
        config: &FilterConfig,
    ) -> Self {
        let totals = Totals {
            kept: kept.len(),
            rejected: rejected_reasons.len(),
            undated,
            total: kept.len() + rejected_reasons.len() + undated,
        };

        let mut rejections = RejectionBreakdown {
            by_kind: RejectionKind::ALL.iter().map(|k| (*k, 0)).collect(),
            unrecognized: 0,
        };
        for reason in rejected_reasons {
            match RejectionKind::detect(reason) {
                Some(kind) => *rejections.by_kind.entry(kind).or_insert(0) += 1,
                None => rejections.unrecognized += 1,
            }
        }
        if rejections.unrecognized > 0 {
            tracing::warn!(
                count = rejections.unrecognized,
                "rejection reasons of unknown kind"
            );
        }

        let mut by_year: BTreeMap<i32, usize> =
            config.accepted_years.iter().map(|y| (*y, 0)).collect();
        let mut genes: BTreeMap<&str, usize> = BTreeMap::new();
        let mut submitters: BTreeMap<&str, usize> = BTreeMap::new();
        let mut countries: BTreeMap<&str, usize> = BTreeMap::new();
        let mut by_significance = BTreeMap::new();
        let mut by_review_stars = BTreeMap::new();
        let mut pathogenic = 0;

        for record in kept {
            if let Some(year) = record.submission_year() {
                *by_year.entry(year).or_insert(0) += 1;
            }
            *genes.entry(record.gene.trim()).or_insert(0) += 1;

            let submitter = submitter_name(&record.submitter);
            *submitters.entry(submitter).or_insert(0) += 1;
            *countries.entry(tables.country_of(submitter)).or_insert(0) += 1;

            let significance = record.significance();
            if significance.is_pathogenic() {
                pathogenic += 1;
            }
            *by_significance.entry(significance).or_insert(0) += 1;
            *by_review_stars.entry(record.review().stars()).or_insert(0) += 1;
        }

        Self {
            totals,
            rejections,
            by_year,
            genes: ranked(genes)
                .map(|(gene, count)| GeneCount {
                    gene: gene.to_string(),
                    omim: tables.omim_of(gene).map(str::to_string),
                    count,
                })
                .collect(),
            submitters: ranked(submitters)
                .map(|(submitter, count)| SubmitterCount {
                    submitter: submitter.to_string(),
                    country: tables.country_of(submitter).to_string(),
                    count,
                })
                .collect(),
            countries: ranked(countries)
                .map(|(country, count)| CountryCount {
                    country: country.to_string(),
                    count,
                })
                .collect(),
            by_significance,
            pathogenic,
            by_review_stars,
        }
    }

    /// Build a summary straight from a filtering outcome.
    pub fn from_outcome(outcome: &FilterOutcome, tables: &LookupTables, config: &FilterConfig) -> Self {
        let kept: Vec<VariantRecord> = outcome.kept.iter().map(|c| c.record.clone()).collect();
        let reasons: Vec<String> = outcome
            .rejected
            .iter()
            .filter_map(|c| c.result.rejection_reason.as_ref())
            .map(|r| r.to_string())
            .collect();
        Self::build(&kept, &reasons, outcome.undated.len(), tables, config)
    }

    /// Gene entries that have an OMIM id.
    pub fn genes_with_omim(&self) -> impl Iterator<Item = &GeneCount> {
        self.genes.iter().filter(|g| g.omim.is_some())
    }

    /// Render as aligned plain text.
    pub fn write_text<W: Write>(&self, w: &mut W) -> Result<()> {
        writeln!(w, "Totals")?;
        writeln!(w, "  {:<12} {:>8}", "Kept", self.totals.kept)?;
        writeln!(w, "  {:<12} {:>8}", "Rejected", self.totals.rejected)?;
        writeln!(w, "  {:<12} {:>8}", "Undated", self.totals.undated)?;
        writeln!(w, "  {:<12} {:>8}", "Total", self.totals.total)?;

        writeln!(w)?;
        writeln!(w, "Rejections")?;
        for (kind, count) in &self.rejections.by_kind {
            writeln!(w, "  {:<24} {:>8}", kind.label(), count)?;
        }
        if self.rejections.unrecognized > 0 {
            writeln!(w, "  {:<24} {:>8}", "Other", self.rejections.unrecognized)?;
        }

        writeln!(w)?;
        writeln!(w, "By year")?;
        for (year, count) in &self.by_year {
            writeln!(w, "  {:<6} {:>8}", year, count)?;
        }

        writeln!(w)?;
        writeln!(w, "By gene")?;
        let gene_width = column_width(self.genes.iter().map(|g| g.gene.as_str()));
        for (idx, g) in self.genes.iter().enumerate() {
            writeln!(
                w,
                "  {:>4}  {:<gene_width$}  {:<8}  {:>6}",
                idx + 1,
                g.gene,
                g.omim.as_deref().unwrap_or("-"),
                g.count,
            )?;
        }

        writeln!(w)?;
        writeln!(w, "By submitter")?;
        let name_width = column_width(self.submitters.iter().map(|s| s.submitter.as_str()));
        let country_width = column_width(self.submitters.iter().map(|s| s.country.as_str()));
        for (idx, s) in self.submitters.iter().enumerate() {
            writeln!(
                w,
                "  {:>4}  {:<name_width$}  {:<country_width$}  {:>6}",
                idx + 1,
                s.submitter,
                s.country,
                s.count,
            )?;
        }

        writeln!(w)?;
        writeln!(w, "By country")?;
        let country_width = column_width(self.countries.iter().map(|c| c.country.as_str()));
        for c in &self.countries {
            writeln!(w, "  {:<country_width$}  {:>6}", c.country, c.count)?;
        }

        writeln!(w)?;
        writeln!(w, "By classification")?;
        for (significance, count) in &self.by_significance {
            writeln!(w, "  {:<30} {:>6}", significance.as_str(), count)?;
        }
        writeln!(w, "  {:<30} {:>6}", "P/LP total", self.pathogenic)?;

        writeln!(w)?;
        writeln!(w, "By review stars")?;
        for (stars, count) in &self.by_review_stars {
            writeln!(w, "  {:<4} {:>6}", stars, count)?;
        }
        Ok(())
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sort counts by descending count, then ascending key.
fn ranked<K: Ord>(counts: BTreeMap<K, usize>) -> impl Iterator<Item = (K, usize)> {
    let mut entries: Vec<(K, usize)> = counts.into_iter().collect();
    // BTreeMap order is already by key, so a stable sort on count suffices.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter()
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0)
}
