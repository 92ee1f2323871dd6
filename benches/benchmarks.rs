//! Performance benchmarks for ferro-clinvar
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- estimate

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ferro_clinvar::pipeline::partition;
use ferro_clinvar::{classify, estimate_size, FilterConfig, VariantRecord};

// =============================================================================
// Size estimation benchmarks
// =============================================================================

/// Benchmark size estimation for each notation
fn bench_estimate(c: &mut Criterion) {
    let expressions = vec![
        ("chr_range", "GRCh38/hg38 22q11.21(chr22:18648855-21800471)x1"),
        ("g.range", "NC_000022.11:g.18648855_21800471del"),
        ("g.uncertain", "NC_000022.11:g.(18600000_18648855)_(21800471_21900000)del"),
        ("g.ambiguous", "NC_000022.11:g.(18648855_?)_(?)del"),
        ("c.range", "NM_000088.3:c.100_2300del"),
        ("c.sub", "NM_004371.4(COPA):c.698G>A (p.Arg233His)"),
        ("text", "not provided"),
    ];

    let mut group = c.benchmark_group("estimate");
    for (name, expr) in &expressions {
        group.bench_with_input(BenchmarkId::new("notation", name), expr, |b, e| {
            b.iter(|| estimate_size(black_box(e)))
        });
    }
    group.finish();
}

// =============================================================================
// Classification benchmarks
// =============================================================================

fn sample_records(n: usize) -> Vec<VariantRecord> {
    let templates = [
        ("COPA", "NM_004371.4:c.698G>A", "Autoimmune interstitial lung disease", "2023-01-05"),
        ("TBX1", "chr22:18648855-21800471", "22q11.2 deletion syndrome", "2024-03-18"),
        ("TBX1", "NM_080647.1:c.928G>A", "22q11.2 deletion syndrome", "2023-11-20"),
        ("FOXF1", "NM_001451.3:c.416G>T", "Alveolar capillary dysplasia", "2019-09-09"),
        ("TANGO2", "NC_000022.11:g.(?_20017000)_(20060000_?)del", "Metabolic crises", "2025-02-11"),
        ("ACTG2", "NM_001615.4:c.533G>A", "Visceral myopathy", "N/A"),
    ];
    (0..n)
        .map(|i| {
            let (gene, expr, phenotype, date) = templates[i % templates.len()];
            VariantRecord::new(gene, expr)
                .with_phenotype(phenotype)
                .with_submission_date(date)
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let config = FilterConfig::default();
    let records = sample_records(6);

    let mut group = c.benchmark_group("classify");
    for (idx, record) in records.iter().enumerate() {
        group.bench_with_input(
            BenchmarkId::new("record", format!("{}-{}", idx, record.gene)),
            record,
            |b, r| b.iter(|| classify(black_box(r), &config)),
        );
    }
    group.finish();
}

// =============================================================================
// Throughput benchmarks
// =============================================================================

fn bench_partition(c: &mut Criterion) {
    let config = FilterConfig::default();
    let mut group = c.benchmark_group("partition");

    for size in [1_000usize, 10_000] {
        let records = sample_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("sequential", size), &records, |b, r| {
            b.iter(|| partition(black_box(r.clone()), &config))
        });
        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), &records, |b, r| {
            b.iter(|| ferro_clinvar::partition_parallel(black_box(r.clone()), &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_estimate, bench_classify, bench_partition);
criterion_main!(benches);
