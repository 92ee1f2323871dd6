//! Size estimation tests using rstest parameterized tests

use ferro_clinvar::size::{estimate, estimate_size, SizeRule};
use rstest::rstest;

// =============================================================================
// Chromosome coordinates
// =============================================================================

#[rstest]
#[case("GRCh38/hg38 22q11.21(chr22:18648855-21800471)x1", 3_151_616)]
#[case("GRCh37/hg19 16p11.2(chr16:29624617-30199855)x1", 575_238)]
#[case("GRCh38/hg38 Xp22.31(chrX:6537090-8167697)x0", 1_630_607)]
#[case("GRCh38/hg38 1q21.1(chr1:147105904-147849064)x3", 743_160)]
#[case("chr7:74300000-72700000", 1_600_000)]
#[case("chr2:500-500", 0)]
fn test_chromosome_range(#[case] input: &str, #[case] expected: u64) {
    let result = estimate(input);
    assert_eq!(result.size_bp, expected, "size of {}", input);
    assert_eq!(result.rule, SizeRule::ChromosomeRange);
}

// =============================================================================
// Genomic accession coordinates
// =============================================================================

#[rstest]
#[case("NC_000022.11:g.18648855_21800471del", 3_151_616, SizeRule::GenomicRange)]
#[case("NC_000022.11:g.(?_18648855)_(21800471_?)del", 3_151_616, SizeRule::GenomicRange)]
#[case(
    "NC_000022.11:g.(18600000_18648855)_(21800471_21900000)del",
    3_151_616,
    SizeRule::UncertainGenomicRange
)]
#[case("NC_000016.10:g.29584127_30178367dup", 594_240, SizeRule::GenomicRange)]
#[case("NC_000017.11:g.7675994_7675993del", 1, SizeRule::GenomicRange)]
fn test_genomic_range(#[case] input: &str, #[case] expected: u64, #[case] rule: SizeRule) {
    let result = estimate(input);
    assert_eq!(result.size_bp, expected, "size of {}", input);
    assert_eq!(result.rule, rule);
}

#[rstest]
// one usable integer
#[case("NC_000022.11:g.(18648855_?)_(?)del")]
#[case("NC_000013.11:g.32316461dup")]
// three integers
#[case("NC_000022.11:g.(18600000_18648855)_(21800471_?)del")]
// inner bounds out of order
#[case("NC_000022.11:g.(100_900)_(500_1000)del")]
// too many integers
#[case("NC_000001.11:g.[100_200del;300_400del;500A>G]")]
// overflowing integer
#[case("NC_000001.11:g.1_99999999999999999999999del")]
fn test_ambiguous_genomic_is_zero(#[case] input: &str) {
    let result = estimate(input);
    assert_eq!(result.size_bp, 0, "size of {}", input);
    assert_eq!(result.rule, SizeRule::Ambiguous);
    assert!(!result.is_measured());
}

#[test]
fn test_genomic_marker_is_final() {
    // A c. range after an unresolved g. part is not consulted
    assert_eq!(estimate_size("NC_000001.11:g.100del c.1_5000del"), 0);
}

// =============================================================================
// Transcript coordinates
// =============================================================================

#[rstest]
#[case("NM_000088.3:c.100_2300del", 2_200)]
#[case("NM_004006.3(DMD):c.31_9000dup", 8_969)]
#[case("c.20_10del", 10)]
fn test_transcript_range(#[case] input: &str, #[case] expected: u64) {
    let result = estimate(input);
    assert_eq!(result.size_bp, expected);
    assert_eq!(result.rule, SizeRule::TranscriptRange);
}

// =============================================================================
// Unrecognized notation
// =============================================================================

#[rstest]
#[case("c.123A>T")]
#[case("p.Arg45Gln")]
#[case("NM_004371.4(COPA):c.698G>A (p.Arg233His)")]
#[case("NM_000088.3:c.589-1G>T")]
#[case("")]
#[case("Single allele")]
fn test_unrecognized_is_zero(#[case] input: &str) {
    let result = estimate(input);
    assert_eq!(result.size_bp, 0);
    assert_eq!(result.rule, SizeRule::Unrecognized);
}

#[test]
fn test_chromosome_rule_takes_precedence() {
    let expr = "NC_000022.11:g.1_2del chr22:1000-3000";
    assert_eq!(estimate(expr).rule, SizeRule::ChromosomeRange);
    assert_eq!(estimate_size(expr), 2000);
}
