//! CLI utilities for ferro-clinvar
//!
//! Pure and I/O-abstracted helpers used by the `ferro-clinvar` binary, kept in
//! the library so they can be unit tested without spawning the binary.

pub mod format;

pub use format::{
    output_error, output_error_with_context, output_estimate, output_json, report_error,
    OutputFormat,
};

use std::io::BufRead;

use crate::pipeline::FilterStats;
use crate::Result;

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip a UTF-8 BOM from the beginning of a string if present.
///
/// # Examples
///
/// ```
/// use ferro_clinvar::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}chr1:100-200"), "chr1:100-200");
/// assert_eq!(strip_bom("chr1:100-200"), "chr1:100-200");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Clean one line of an expression list.
///
/// Trims whitespace, strips a BOM on the first line and drops `#` comments.
/// Returns `None` for blank and comment-only lines.
///
/// # Examples
///
/// ```
/// use ferro_clinvar::cli::process_input_line;
///
/// assert_eq!(process_input_line("chr1:100-200  # CNV", false), Some("chr1:100-200"));
/// assert_eq!(process_input_line("\u{feff}c.1_10del", true), Some("c.1_10del"));
/// assert_eq!(process_input_line("# header", false), None);
/// ```
pub fn process_input_line(line: &str, is_first_line: bool) -> Option<&str> {
    let line = line.trim();
    let line = if is_first_line { strip_bom(line) } else { line };
    let line = match line.find('#') {
        Some(pos) => line[..pos].trim(),
        None => line,
    };
    (!line.is_empty()).then_some(line)
}

/// Read variant expressions, one per line.
pub fn read_expressions<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut expressions = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(expr) = process_input_line(&line, idx == 0) {
            expressions.push(expr.to_string());
        }
    }
    Ok(expressions)
}

/// One-line summary printed after filtering.
///
/// # Examples
///
/// ```
/// use ferro_clinvar::cli::filter_summary_line;
/// use ferro_clinvar::pipeline::FilterStats;
///
/// let stats = FilterStats { total: 5, kept: 3, rejected: 1, undated: 1, ..Default::default() };
/// assert_eq!(filter_summary_line(&stats), "Kept: 3, Rejected: 1, Undated: 1");
/// ```
pub fn filter_summary_line(stats: &FilterStats) -> String {
    format!(
        "Kept: {}, Rejected: {}, Undated: {}",
        stats.kept, stats.rejected, stats.undated
    )
}
