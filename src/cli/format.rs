//! Output formatting utilities for CLI operations

use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};
use std::str::FromStr;

use crate::error::FilterError;
use crate::size::SizeEstimate;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string; anything but `json` is text.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_clinvar::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

/// Write one size estimate.
///
/// Text output is `expression<TAB>size<TAB>rule`; JSON output is one object
/// per line.
///
/// # Examples
///
/// ```
/// use ferro_clinvar::cli::{output_estimate, OutputFormat};
/// use ferro_clinvar::size::estimate;
///
/// let mut buffer = Vec::new();
/// let expr = "chr1:1000-2000";
/// output_estimate(&mut buffer, expr, &estimate(expr), OutputFormat::Text).unwrap();
/// assert_eq!(String::from_utf8(buffer).unwrap(), "chr1:1000-2000\t1000\tchromosome-range\n");
/// ```
pub fn output_estimate<W: Write>(
    writer: &mut W,
    input: &str,
    estimate: &SizeEstimate,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => writeln!(
            writer,
            "{}",
            json!({
                "input": input,
                "size_bp": estimate.size_bp,
                "rule": estimate.rule,
            })
        ),
        OutputFormat::Text => {
            writeln!(writer, "{}\t{}\t{}", input, estimate.size_bp, estimate.rule)
        }
    }
}

/// Write a serializable value as pretty JSON.
pub fn output_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> crate::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Write an error to the output
///
/// # Examples
///
/// ```
/// use ferro_clinvar::cli::{output_error, OutputFormat};
/// use ferro_clinvar::FilterError;
///
/// let mut buffer = Vec::new();
/// let error = FilterError::config("bad size_limit");
/// output_error(&mut buffer, "filtering.json", &error, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer).unwrap();
/// assert!(result.starts_with("ERROR: filtering.json - [E9004]"));
/// ```
pub fn output_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &FilterError,
    format: OutputFormat,
) -> io::Result<()> {
    output_error_with_context(writer, input, error, format, None)
}

/// Write an error to the output with optional line number context
pub fn output_error_with_context<W: Write>(
    writer: &mut W,
    input: &str,
    error: &FilterError,
    format: OutputFormat,
    line_number: Option<usize>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut value = json!({
                "input": input,
                "error": error.to_string(),
                "code": error.code().as_str(),
                "status": "error",
            });
            if let Some(line) = line_number {
                value["line"] = json!(line);
            }
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text => match line_number {
            Some(line) => writeln!(
                writer,
                "ERROR (line {}): {} - {}",
                line,
                input,
                error.detailed_message()
            ),
            None => writeln!(writer, "ERROR: {} - {}", input, error.detailed_message()),
        },
    }
}

/// Write a command failure.
///
/// Library errors are rendered through [`output_error`] so they carry their
/// error code; any other error is written as plain text.
///
/// # Examples
///
/// ```
/// use ferro_clinvar::cli::{report_error, OutputFormat};
/// use ferro_clinvar::FilterError;
///
/// let error: Box<dyn std::error::Error> = Box::new(FilterError::config("bad size_limit"));
/// let mut buffer = Vec::new();
/// report_error(&mut buffer, "ferro-clinvar", error.as_ref(), OutputFormat::Text).unwrap();
/// assert!(String::from_utf8(buffer).unwrap().contains("[E9004]"));
/// ```
pub fn report_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &(dyn std::error::Error + 'static),
    format: OutputFormat,
) -> io::Result<()> {
    match error.downcast_ref::<FilterError>() {
        Some(error) => output_error(writer, input, error, format),
        None => match format {
            OutputFormat::Json => writeln!(
                writer,
                "{}",
                json!({
                    "input": input,
                    "error": error.to_string(),
                    "status": "error",
                })
            ),
            OutputFormat::Text => writeln!(writer, "ERROR: {} - {}", input, error),
        },
    }
}
