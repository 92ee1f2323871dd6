//! Reading and writing submission tables.
//!
//! Tables are header-based CSV (or TSV, chosen by file extension). Input
//! tables need only the columns in [`RECORD_COLUMNS`]; any other columns are
//! ignored and missing ones read as empty. Output tables repeat the input
//! columns and append the derived ones:
//!
//! - kept: `Estimated Size`
//! - rejected: `Estimated Size`, `Rejection Reason`

use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::clinvar::{VariantRecord, RECORD_COLUMNS};
use crate::filter::ClassifiedRecord;
use crate::Result;

/// Derived column holding the size estimate.
pub const ESTIMATED_SIZE_COLUMN: &str = "Estimated Size";

/// Derived column holding the rejection reason.
pub const REJECTION_REASON_COLUMN: &str = "Rejection Reason";

/// Field delimiter of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Comma-separated
    #[default]
    Comma,
    /// Tab-separated
    Tab,
}

impl Delimiter {
    /// Pick the delimiter from a file extension: `.tsv` and `.txt` are tab
    /// separated, everything else comma separated.
    pub fn for_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("tsv") | Some("txt") => Delimiter::Tab,
            _ => Delimiter::Comma,
        }
    }

    fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

fn reader_builder(delimiter: Delimiter) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers);
    builder
}

fn writer_builder(delimiter: Delimiter) -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.delimiter(delimiter.as_byte());
    builder
}

/// Read submission records from a reader.
pub fn read_records<R: Read>(reader: R, delimiter: Delimiter) -> Result<Vec<VariantRecord>> {
    let mut rdr = reader_builder(delimiter).from_reader(reader);
    strip_header_bom(&mut rdr)?;
    let mut records = Vec::new();
    for row in rdr.deserialize::<VariantRecord>() {
        records.push(row?);
    }
    tracing::debug!(count = records.len(), "read submission records");
    Ok(records)
}

/// Read submission records from a file.
pub fn read_records_from_path(path: &Path) -> Result<Vec<VariantRecord>> {
    let file = File::open(path)?;
    read_records(BufReader::new(file), Delimiter::for_path(path))
}

/// Exported tables sometimes start with a UTF-8 BOM, which would otherwise
/// become part of the first column name.
fn strip_header_bom<R: Read>(rdr: &mut csv::Reader<R>) -> Result<()> {
    let headers = rdr.headers()?.clone();
    if let Some(first) = headers.get(0) {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            let fixed: csv::StringRecord = std::iter::once(stripped)
                .chain(headers.iter().skip(1))
                .collect();
            rdr.set_headers(fixed);
        }
    }
    Ok(())
}

/// Write kept records with their size estimates.
pub fn write_kept<W: Write>(
    writer: W,
    records: &[ClassifiedRecord],
    delimiter: Delimiter,
) -> Result<()> {
    let mut wtr = writer_builder(delimiter).from_writer(writer);
    let mut header: Vec<&str> = RECORD_COLUMNS.to_vec();
    header.push(ESTIMATED_SIZE_COLUMN);
    wtr.write_record(&header)?;

    for classified in records {
        let size = classified.result.estimated_size_bp.to_string();
        let mut row: Vec<&str> = classified.record.fields().to_vec();
        row.push(&size);
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rejected records with their size estimates and reasons.
pub fn write_rejected<W: Write>(
    writer: W,
    records: &[ClassifiedRecord],
    delimiter: Delimiter,
) -> Result<()> {
    let mut wtr = writer_builder(delimiter).from_writer(writer);
    let mut header: Vec<&str> = RECORD_COLUMNS.to_vec();
    header.push(ESTIMATED_SIZE_COLUMN);
    header.push(REJECTION_REASON_COLUMN);
    wtr.write_record(&header)?;

    for classified in records {
        let size = classified.result.estimated_size_bp.to_string();
        let reason = classified
            .result
            .rejection_reason
            .as_ref()
            .map(|r| r.to_string())
            .unwrap_or_default();
        let mut row: Vec<&str> = classified.record.fields().to_vec();
        row.push(&size);
        row.push(&reason);
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write kept records to a file, delimiter chosen by extension.
pub fn write_kept_to_path(path: &Path, records: &[ClassifiedRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_kept(BufWriter::new(file), records, Delimiter::for_path(path))
}

/// Write rejected records to a file, delimiter chosen by extension.
pub fn write_rejected_to_path(path: &Path, records: &[ClassifiedRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_rejected(BufWriter::new(file), records, Delimiter::for_path(path))
}

#[derive(Deserialize)]
struct ReasonRow {
    #[serde(rename = "Rejection Reason", default)]
    reason: String,
}

/// Read the `Rejection Reason` column of a previously written rejected table.
pub fn read_rejection_reasons<R: Read>(reader: R, delimiter: Delimiter) -> Result<Vec<String>> {
    let mut rdr = reader_builder(delimiter).from_reader(reader);
    strip_header_bom(&mut rdr)?;
    let mut reasons = Vec::new();
    for row in rdr.deserialize::<ReasonRow>() {
        reasons.push(row?.reason);
    }
    Ok(reasons)
}

/// Read rejection reasons from a file.
pub fn read_rejection_reasons_from_path(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    read_rejection_reasons(BufReader::new(file), Delimiter::for_path(path))
}
