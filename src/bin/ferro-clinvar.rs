// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-clinvar CLI
//!
//! Command-line interface for filtering ClinVar submission tables.

use clap::{Parser, Subcommand};
use ferro_clinvar::cli::{
    filter_summary_line, output_estimate, output_json, read_expressions, report_error,
    OutputFormat,
};
use ferro_clinvar::compare::compare;
use ferro_clinvar::config::FilterSettings;
use ferro_clinvar::filter::{FilterConfig, KeywordMatch};
use ferro_clinvar::pipeline::FilterOutcome;
use ferro_clinvar::report::{LookupTables, Summary};
use ferro_clinvar::size::estimate;
use ferro_clinvar::table::{
    read_records_from_path, read_rejection_reasons_from_path, write_kept_to_path,
    write_rejected_to_path,
};
use ferro_clinvar::VariantRecord;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::info;

#[derive(Parser)]
#[command(name = "ferro-clinvar")]
#[command(author, version, about = "ClinVar submission filter and summary tool")]
#[command(
    long_about = "Filter ClinVar submission tables by date, event size and phenotype.

Examples:
  ferro-clinvar filter -i clinvar_results.csv --kept kept.csv --rejected rejected.csv
  ferro-clinvar estimate 'NC_000022.11:g.18648855_21800471del'
  ferro-clinvar report --kept kept.csv --rejected rejected.csv --centers config_centers.json
  ferro-clinvar compare backup.csv clinvar_results.csv
  ferro-clinvar config > config/filtering.json"
)]
struct Cli {
    /// Log filter (tracing EnvFilter syntax, e.g. `debug` or `ferro_clinvar=trace`)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a submission table into kept and rejected tables
    Filter {
        /// Input table (CSV, or TSV for .tsv/.txt)
        #[arg(short, long)]
        input: PathBuf,

        /// Output table for kept records
        #[arg(long)]
        kept: PathBuf,

        /// Output table for rejected records
        #[arg(long)]
        rejected: PathBuf,

        /// Filter settings file (default: search config/filtering.json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Maximum estimated event size in base pairs
        #[arg(long)]
        size_limit: Option<u64>,

        /// Excluded phenotype keyword (repeatable; replaces the configured list)
        #[arg(long = "exclude-keyword")]
        exclude_keywords: Vec<String>,

        /// Accepted submission year (repeatable; replaces the configured set)
        #[arg(long = "year")]
        years: Vec<i32>,

        /// Keyword matching mode
        #[arg(long, value_parser = ["case-sensitive", "case-insensitive"])]
        keyword_match: Option<String>,

        /// Worker threads (0 = all cores)
        #[arg(long, default_value = "0")]
        threads: usize,
    },

    /// Estimate the genomic size of variant expressions
    Estimate {
        /// Variant expression (reads --input or stdin when omitted)
        expression: Option<String>,

        /// Input file (one expression per line)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Summarize filtered tables
    Report {
        /// Kept table written by `filter`
        #[arg(long)]
        kept: PathBuf,

        /// Rejected table written by `filter`
        #[arg(long)]
        rejected: Option<PathBuf>,

        /// Number of undated records dropped by `filter`
        #[arg(long, default_value = "0")]
        undated: usize,

        /// Submitter to country map (JSON object)
        #[arg(long)]
        centers: Option<PathBuf>,

        /// Gene to OMIM id map (JSON object)
        #[arg(long)]
        omim: Option<PathBuf>,

        /// Filter settings file, for the accepted years
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Compare two snapshots of a submission table
    Compare {
        /// Older table
        old: PathBuf,

        /// Newer table
        new: PathBuf,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Print a sample filter settings file
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Nothing left to report to if stderr itself fails
            let _ = report_error(&mut io::stderr(), "ferro-clinvar", e.as_ref(), OutputFormat::Text);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Filter {
            input,
            kept,
            rejected,
            config,
            size_limit,
            exclude_keywords,
            years,
            keyword_match,
            threads,
        } => {
            let settings = load_settings(config.as_deref())?;
            let mut filter_config = settings.merge_with_cli(size_limit, &exclude_keywords, &years);
            if let Some(mode) = keyword_match {
                filter_config.keyword_match = KeywordMatch::from_str(&mode)?;
            }
            cmd_filter(&input, &kept, &rejected, &filter_config, threads)
        }
        Commands::Estimate {
            expression,
            input,
            format,
        } => cmd_estimate(expression, input, OutputFormat::from_str(&format)?),
        Commands::Report {
            kept,
            rejected,
            undated,
            centers,
            omim,
            config,
            format,
        } => {
            let filter_config = load_settings(config.as_deref())?.to_filter_config();
            let tables = LookupTables::load(centers.as_deref(), omim.as_deref())?;
            cmd_report(
                &kept,
                rejected.as_deref(),
                undated,
                &tables,
                &filter_config,
                OutputFormat::from_str(&format)?,
            )
        }
        Commands::Compare { old, new, format } => {
            cmd_compare(&old, &new, OutputFormat::from_str(&format)?)
        }
        Commands::Config { output } => cmd_config(output.as_deref()),
    }
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    // stdout carries command output; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    Ok(())
}

/// Explicit path if given, otherwise the default search, otherwise defaults.
fn load_settings(path: Option<&Path>) -> ferro_clinvar::Result<FilterSettings> {
    match path {
        Some(path) => FilterSettings::load_from_path(path),
        None => Ok(FilterSettings::load()?.unwrap_or_default()),
    }
}

fn cmd_filter(
    input: &Path,
    kept: &Path,
    rejected: &Path,
    config: &FilterConfig,
    threads: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = read_records_from_path(input)?;
    info!(path = %input.display(), count = records.len(), "read input table");

    let outcome = run_partition(records, config, threads)?;

    write_kept_to_path(kept, &outcome.kept)?;
    write_rejected_to_path(rejected, &outcome.rejected)?;
    info!(kept = %kept.display(), rejected = %rejected.display(), "wrote output tables");

    println!("{}", filter_summary_line(&outcome.stats()));
    Ok(())
}

#[cfg(feature = "parallel")]
fn run_partition(
    records: Vec<VariantRecord>,
    config: &FilterConfig,
    threads: usize,
) -> ferro_clinvar::Result<FilterOutcome> {
    use ferro_clinvar::pipeline::{partition_with, ParallelConfig};

    partition_with(records, config, &ParallelConfig::new().with_num_threads(threads))
}

#[cfg(not(feature = "parallel"))]
fn run_partition(
    records: Vec<VariantRecord>,
    config: &FilterConfig,
    _threads: usize,
) -> ferro_clinvar::Result<FilterOutcome> {
    Ok(ferro_clinvar::pipeline::partition(records, config))
}

fn cmd_estimate(
    expression: Option<String>,
    input: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let expressions = match (expression, input) {
        (Some(expr), _) => vec![expr],
        (None, Some(path)) => read_expressions(BufReader::new(File::open(path)?))?,
        (None, None) => read_expressions(io::stdin().lock())?,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for expr in &expressions {
        output_estimate(&mut out, expr, &estimate(expr), format)?;
    }
    out.flush()?;
    Ok(())
}

fn cmd_report(
    kept: &Path,
    rejected: Option<&Path>,
    undated: usize,
    tables: &LookupTables,
    config: &FilterConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let kept_records = read_records_from_path(kept)?;
    let reasons = match rejected {
        Some(path) => read_rejection_reasons_from_path(path)?,
        None => Vec::new(),
    };

    let summary = Summary::build(&kept_records, &reasons, undated, tables, config);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match format {
        OutputFormat::Json => output_json(&mut out, &summary)?,
        OutputFormat::Text => summary.write_text(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn cmd_compare(old: &Path, new: &Path, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let old_records = read_records_from_path(old)?;
    let new_records = read_records_from_path(new)?;
    let comparison = compare(&old_records, &new_records);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match format {
        OutputFormat::Json => output_json(&mut out, &comparison)?,
        OutputFormat::Text => comparison.write_text(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn cmd_config(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = FilterSettings::sample().to_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))?;
            info!(path = %path.display(), "wrote sample filter settings");
        }
        None => println!("{}", json),
    }
    Ok(())
}
