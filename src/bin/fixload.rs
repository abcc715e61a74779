//! CLI tool to decode a fixed-width data file and write the grouped batch.
//!
//! Loads the schema and code table, scans the input line by line, groups
//! decoded records by the grouping field, and writes the batch as JSON
//! Lines to a file or stdout.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fixwidth_rs::{
    BatchSink, JsonLinesSink, RunConfig, RunError, batch_from_groups, load_codes, load_schema,
    scan_file,
};

/// Decode a fixed-width data file and write grouped records.
#[derive(Parser)]
#[command(name = "fixload")]
struct Cli {
    /// Schema definition file (JSON array of {message, name, len, start, end})
    schema: PathBuf,

    /// Code-to-message file (JSON array of {message, code})
    codes: PathBuf,

    /// Input data file (newline-delimited fixed-width records)
    input: PathBuf,

    /// Write the batch to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field whose value groups decoded records
    #[arg(long, default_value = fixwidth_rs::DEFAULT_GROUP_FIELD)]
    group_field: String,

    /// Show per-phase timings and debug detail on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), RunError> {
    let config = RunConfig::new(&cli.schema, &cli.codes, &cli.input)
        .with_group_field(cli.group_field.clone());

    let schema = load_schema(&config.schema_path)?;
    info!(layouts = schema.layout_count(), "schema loaded");

    let codes = load_codes(&config.codes_path)?;
    info!(codes = codes.code_count(), "code table loaded");

    let start = Instant::now();
    let outcome = scan_file(&config.input_path, &schema, &codes, &config.group_field)?;
    info!(
        lines = outcome.lines_read,
        decoded = outcome.decoded,
        dropped = outcome.dropped,
        groups = outcome.groups.len(),
        elapsed = ?start.elapsed(),
        "file scan complete"
    );
    if !outcome.failures.is_empty() {
        let positions: Vec<usize> = outcome
            .failures
            .iter()
            .take(5)
            .map(|f| f.line_no)
            .collect();
        warn!(
            skipped = outcome.failures.len(),
            first_lines = ?positions,
            "some lines could not be decoded"
        );
    }

    let batch = batch_from_groups(outcome.groups);

    let start = Instant::now();
    let summary = match &cli.output {
        Some(path) => JsonLinesSink::create(path)
            .and_then(|mut sink| sink.write_batch(batch))?,
        None => {
            let stdout = io::stdout();
            let mut sink = JsonLinesSink::new(BufWriter::new(stdout.lock()));
            sink.write_batch(batch)?
        }
    };
    info!(
        inserted = summary.inserted,
        modified = summary.modified,
        deleted = summary.deleted,
        elapsed = ?start.elapsed(),
        "batch write complete"
    );

    Ok(())
}
