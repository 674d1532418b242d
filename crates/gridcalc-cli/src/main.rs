//! gridcalc CLI - evaluate formulas and recalculate snapshots

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gridcalc::prelude::*;
use gridcalc::{function_registry, FunctionCategory};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Largest sheet written as CSV (the XLSX sheet limits)
const MAX_CSV_ROWS: u32 = 1_048_576;
const MAX_CSV_COLUMNS: u32 = 16_384;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Spreadsheet formula evaluation tool")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of rows in a new sheet
    #[arg(long, default_value_t = 100, global = true)]
    rows: u32,

    /// Number of columns in a new sheet
    #[arg(long, default_value_t = 26, global = true)]
    columns: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a formula against a sheet built from cell assignments
    Eval {
        /// Formula text, e.g. "=SUM(A1:A3)"
        formula: String,

        /// Cell assignment ADDRESS=VALUE (repeatable; VALUE may itself be a formula)
        #[arg(short, long = "cell", value_parser = parse_assignment)]
        cells: Vec<(String, String)>,

        /// Cell the formula is evaluated as
        #[arg(short, long, default_value = "A1")]
        target: String,
    },

    /// Recalculate every formula in a JSON snapshot
    Recalc {
        /// Input snapshot file (JSON)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Field delimiter for CSV output
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Stop after the first formula error
        #[arg(long)]
        stop_on_error: bool,
    },

    /// List the built-in functions
    Functions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = GridConfig {
        rows: cli.rows,
        columns: cli.columns,
    };

    match cli.command {
        Commands::Eval {
            formula,
            cells,
            target,
        } => eval(&config, &formula, &cells, &target),
        Commands::Recalc {
            input,
            output,
            format,
            delimiter,
            stop_on_error,
        } => recalc(
            &input,
            output.as_deref(),
            format,
            delimiter,
            &CalculationOptions { stop_on_error },
        ),
        Commands::Functions => list_functions(),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parse `ADDRESS=VALUE`
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (address, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDRESS=VALUE, got '{}'", s))?;
    let address = address.trim();
    CellAddress::parse(address).map_err(|e| e.to_string())?;
    Ok((address.to_string(), value.to_string()))
}

fn eval(
    config: &GridConfig,
    formula: &str,
    cells: &[(String, String)],
    target: &str,
) -> Result<()> {
    let mut sheet = Spreadsheet::with_config(config);

    for (address, value) in cells {
        tracing::debug!(cell = %address, value = %value, "setting input");
        sheet
            .set_input(address, value)
            .with_context(|| format!("Failed to set {}", address))?;
    }

    let value = sheet
        .apply_formula(target, formula)
        .with_context(|| format!("Invalid target cell '{}'", target))?;
    println!("{}", value);

    Ok(())
}

fn recalc(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    delimiter: char,
    options: &CalculationOptions,
) -> Result<()> {
    let snapshot = load_snapshot(input)?;
    tracing::info!(
        path = %input.display(),
        cells = snapshot.cells.len(),
        "loaded snapshot"
    );
    let mut sheet = Spreadsheet::from_snapshot(snapshot);

    let stats = sheet.recalculate_with_options(options);
    eprintln!(
        "Calculated {} of {} formulas ({} errors)",
        stats.cells_calculated, stats.formula_count, stats.errors
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            write_sheet(&sheet, file, format, delimiter)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("Wrote '{}'", path.display());
        }
        None => {
            write_sheet(&sheet, io::stdout().lock(), format, delimiter)
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not a valid snapshot", path.display()))
}

fn write_sheet<W: Write>(
    sheet: &Spreadsheet,
    mut writer: W,
    format: OutputFormat,
    delimiter: char,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &sheet.snapshot())?;
            writeln!(writer)?;
            Ok(())
        }
        OutputFormat::Csv => write_csv(sheet, writer, delimiter),
    }
}

/// Write computed values from A1 to the bottom-right stored cell
fn write_csv<W: Write>(sheet: &Spreadsheet, writer: W, delimiter: char) -> Result<()> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(false)
        .from_writer(writer);

    let grid = sheet.grid();
    if let Some(range) = grid.used_range() {
        if range.end.row >= MAX_CSV_ROWS || range.end.col >= MAX_CSV_COLUMNS {
            bail!(
                "Cell {} is outside the CSV limit of {} rows by {} columns; use JSON output",
                range.end,
                MAX_CSV_ROWS,
                MAX_CSV_COLUMNS
            );
        }
        for row in 0..=range.end.row {
            let record: Vec<String> = (0..=range.end.col)
                .map(|col| grid.value_at(CellAddress::new(row, col)).to_string())
                .collect();
            csv_writer.write_record(&record)?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

fn list_functions() -> Result<()> {
    let mut stdout = io::stdout().lock();
    let mut current: Option<FunctionCategory> = None;

    for def in function_registry().iter() {
        if current != Some(def.category) {
            if current.is_some() {
                writeln!(stdout)?;
            }
            writeln!(stdout, "{}", def.category)?;
            current = Some(def.category);
        }
        let signature = format!("{}({})", def.name, def.arity());
        writeln!(stdout, "  {:<14} {}", signature, def.description)?;
    }

    Ok(())
}
