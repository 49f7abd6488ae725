//! pointlist-convert - CLI tool to normalize point-list workbooks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use pointlist_convert_rs::{
    collect_phrases, convert_workbook_file, load_rules, validate_results, write_phrase_file,
    write_sheet_csvs, NormalizeConfig, DEFAULT_STATION_PREFIX,
};

/// Normalize engineering point-list workbooks for the alarm database importer.
#[derive(Parser, Debug)]
#[command(name = "pointlist-convert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON file overriding the built-in reference tables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert every data sheet of a workbook into canonical CSV files
    Convert {
        /// Input workbook (.xlsx/.xls)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (default: the input file's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Station/device address prefix for hardwired points
        #[arg(short, long, default_value = DEFAULT_STATION_PREFIX)]
        station_prefix: String,

        /// Validate only, don't generate output
        #[arg(long)]
        validate: bool,

        /// Output debug information as JSON
        #[arg(long)]
        debug: bool,
    },

    /// Build a voice-alarm phrase list from red-highlighted rows
    Phrases {
        /// Input workbooks; the first sheet of each is read
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Substitution rule file (pattern=replacement lines)
        #[arg(short, long)]
        rules: PathBuf,

        /// Output text file
        #[arg(short, long)]
        output: PathBuf,

        /// Text prepended to every phrase
        #[arg(short, long, default_value = "")]
        prefix: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => NormalizeConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => NormalizeConfig::default(),
    };

    match cli.command {
        Command::Convert {
            input,
            output,
            station_prefix,
            validate,
            debug,
        } => run_convert(&input, output, &station_prefix, validate, debug, &config),
        Command::Phrases {
            input,
            rules,
            output,
            prefix,
        } => run_phrases(&input, &rules, &output, &prefix, &config),
    }
}

fn run_convert(
    input: &Path,
    output: Option<PathBuf>,
    station_prefix: &str,
    validate_only: bool,
    debug: bool,
    config: &NormalizeConfig,
) -> Result<()> {
    info!("Processing: {}", input.display());

    let results = convert_workbook_file(input, config, station_prefix)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let normalized = results.iter().filter(|r| r.is_normalized()).count();
    info!(
        "Normalized {} of {} sheet(s)",
        normalized,
        results.len()
    );

    // Validate
    let validation = validate_results(&results);

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    // Debug output
    if debug {
        let json = serde_json::to_string_pretty(&results)?;
        println!("{}", json);
        return Ok(());
    }

    // Validate-only mode
    if validate_only {
        info!("Validation passed");
        return Ok(());
    }

    let output_dir = output.unwrap_or_else(|| {
        input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let written = write_sheet_csvs(&output_dir, &results)
        .with_context(|| format!("Failed to write to {}", output_dir.display()))?;

    info!("Generated {} file(s) in {}", written.len(), output_dir.display());

    Ok(())
}

fn run_phrases(
    inputs: &[PathBuf],
    rules_path: &Path,
    output: &Path,
    prefix: &str,
    config: &NormalizeConfig,
) -> Result<()> {
    let rules = load_rules(rules_path)
        .with_context(|| format!("Failed to load rules {}", rules_path.display()))?;
    info!("Loaded {} rule(s)", rules.len());

    let entries = collect_phrases(inputs, &rules, prefix, &config.phrase);
    if entries.is_empty() {
        anyhow::bail!("No highlighted rows found in any input workbook");
    }

    // Default to a .txt extension
    let mut output = output.to_path_buf();
    if output.extension().is_none() {
        output.set_extension("txt");
    }

    write_phrase_file(&output, &entries)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Generated: {}", output.display());

    Ok(())
}
