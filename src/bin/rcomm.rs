//! rcomm CLI
//!
//! Compare sorted files FILE1 and FILE2 line by line.
//!
//! Usage:
//!   rcomm [OPTION]... FILE1 FILE2
//!
//! Every option can also come from an `RCOMM_*` environment variable or a
//! `.env` file in the working directory. Switches accept the usual truthy
//! and falsy spellings (`1`/`0`, `yes`/`no`, `on`/`off`, `true`/`false`).

use std::io::{self, BufWriter};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rcomm::{Alignment, CommConfig, CommError, CompareSummary, InputSource};

const OUTPUT_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Parser, Debug)]
#[command(name = "rcomm", version)]
#[command(about = "Compare sorted files FILE1 and FILE2 line by line.")]
#[command(long_about = "Compare sorted files FILE1 and FILE2 line by line.

With no options, produce three-column output:
  column 1: lines only in FILE1
  column 2: lines only in FILE2
  column 3: lines in both FILE1 and FILE2

When FILE1 or FILE2 (not both) is -, read standard input.")]
#[command(after_help = "Examples:
  rcomm file1.txt file2.txt
  rcomm -12 file1.txt file2.txt
  rcomm -i -d \"|\" -12 file1.txt file2.txt")]
struct Cli {
    /// First sorted input (- for standard input)
    #[arg(value_name = "FILE1")]
    file1: String,

    /// Second sorted input (- for standard input)
    #[arg(value_name = "FILE2")]
    file2: String,

    /// Suppress column 1 (lines unique to FILE1)
    #[arg(
        short = '1',
        long = "suppress1",
        env = "RCOMM_SUPPRESS1",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new(),
    )]
    suppress1: bool,

    /// Suppress column 2 (lines unique to FILE2)
    #[arg(
        short = '2',
        long = "suppress2",
        env = "RCOMM_SUPPRESS2",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new(),
    )]
    suppress2: bool,

    /// Suppress column 3 (lines that appear in both files)
    #[arg(
        short = '3',
        long = "suppress3",
        env = "RCOMM_SUPPRESS3",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new(),
    )]
    suppress3: bool,

    /// Case-insensitive comparison
    #[arg(
        short = 'i',
        long,
        env = "RCOMM_INSENSITIVE",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new(),
    )]
    insensitive: bool,

    /// With -i, print lines as they appear in the input instead of lower-cased
    #[arg(
        long,
        requires = "insensitive",
        env = "RCOMM_KEEP_CASE",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new(),
    )]
    keep_case: bool,

    /// Merge-join the inputs (advance only the smaller side) instead of
    /// comparing them line against line
    #[arg(
        long,
        env = "RCOMM_MERGE",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new(),
    )]
    merge: bool,

    /// Separate columns with STR
    #[arg(
        short = 'd',
        long = "output-delimiter",
        value_name = "STR",
        default_value = "\t",
        hide_default_value = true,
        env = "RCOMM_OUTPUT_DELIMITER"
    )]
    output_delimiter: String,

    /// Print per-column counts as JSON on stderr when done
    #[arg(
        long,
        env = "RCOMM_STATS",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new(),
    )]
    stats: bool,

    /// Verbose logging on stderr (RCOMM_LOG / RUST_LOG take precedence)
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> CommConfig {
        CommConfig::new()
            .suppress(self.suppress1, self.suppress2, self.suppress3)
            .case_insensitive(self.insensitive)
            .fold_output(!self.keep_case)
            .alignment(if self.merge {
                Alignment::Merge
            } else {
                Alignment::LockStep
            })
            .delimiter(self.output_delimiter.as_str())
    }
}

#[derive(Serialize)]
struct StatsReport<'a> {
    file1: &'a str,
    file2: &'a str,
    config: &'a CommConfig,
    summary: CompareSummary,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("RCOMM_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let first = InputSource::parse(&cli.file1);
    let second = InputSource::parse(&cli.file2);
    let config = cli.config();

    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, stdout.lock());

    let summary = match rcomm::run(&first, &second, &config, &mut out) {
        Ok(summary) => summary,
        // Downstream closed early (`rcomm a b | head`): not a failure
        Err(e) if e.is_broken_pipe() => return Ok(()),
        Err(e @ CommError::Read { .. }) => return Err(e).context("comparison error"),
        Err(e) => return Err(e.into()),
    };

    if cli.stats {
        let report = StatsReport {
            file1: &cli.file1,
            file2: &cli.file2,
            config: &config,
            summary,
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to encode stats")?;
        eprintln!("{json}");
    }

    Ok(())
}

fn main() -> ExitCode {
    // Optional .env, loaded before clap reads RCOMM_* variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
