#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line client that plays a Rampart match over stdio.

mod logging;

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use rampart_protocol::{Driver, DriverOptions, MatchSummary};
use rampart_system_reference_strategy::{Config, ReferenceStrategy};

/// Turn-based tower-defence client speaking the engine protocol on stdin/stdout.
#[derive(Debug, Parser)]
#[command(name = "rampart", version, about, long_about = None)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Read the engine stream from a file instead of stdin.
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Seed for the reference strategy's spawn cell choice.
    #[arg(long)]
    seed: Option<u64>,

    /// Forward decisions without dropping those the engine would reject.
    #[arg(long)]
    no_validate: bool,

    /// Write a JSON record of every emitted decision once the match ends.
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

/// Entry point for the Rampart command-line client.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let output = BufWriter::new(io::stdout().lock());
    let diagnostics = io::stderr().lock();

    let config = args.seed.map_or_else(Config::default, Config::new);
    let options = DriverOptions {
        validate: !args.no_validate,
    };

    let mut driver = Driver::new(
        input,
        output,
        diagnostics,
        ReferenceStrategy::new(config),
        options,
    );
    let summary = driver.run().context("match aborted")?;
    log::info!(
        "answered {} turns with {} spawns and {} targets",
        summary.turns_processed(),
        summary.spawns_emitted(),
        summary.targets_emitted()
    );

    if let Some(path) = &args.summary {
        write_summary(path, &summary)?;
    }
    Ok(())
}

fn write_summary(path: &Path, summary: &MatchSummary) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)
        .with_context(|| format!("failed to write match summary to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))
}
