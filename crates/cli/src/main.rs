//! Cache simulator CLI.
//!
//! Replays a memory trace against a set-associative LRU cache and prints
//! `hits:<n> misses:<n> evictions:<n>`. It performs:
//! 1. **Geometry:** Validates `-s/-E/-b` (or a JSON `--config`) before anything is allocated.
//! 2. **Replay:** Opens the trace (`-t`), fails loudly if it cannot, and replays it record by record.
//! 3. **Output:** Optional per-record echo (`-v`) and the summary line (or JSON with `--json`).

use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use csim_core::common::error::{ConfigError, TraceError};
use csim_core::config::CacheConfig;
use csim_core::sim::{NullObserver, ReplayObserver, ReplayReport, Simulator, TraceReader, VerboseEcho};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Set-associative LRU cache simulator",
    long_about = "Replay a memory trace against a set-associative cache with LRU replacement \
                  and report hit, miss and eviction counts.\n\nExamples:\n  \
                  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  \
                  csim -v -s 2 -E 2 -b 3 -t traces/trans.trace\n  \
                  csim --config l1.json -t traces/long.trace --json"
)]
struct Cli {
    /// Number of set index bits (S = 2^s is the number of sets).
    #[arg(
        short = 's',
        value_name = "s",
        allow_negative_numbers = true,
        required_unless_present = "config"
    )]
    set_bits: Option<i64>,

    /// Associativity (number of lines per set).
    #[arg(
        short = 'E',
        value_name = "E",
        allow_negative_numbers = true,
        required_unless_present = "config"
    )]
    ways: Option<i64>,

    /// Number of block bits (B = 2^b is the block size).
    #[arg(
        short = 'b',
        value_name = "b",
        allow_negative_numbers = true,
        required_unless_present = "config"
    )]
    block_bits: Option<i64>,

    /// Cache geometry as JSON: {"set_bits": s, "ways": E, "block_bits": b}.
    #[arg(short = 'c', long, value_name = "FILE", conflicts_with_all = ["set_bits", "ways", "block_bits"])]
    config: Option<PathBuf>,

    /// Name of the valgrind trace to replay.
    #[arg(short = 't', value_name = "tracefile")]
    trace: PathBuf,

    /// Display trace info: echo each record with its hit/miss/eviction outcomes.
    #[arg(short = 'v')]
    verbose: bool,

    /// Print the summary as a JSON object.
    #[arg(long)]
    json: bool,
}

/// Anything that ends the run with a non-zero exit code.
#[derive(Debug)]
enum Fatal {
    Config(ConfigError),
    ConfigFile(PathBuf, io::Error),
    Trace(TraceError),
    Output(io::Error),
}

impl std::fmt::Display for Fatal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::ConfigFile(path, e) => {
                write!(f, "could not read config '{}': {e}", path.display())
            }
            Self::Trace(e) => write!(f, "{e}"),
            Self::Output(e) => write!(f, "could not write output: {e}"),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli) {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs a compact stderr subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .compact()
        .init();
}

/// Resolves the geometry from `--config` or `-s/-E/-b`.
fn load_config(cli: &Cli) -> Result<CacheConfig, Fatal> {
    if let Some(path) = &cli.config {
        let text = fs::read_to_string(path).map_err(|e| Fatal::ConfigFile(path.clone(), e))?;
        return CacheConfig::from_json(&text).map_err(Fatal::Config);
    }
    // clap guarantees all three are present when --config is absent
    let (Some(s), Some(e), Some(b)) = (cli.set_bits, cli.ways, cli.block_bits) else {
        return Err(Fatal::Config(ConfigError::Parse(
            "-s, -E and -b are required without --config".to_owned(),
        )));
    };
    CacheConfig::new(s, e, b).map_err(Fatal::Config)
}

/// Validates the geometry, opens the trace, replays it and prints the summary.
fn run(cli: &Cli) -> Result<(), Fatal> {
    let config = load_config(cli)?;
    let reader = TraceReader::open(&cli.trace).map_err(Fatal::Trace)?;
    let mut sim = Simulator::new(&config).map_err(Fatal::Config)?;

    tracing::info!(
        trace = %cli.trace.display(),
        sets = config.num_sets(),
        ways = config.ways(),
        block_bytes = config.block_size(),
        "replaying trace"
    );

    let stdout = io::stdout();
    let mut observer: Box<dyn ReplayObserver> = if cli.verbose {
        Box::new(VerboseEcho::new(stdout.lock()))
    } else {
        Box::new(NullObserver)
    };
    let report = sim
        .replay(reader, observer.as_mut())
        .map_err(Fatal::Trace)?;
    drop(observer);

    print_report(&report, cli.json).map_err(Fatal::Output)
}

/// Prints the summary line and, if the replay stopped early, a note on stderr.
fn print_report(report: &ReplayReport, json: bool) -> io::Result<()> {
    if let Some(bad) = &report.halted_at {
        eprintln!("[!] Replay stopped at malformed record ({bad})");
    }

    let mut out = io::stdout().lock();
    if json {
        let text = report.summary.to_json().map_err(io::Error::other)?;
        writeln!(out, "{text}")?;
    } else {
        writeln!(out, "{}", report.summary)?;
    }
    out.flush()
}
