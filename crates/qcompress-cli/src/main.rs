//! qcompress Command-Line Interface
//!
//! Builds compression-model circuits from OpenQASM input, checks their
//! swap-test structure, and turns measured counts into overlap estimates.
//!
//! ```text
//! qcompress build   -i bell.qasm -o bell_compression.qasm
//! qcompress inspect -i bell_compression.qasm --format json
//! qcompress overlap --counts counts.json --bit 0
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::OutputFormat;
use commands::{build, inspect, overlap, version};

/// qcompress - compression-model circuits verified by a swap test
#[derive(Parser)]
#[command(name = "qcompress")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the compression-model circuit for a QASM circuit
    Build {
        /// Input file (OpenQASM 3 or 2)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit OpenQASM 2.0 instead of 3.0
        #[arg(long)]
        qasm2: bool,

        /// Naming configuration (YAML)
        #[arg(short, long, env = "QCOMPRESS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Report the swap-test structure of a QASM circuit
    Inspect {
        /// Input file (OpenQASM 3 or 2)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Naming configuration (YAML)
        #[arg(short, long, env = "QCOMPRESS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Estimate the state overlap from swap-test results
    #[command(group(ArgGroup::new("source").required(true).args(["counts", "ones"])))]
    Overlap {
        /// Counts file: JSON object mapping bitstrings to counts
        #[arg(long, conflicts_with_all = ["ones", "shots"])]
        counts: Option<PathBuf>,

        /// Position of the result bit (0 = rightmost)
        #[arg(long, default_value_t = 0)]
        bit: usize,

        /// Number of shots where the result bit was 1
        #[arg(long, requires = "shots")]
        ones: Option<u64>,

        /// Total number of shots
        #[arg(long, requires = "ones")]
        shots: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Build {
            input,
            output,
            qasm2,
            config,
        } => build::execute(&input, output.as_deref(), qasm2, config.as_deref()),

        Commands::Inspect {
            input,
            format,
            config,
        } => inspect::execute(&input, format, config.as_deref()),

        Commands::Overlap {
            counts,
            bit,
            ones,
            shots,
            format,
        } => match (counts, ones, shots) {
            (Some(path), _, _) => overlap::execute_counts(&path, bit, format),
            (None, Some(ones), Some(shots)) => overlap::execute_tally(ones, shots, format),
            _ => Err(anyhow::anyhow!(
                "either --counts or both --ones and --shots are required"
            )),
        },

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
