use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod convert;
mod decode;
mod detect;
mod encode;
mod error;
mod inspect;
mod output;
mod utils;

use error::Result;

#[derive(Parser)]
#[command(name = "condtext")]
#[command(about = "Crypto-condition text encoding toolkit", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a DER condition as text
    Encode {
        #[command(flatten)]
        config: encode::Config,
    },
    /// Decode condition text to DER
    Decode {
        #[command(flatten)]
        config: decode::Config,
    },
    /// Print the encoding of a text
    Detect {
        #[command(flatten)]
        config: detect::Config,
    },
    /// Re-encode condition text in another encoding
    Convert {
        #[command(flatten)]
        config: convert::Config,
    },
    /// Show the fields of a condition
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    match cli.command {
        Commands::Encode { config } => encode::execute(config)?,
        Commands::Decode { config } => decode::execute(config)?,
        Commands::Detect { config } => detect::execute(config)?,
        Commands::Convert { config } => convert::execute(config)?,
        Commands::Inspect { config } => inspect::execute(config)?,
    }

    Ok(())
}
