use clap::Parser;
use std::path::PathBuf;

/// Gray Fingering - guarded recon orchestrator (safe by default)
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target domain (authorized only)
    #[arg(long)]
    pub target: String,

    /// Run the full pipeline
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Max parallel threads (accepted, stages still run one after another)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..), default_value_t = 4)]
    pub threads: u16,

    /// Path to signed authorization file
    #[arg(long)]
    pub auth: PathBuf,

    /// Try installing missing tools if real execution is enabled
    #[arg(long, default_value_t = false)]
    pub try_install: bool,

    /// Base directory for the timestamped output directory (default: current directory)
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
