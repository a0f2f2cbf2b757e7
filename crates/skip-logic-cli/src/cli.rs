use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::cmd::{
    self, evaluate::EvaluateArgs, maintain::MaintainArgs, parse::ParseArgs,
    preview::PreviewArgs, serialize::SerializeArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "skip-logic",
    about = "Inspect, evaluate and maintain survey skip logic",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Engine limits as TOML (`max_reduction_iterations`, `max_expression_depth`)
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        global = true
    )]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a prefix expression into conditions for a question
    Parse(ParseArgs),
    /// Print the persisted expression form of a question's rules
    Serialize(SerializeArgs),
    /// Evaluate a question's rules against recorded answers
    Evaluate(EvaluateArgs),
    /// Re-split sections and clear stale skip-logic references
    Maintain(MaintainArgs),
    /// Build the preview screens for recorded answers
    Preview(PreviewArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    let config = cmd::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Parse(args) => cmd::parse::run(args, &config),
        Commands::Serialize(args) => cmd::serialize::run(args),
        Commands::Evaluate(args) => cmd::evaluate::run(args, &config),
        Commands::Maintain(args) => cmd::maintain::run(args),
        Commands::Preview(args) => cmd::preview::run(args, &config),
    }
}

fn init_tracing(level: LevelFilter) {
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
