mod commands;
mod obs;
mod output;

use clap::{Parser, Subcommand};
use commands::Command;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "courtside")]
#[command(about = "Courtside CLI", version, arg_required_else_help = true)]
#[command(
    after_help = "Examples:\n  courtside run --config configs/sample.toml --player anthony_edwards\n  courtside batch --config configs/sample.toml\n  courtside validate --config configs/sample.toml --player anthony_edwards\n  courtside ids --config configs/sample.toml --set anthony_edwards=1630162\n"
)]
struct Cli {
    /// Log filter when COURTSIDE_LOG is not set (e.g. info, debug).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Log output format: text or json.
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
    /// Expose Prometheus metrics on host:port.
    #[arg(long, global = true)]
    metrics_addr: Option<String>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Build the merged per-game sentiment table for one player.
    Run {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        player: String,
    },
    /// Process every player discovered in the sentiment directory.
    Batch {
        #[arg(long)]
        config: PathBuf,
    },
    /// Load both sources for one player and print the quality reports.
    Validate {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        player: String,
    },
    /// Inspect or extend the player id cache (--set slug=id).
    Ids {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        set: Vec<String>,
    },
}

fn main() {
    output::print_banner();
    let cli = Cli::parse();

    if let Err(err) = obs::init_tracing(&cli.log_level, &cli.log_format) {
        eprintln!("error: {}", err);
        std::process::exit(2);
    }
    if let Err(err) = obs::init_metrics(cli.metrics_addr.as_deref()) {
        eprintln!("error: {}", err);
        std::process::exit(2);
    }

    let command = match cli.command {
        CliCommand::Run { config, player } => Command::Run { config, player },
        CliCommand::Batch { config } => Command::Batch { config },
        CliCommand::Validate { config, player } => Command::Validate { config, player },
        CliCommand::Ids { config, set } => Command::Ids { config, set },
    };

    if let Err(err) = commands::run(command) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
