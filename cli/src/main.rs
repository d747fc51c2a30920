
mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{report, summary};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    match &cli.command {
        Commands::Summary(args) => summary::run(&cli, args),
        Commands::Report(args) => report::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
