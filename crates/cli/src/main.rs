use anyhow::Result;
use boncode_cli::cli::Cli;
use clap::Parser;
use env_logger::init;

fn main() -> Result<()> {
    init();
    Cli::parse().command.run()
}
