mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use ksv_config::Config;

use cli::{Cli, Commands};
use commands::Settings;

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the document
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config(cmd)) => commands::config::handle(cmd, cli.config.as_deref()),
        Some(Commands::Completions { shell }) => commands::completions::handle(shell),
        command => {
            let config = Config::load(cli.config.as_deref()).context("Cannot load config")?;
            let settings = Settings::resolve(cli.output, cli.on_decode_error, &config);
            let file = cli.file.as_deref();

            match command {
                Some(Commands::Encode) => commands::encode::handle(file, &settings),
                Some(Commands::Decode { string_data }) => {
                    let string_data = string_data || config.decode.string_data;
                    commands::decode::handle(file, string_data, &settings)
                }
                Some(Commands::Add { key, value }) => {
                    commands::add::handle(file, &key, &value, &settings)
                }
                // No subcommand: plain decode, data stays in place
                _ => commands::decode::handle(file, false, &settings),
            }
        }
    }
}
