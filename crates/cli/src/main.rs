use std::process::ExitCode;

use clap::Parser;
use storefront_cli::{execute, Cli};
use storefront_core::config::{AppConfig, LogFormat};

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    // stdout carries the command payload
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // A config that fails to load is reported by the command itself.
    if let Ok(config) = AppConfig::load(cli.load_options()) {
        init_logging(&config);
    }

    let result = execute(cli);
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
