mod cli;
mod commands;
mod config;
mod paths;

use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use log::error;
use simplelog::ColorChoice;
use simplelog::CombinedLogger;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SharedLogger;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

use crate::cli::Cli;
use crate::config::Settings;

/// Logs to the cache directory, and to stderr with `--verbose`.
fn init_logging(verbose: bool) {
    paths::rotate_logs();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if let Some(file) = paths::log_file().and_then(|path| File::create(path).ok()) {
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }
    if verbose {
        loggers.push(TermLogger::new(
            LevelFilter::Debug,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    let _ = CombinedLogger::init(loggers);
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Some(path) = dotenv {
        debug!("loaded environment from {}", path.display());
    }

    let settings = Settings::from_cli(&cli);
    let result = match settings.client() {
        Ok(client) => commands::run(client, cli.command).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
