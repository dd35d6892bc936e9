//! plugup - update checks for GitHub-hosted WordPress plugins.

use std::process::ExitCode;

use clap::Parser;
use plugup_platform::AppPaths;

mod cli;
mod commands;
mod error;
mod logging;
mod settings;

use crate::error::AppError;
use crate::settings::Settings;

fn load_settings(cli: &cli::Cli, paths: Option<&AppPaths>) -> Result<Settings, AppError> {
    match (&cli.config, paths) {
        (Some(path), _) => Settings::load_from(path),
        (None, Some(paths)) => Settings::load(paths),
        (None, None) => Ok(Settings::default()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let paths = AppPaths::new()
        .inspect_err(|e| eprintln!("plugup: {e}, using default settings"))
        .ok();

    let settings = match load_settings(&cli, paths.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("plugup: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(
        paths.as_ref().map(|paths| paths.log_file.as_path()),
        cli.verbose || settings.debug_logging,
        settings.max_log_size_bytes,
    );

    match commands::run(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
