use std::fmt::Write as _;
use std::path::Path;

use log::info;
use plugup_core::{
    HttpReleaseHost, InstalledVersions, ScanOutcome, ScanReport, Scanner, UpdateTransient,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::cli::{CheckArgs, Commands, ScanArgs};
use crate::error::AppError;
use crate::settings::Settings;

pub async fn run(command: Commands, settings: &Settings) -> Result<(), AppError> {
    match command {
        Commands::Check(args) => check(&args, settings).await,
        Commands::Scan(args) => scan(&args, settings).await,
        Commands::Plugins => write_output(None, &render_plugins(settings)).await,
    }
}

fn scanner(settings: &Settings) -> Result<Scanner<HttpReleaseHost>, AppError> {
    let host =
        HttpReleaseHost::new(&settings.http_options()).map_err(AppError::http_client_unavailable)?;
    Ok(Scanner::new(host, settings.layout())
        .with_max_concurrent_checks(settings.max_concurrent_checks))
}

async fn check(args: &CheckArgs, settings: &Settings) -> Result<(), AppError> {
    let input_name = describe(args.input.as_deref(), "stdin");
    let raw = read_input(args.input.as_deref()).await?;
    let mut transient: UpdateTransient = serde_json::from_str(&raw)
        .map_err(|e| AppError::input_read_failed(input_name.clone(), e))?;

    let report = scanner(settings)?
        .scan(&settings.plugins, &transient.installed())
        .await;
    let written = transient.apply(&report);
    info!("Merged {written} update(s) into transient from {input_name}");

    let output_name = describe(args.output.as_deref(), "stdout");
    let mut json = serde_json::to_string_pretty(&transient)
        .map_err(|e| AppError::output_write_failed(output_name, e))?;
    json.push('\n');
    write_output(args.output.as_deref(), &json).await
}

async fn scan(args: &ScanArgs, settings: &Settings) -> Result<(), AppError> {
    let installed_name = args.installed.display().to_string();
    let raw = read_input(Some(args.installed.as_path())).await?;
    let installed: InstalledVersions = serde_json::from_str(&raw)
        .map_err(|e| AppError::input_read_failed(installed_name, e))?;

    let report = scanner(settings)?.scan(&settings.plugins, &installed).await;

    let rendered = if args.json {
        let mut json = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::output_write_failed("stdout", e))?;
        json.push('\n');
        json
    } else {
        render_report(&report)
    };
    write_output(None, &rendered).await
}

fn describe(path: Option<&Path>, fallback: &str) -> String {
    path.map_or_else(|| fallback.to_string(), |path| path.display().to_string())
}

async fn read_input(path: Option<&Path>) -> Result<String, AppError> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::input_read_failed(path.display().to_string(), e)),
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .map_err(|e| AppError::input_read_failed("stdin", e))?;
            Ok(raw)
        }
    }
}

async fn write_output(path: Option<&Path>, content: &str) -> Result<(), AppError> {
    match path {
        Some(path) => tokio::fs::write(path, content)
            .await
            .map_err(|e| AppError::output_write_failed(path.display().to_string(), e)),
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(content.as_bytes())
                .await
                .map_err(|e| AppError::output_write_failed("stdout", e))?;
            stdout
                .flush()
                .await
                .map_err(|e| AppError::output_write_failed("stdout", e))
        }
    }
}

fn render_report(report: &ScanReport) -> String {
    let mut out = String::new();
    for entry in &report.reports {
        let detail = match &entry.outcome {
            ScanOutcome::Offered(offer) => format!(": {} ({})", offer.new_version, offer.package),
            ScanOutcome::SkippedNoInstalledVersion => String::new(),
            ScanOutcome::SkippedMetadataFetchFailed { reason } => format!(": {reason}"),
            ScanOutcome::SkippedArtifactMissing { package, reason } => {
                format!(": {package} ({reason})")
            }
            ScanOutcome::SkippedNoNewerVersion { installed, remote } => {
                format!(": installed {installed}, remote {remote}")
            }
        };
        let _ = writeln!(out, "{}  {}{detail}", entry.slug, entry.outcome.label());
    }
    let _ = writeln!(
        out,
        "{} of {} plugin(s) have updates",
        report.offer_count(),
        report.reports.len()
    );
    out
}

fn render_plugins(settings: &Settings) -> String {
    let layout = settings.layout();
    let mut out = String::new();
    for plugin in &settings.plugins {
        let _ = writeln!(out, "{}  {}", plugin.slug(), layout.metadata_url(plugin));
    }
    out
}
