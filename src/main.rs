use std::process::ExitCode;

use anyhow::{Context, Result};

use theme_check::config::Config;
use theme_check::{Severity, ThemeChecker, ValidatorRecord, cancellation};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Parse configuration from command line and config file
    let config = Config::from_args_and_env()?;

    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    if let Some(path) = &config.config_path {
        log::debug!("Loaded config from {}", path.display());
    }

    // Ctrl-C stops the analyzer instead of leaving it running
    let (cancel, cancellation) = cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let checker = ThemeChecker::new(config.analyzer.clone());
    let records = checker
        .check_with_cancellation(&config.theme_dir, &config.options, cancellation)
        .await
        .with_context(|| format!("Theme check failed for {}", config.theme_dir.display()))?;

    let report = if config.options.prettify {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{}", report);

    if config.options.warning {
        log_summary(&records);
    }

    if count(&records, Severity::Error) > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn count(records: &[ValidatorRecord], severity: Severity) -> usize {
    records
        .iter()
        .flat_map(|record| record.diagnostics())
        .filter(|d| d.severity == severity)
        .count()
}

fn log_summary(records: &[ValidatorRecord]) {
    let errors = count(records, Severity::Error);
    let warnings = count(records, Severity::Warning);
    let info = count(records, Severity::Info);

    if errors > 0 || warnings > 0 {
        log::warn!(
            "{} error(s), {} warning(s), {} info across {} validator(s)",
            errors,
            warnings,
            info,
            records.len()
        );
    } else {
        log::info!(
            "No errors or warnings, {} info across {} validator(s)",
            info,
            records.len()
        );
    }
}
