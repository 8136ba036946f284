use crate::config::Config;
use crate::core::FetchOutcome;
use log::{debug, error, info, warn};
use std::path::Path;
use std::time::Duration;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Progress lines cover normal runs
    };

    // A second initialization (shell reruns, tests) keeps the first logger
    let initialized = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    if initialized.is_ok() {
        debug!("Logger initialized with level: {level:?}");
    }
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout_duration().as_secs();
    let strategy = config.strategy.as_deref().unwrap_or_default();
    let workers = config.workers.unwrap_or_default();
    let scan_text = config.scan_text.unwrap_or(false);
    let detailed_errors = config.detailed_errors.unwrap_or(false);

    info!("Configuration: strategy={strategy}, workers={workers}, timeout={timeout}s");
    info!(
        "Workbook: sheet={}, url_column={}, email_column={}, output_prefix={}",
        config.sheet(),
        config.url_column(),
        config.email_column(),
        config.output_prefix()
    );
    info!("Extraction: scan_text={scan_text}, detailed_errors={detailed_errors}");
}

/// Log the outcome of a single fetch for debugging
pub fn log_fetch_result(url: &str, outcome: &FetchOutcome) {
    if let FetchOutcome::Failed(err) = outcome {
        debug!("✗ {url} -> {err}");
        return;
    }

    match outcome.emails().count() {
        0 => debug!("· {url} -> no addresses"),
        count => debug!("✓ {url} -> {count} address(es)"),
    }
}

/// Log run completion
pub fn log_run_complete(url_count: usize, failures: usize, output: &Path, elapsed: Duration) {
    let duration_ms = elapsed.as_millis();
    if failures == 0 {
        info!(
            "✅ Run complete: {url_count} URL(s) fetched, written to {} ({duration_ms}ms)",
            output.display()
        );
    } else {
        warn!(
            "❌ Run complete: {}/{url_count} URL(s) fetched, {failures} failed, written to {} ({duration_ms}ms)",
            url_count - failures,
            output.display()
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
