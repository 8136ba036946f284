//! One scrape run: read the workbook, fetch every URL, write the results.

use chrono::Local;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::core::constants::markers;
use crate::core::{FetchOutcome, MailScrapeError, Result};
use crate::fetching::{FetchPage, HttpFetcher};
use crate::logging;
use crate::ui::progress::ProgressSink;
use crate::workbook::{self, Table};

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Workbook that was written
    pub output: PathBuf,
    /// One outcome per input row, in row order
    pub outcomes: Vec<FetchOutcome>,
    /// The table that was written
    pub table: Table,
    /// Wall-clock time of the whole run
    pub elapsed: Duration,
}

impl RunReport {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

/// Run the pipeline over HTTP.
///
/// Terminal errors (missing input, unreadable workbook, failed write) are
/// reported to the sink and returned; per-URL failures end up in the table.
pub async fn run(config: &Config, sink: &dyn ProgressSink) -> Result<RunReport> {
    let fetcher = match HttpFetcher::new(config) {
        Ok(fetcher) => fetcher,
        Err(err) => return Err(report(sink, err)),
    };
    run_with(config, &fetcher, sink).await
}

/// Run the pipeline with any fetcher
pub async fn run_with(
    config: &Config,
    fetcher: &dyn FetchPage,
    sink: &dyn ProgressSink,
) -> Result<RunReport> {
    execute(config, fetcher, sink)
        .await
        .map_err(|err| report(sink, err))
}

fn report(sink: &dyn ProgressSink, err: MailScrapeError) -> MailScrapeError {
    logging::log_error("Run failed", Some(&err));
    sink.show_error(&err.to_string());
    err
}

async fn execute(
    config: &Config,
    fetcher: &dyn FetchPage,
    sink: &dyn ProgressSink,
) -> Result<RunReport> {
    config.validate()?;
    let input_path = config.input.as_deref().ok_or_else(|| {
        MailScrapeError::InvalidArgument("Please select an input file.".to_string())
    })?;
    let driver = config.strategy()?.driver();

    let input = workbook::read_input(input_path, config.sheet(), config.url_column())?;

    let started_at = Local::now();
    let clock = Instant::now();
    let output = workbook::output_path(input_path, config.output_prefix(), &started_at);

    logging::log_config_info(config);
    sink.append_line(&format!(
        "Starting scraping at {}",
        started_at.format(markers::LOG_TIMESTAMP_FORMAT)
    ));

    sink.start_fetching(input.urls.len());
    let outcomes = driver
        .drive(fetcher, &input.urls, &mut |_, url, outcome| {
            logging::log_fetch_result(url, outcome);
            sink.url_fetched(&format!("fetched {url}: {}", outcome.render_log()));
        })
        .await;
    sink.finish_fetching();

    let detailed_errors = config.detailed_errors.unwrap_or(false);
    let cells = outcomes
        .iter()
        .map(|outcome| outcome.render_cell(detailed_errors))
        .collect();
    let table = input.table.with_column(config.email_column(), cells)?;
    workbook::write_table(&table, &output, config.sheet())?;

    let elapsed = clock.elapsed();
    sink.append_line(&format!(
        "Finished scraping at {}",
        Local::now().format(markers::LOG_TIMESTAMP_FORMAT)
    ));
    sink.append_line(&format!(
        "Total duration: {:.2} seconds",
        elapsed.as_secs_f64()
    ));

    let report = RunReport {
        output,
        outcomes,
        table,
        elapsed,
    };
    logging::log_run_complete(
        report.outcomes.len(),
        report.failures(),
        &report.output,
        elapsed,
    );
    sink.show_completion(&report.output);
    Ok(report)
}
