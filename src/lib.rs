//! Collect `mailto:` addresses for every URL listed in a spreadsheet.
//!
//! A run reads the `URL` column of an `.xlsx` workbook, fetches every page
//! concurrently, extracts the addresses of its `mailto:` links and writes the
//! original rows plus an `Email` column to a new, timestamped workbook.

pub mod config;
pub mod core;
pub mod extraction;
pub mod fetching;
pub mod logging;
pub mod pipeline;
pub mod ui;
pub mod workbook;

// Re-export commonly used items
pub use config::{CliConfig, Config, Strategy};
pub use crate::core::constants;
pub use crate::core::{FetchError, FetchOutcome, MailScrapeError, Result};
pub use extraction::{ExtractEmails, Extractor};
pub use fetching::{BoundedPool, DriveFetches, FetchPage, HttpFetcher, UnboundedJoin};
pub use pipeline::{RunReport, run, run_with};
pub use ui::{ConsoleSink, MemorySink, ProgressSink};
