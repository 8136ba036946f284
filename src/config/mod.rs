//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{config_files, strategies, timeouts, workbook};
use crate::core::error::{MailScrapeError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Input workbook; usually supplied on the command line or by the shell
    pub input: Option<PathBuf>,

    /// Timeout in seconds for each HTTP request
    pub timeout: Option<u64>,

    /// Concurrent fetches for the pool strategy
    pub workers: Option<usize>,

    /// Concurrency strategy (pool, unbounded)
    pub strategy: Option<String>,

    /// Sheet to read from the input workbook
    pub sheet: Option<String>,

    /// Header of the column holding the URLs
    pub url_column: Option<String>,

    /// Header of the column receiving the addresses
    pub email_column: Option<String>,

    /// Output file name prefix, followed by a timestamp
    pub output_prefix: Option<String>,

    /// Also scan visible page text for addresses
    pub scan_text: Option<bool>,

    /// Write the failure kind next to the error marker
    pub detailed_errors: Option<bool>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            workers: Some(strategies::DEFAULT_WORKERS),
            strategy: Some(strategies::DEFAULT.to_string()),
            sheet: Some(workbook::DEFAULT_SHEET.to_string()),
            url_column: Some(workbook::DEFAULT_URL_COLUMN.to_string()),
            email_column: Some(workbook::DEFAULT_EMAIL_COLUMN.to_string()),
            output_prefix: Some(workbook::OUTPUT_PREFIX.to_string()),
            scan_text: Some(false),
            detailed_errors: Some(false),
            user_agent: None,
            verbose: Some(false),
        }
    }
}

/// How fetches are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// At most `workers` fetches in flight
    Pool { workers: usize },
    /// Every fetch in flight at once
    Unbounded,
}

impl Config {
    /// Load configuration from file, falling back to defaults for absent keys
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MailScrapeError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let partial: Config = toml::from_str(&content).map_err(|e| {
            MailScrapeError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::default();
        config.overlay(partial);
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(config_files::FILE_NAME) {
            return config;
        }

        for i in 1..=config_files::PARENT_SEARCH_DEPTH {
            let path = format!("{}{}", "../".repeat(i), config_files::FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Copy every value set in `other` onto self
    fn overlay(&mut self, other: Config) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            input,
            timeout,
            workers,
            strategy,
            sheet,
            url_column,
            email_column,
            output_prefix,
            scan_text,
            detailed_errors,
            user_agent,
            verbose
        );
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref input) = cli_config.input {
            self.input = Some(input.clone());
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }

        // Concurrency
        if let Some(workers) = cli_config.workers {
            self.workers = Some(workers);
        }
        if let Some(ref strategy) = cli_config.strategy {
            self.strategy = Some(strategy.clone());
        }

        // Workbook layout
        if let Some(ref sheet) = cli_config.sheet {
            self.sheet = Some(sheet.clone());
        }
        if let Some(ref url_column) = cli_config.url_column {
            self.url_column = Some(url_column.clone());
        }
        if let Some(ref email_column) = cli_config.email_column {
            self.email_column = Some(email_column.clone());
        }
        if let Some(ref output_prefix) = cli_config.output_prefix {
            self.output_prefix = Some(output_prefix.clone());
        }

        // Extraction & output
        if cli_config.scan_text {
            self.scan_text = Some(true);
        }
        if cli_config.detailed_errors {
            self.detailed_errors = Some(true);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }

        // Network
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Resolve the configured concurrency strategy
    pub fn strategy(&self) -> Result<Strategy> {
        let workers = self.workers.unwrap_or(strategies::DEFAULT_WORKERS);
        match self.strategy.as_deref().unwrap_or(strategies::DEFAULT) {
            strategies::POOL => Ok(Strategy::Pool { workers }),
            strategies::UNBOUNDED => Ok(Strategy::Unbounded),
            other => Err(MailScrapeError::Config(format!(
                "Invalid strategy '{other}'. Expected one of: {}.",
                strategies::ALL.join(", ")
            ))),
        }
    }

    pub fn sheet(&self) -> &str {
        self.sheet.as_deref().unwrap_or(workbook::DEFAULT_SHEET)
    }

    pub fn url_column(&self) -> &str {
        self.url_column
            .as_deref()
            .unwrap_or(workbook::DEFAULT_URL_COLUMN)
    }

    pub fn email_column(&self) -> &str {
        self.email_column
            .as_deref()
            .unwrap_or(workbook::DEFAULT_EMAIL_COLUMN)
    }

    pub fn output_prefix(&self) -> &str {
        self.output_prefix
            .as_deref()
            .unwrap_or(workbook::OUTPUT_PREFIX)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout < timeouts::MIN_TIMEOUT_SECONDS {
                return Err(MailScrapeError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(MailScrapeError::Config(format!(
                    "Timeout of {timeout} seconds is larger than the maximum of {} seconds.",
                    timeouts::MAX_TIMEOUT_SECONDS
                )));
            }
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(MailScrapeError::Config(
                    "Worker count cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if workers > strategies::MAX_WORKERS {
                return Err(MailScrapeError::Config(format!(
                    "Worker count of {workers} is extremely high. Expected at most {}.",
                    strategies::MAX_WORKERS
                )));
            }
        }

        self.strategy()?;

        let names = [
            ("sheet", &self.sheet),
            ("url_column", &self.url_column),
            ("email_column", &self.email_column),
            ("output_prefix", &self.output_prefix),
        ];
        for (key, value) in names {
            if let Some(value) = value
                && value.trim().is_empty()
            {
                return Err(MailScrapeError::Config(format!("'{key}' cannot be empty.")));
            }
        }

        if let Some(ref prefix) = self.output_prefix
            && prefix.contains(['/', '\\'])
        {
            return Err(MailScrapeError::Config(format!(
                "Output prefix '{prefix}' must be a file name, not a path."
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub input: Option<PathBuf>,
    pub timeout: Option<u64>, // --timeout

    // Concurrency
    pub workers: Option<usize>,   // --workers
    pub strategy: Option<String>, // --strategy

    // Workbook layout
    pub sheet: Option<String>,         // --sheet
    pub url_column: Option<String>,    // --url-column
    pub email_column: Option<String>,  // --email-column
    pub output_prefix: Option<String>, // --output-prefix

    // Extraction & output
    pub scan_text: bool,       // --scan-text
    pub detailed_errors: bool, // --detailed-errors
    pub quiet: bool,           // --quiet
    pub verbose: bool,         // --verbose
    pub no_progress: bool,     // --no-progress

    // Network
    pub user_agent: Option<String>, // --user-agent

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
