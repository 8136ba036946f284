/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal strings and numbers used across the
/// application, making them easier to maintain and modify.
/// Timeout and duration constants
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
    /// Maximum reasonable timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
    /// Minimum timeout in seconds
    pub const MIN_TIMEOUT_SECONDS: u64 = 1;
}

/// Concurrency strategy constants
pub mod strategies {
    /// Bounded worker pool, at most `workers` fetches in flight
    pub const POOL: &str = "pool";
    /// Every fetch launched at once and joined, no cap
    pub const UNBOUNDED: &str = "unbounded";

    /// Default strategy
    pub const DEFAULT: &str = POOL;

    /// All valid strategies
    pub const ALL: [&str; 2] = [POOL, UNBOUNDED];

    /// Default number of concurrent workers for the pool strategy
    pub const DEFAULT_WORKERS: usize = 5;
    /// Upper bound on configured workers
    pub const MAX_WORKERS: usize = 1000;
}

/// Spreadsheet layout constants
pub mod workbook {
    /// Sheet read from the input workbook and written to the output workbook
    pub const DEFAULT_SHEET: &str = "Sheet1";
    /// Column holding the URLs to fetch
    pub const DEFAULT_URL_COLUMN: &str = "URL";
    /// Column receiving the extracted addresses
    pub const DEFAULT_EMAIL_COLUMN: &str = "Email";
    /// Default output file name prefix
    pub const OUTPUT_PREFIX: &str = "output_emails";
    /// Extension of input and output workbooks
    pub const EXTENSION: &str = "xlsx";
    /// chrono format for the timestamp embedded in output file names
    pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
    /// Number format for date cells carried from input to output
    pub const DATE_FORMAT: &str = "yyyy-mm-dd";
    /// Number format for date cells with a time of day
    pub const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
}

/// Text rendered into the output table and the progress log
pub mod markers {
    /// Email cell when a page had no mailto links
    pub const NO_EMAILS_FOUND: &str = "No emails found";
    /// Progress line suffix when a page had no mailto links
    pub const NO_MAILS_FOUND: &str = "No mails found";
    /// Email cell and progress line suffix when a fetch failed
    pub const FETCH_ERROR: &str = "Error fetching email";
    /// Separator between addresses in one cell
    pub const EMAIL_SEPARATOR: &str = ", ";
    /// chrono format for start/finish lines in the progress log
    pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// Extraction constants
pub mod extraction {
    /// Scheme prefix of email links
    pub const MAILTO_PREFIX: &str = "mailto:";
    /// Selector matching every anchor that carries an href
    pub const ANCHOR_SELECTOR: &str = "a[href]";
    /// Pattern used by the optional free-text scan
    pub const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
}

/// Configuration file constants
pub mod config_files {
    /// Config file name looked up in the working directory and its parents
    pub const FILE_NAME: &str = ".mailscrape.toml";
    /// How many parent directories are searched for a config file
    pub const PARENT_SEARCH_DEPTH: usize = 3;
}
