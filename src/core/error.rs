use std::fmt;

/// Error types for mailscrape operations that end a run
#[derive(Debug)]
pub enum MailScrapeError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// File not found error
    FileNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// Input workbook could not be opened or read
    Workbook(calamine::XlsxError),

    /// Output workbook could not be written
    WorkbookWrite(rust_xlsxwriter::XlsxError),

    /// Requested sheet does not exist in the input workbook
    MissingSheet { sheet: String, available: Vec<String> },

    /// Header row lacks the expected column
    MissingColumn { column: String, sheet: String },

    /// Sheet has no header row at all
    EmptySheet(String),
}

impl fmt::Display for MailScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailScrapeError::Io(err) => write!(f, "IO error: {err}"),
            MailScrapeError::Config(msg) => write!(f, "Configuration error: {msg}"),
            MailScrapeError::Http(err) => write!(f, "HTTP error: {err}"),
            MailScrapeError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            MailScrapeError::FileNotFound(path) => write!(f, "File not found: {path}"),
            MailScrapeError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            MailScrapeError::Workbook(err) => write!(f, "Workbook error: {err}"),
            MailScrapeError::WorkbookWrite(err) => write!(f, "Workbook write error: {err}"),
            MailScrapeError::MissingSheet { sheet, available } => write!(
                f,
                "Missing sheet: '{sheet}' (available: {})",
                available.join(", ")
            ),
            MailScrapeError::MissingColumn { column, sheet } => {
                write!(f, "Missing column: '{column}' in sheet '{sheet}'")
            }
            MailScrapeError::EmptySheet(sheet) => {
                write!(f, "Empty sheet: '{sheet}' has no header row")
            }
        }
    }
}

impl std::error::Error for MailScrapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MailScrapeError::Io(err) => Some(err),
            MailScrapeError::Http(err) => Some(err),
            MailScrapeError::TomlParsing(err) => Some(err),
            MailScrapeError::Workbook(err) => Some(err),
            MailScrapeError::WorkbookWrite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MailScrapeError {
    fn from(err: std::io::Error) -> Self {
        MailScrapeError::Io(err)
    }
}

impl From<reqwest::Error> for MailScrapeError {
    fn from(err: reqwest::Error) -> Self {
        MailScrapeError::Http(err)
    }
}

impl From<toml::de::Error> for MailScrapeError {
    fn from(err: toml::de::Error) -> Self {
        MailScrapeError::TomlParsing(err)
    }
}

impl From<calamine::XlsxError> for MailScrapeError {
    fn from(err: calamine::XlsxError) -> Self {
        MailScrapeError::Workbook(err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for MailScrapeError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        MailScrapeError::WorkbookWrite(err)
    }
}

/// Type alias for Results using MailScrapeError
pub type Result<T> = std::result::Result<T, MailScrapeError>;
