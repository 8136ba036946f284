use std::collections::BTreeSet;
use std::fmt;

use crate::core::constants::markers;

/// Why fetching a single page failed.
///
/// Per-URL failures never end a run; they travel as values and are turned
/// into text only when the output table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request did not finish within the configured timeout
    Timeout,
    /// The server answered with a non-success status code
    HttpStatus(u16),
    /// DNS, connection or TLS failure
    Network(String),
    /// The URL could not be turned into a request
    InvalidUrl(String),
    /// The response body could not be decoded as text
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::HttpStatus(code) => write!(f, "HTTP status {code}"),
            Self::Network(desc) => write!(f, "network error: {desc}"),
            Self::InvalidUrl(desc) => write!(f, "invalid URL: {desc}"),
            Self::Parse(desc) => write!(f, "could not read response body: {desc}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Result of fetching one URL and extracting its addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Page fetched; the set may be empty
    Emails(BTreeSet<String>),
    /// Page could not be fetched
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Addresses found, empty for failures
    pub fn emails(&self) -> impl Iterator<Item = &str> {
        let set = match self {
            Self::Emails(set) => Some(set),
            Self::Failed(_) => None,
        };
        set.into_iter().flatten().map(String::as_str)
    }

    /// Text written into the output table.
    ///
    /// With `detailed_errors` the failure kind is appended to the error marker,
    /// otherwise every failure renders as the same literal marker.
    pub fn render_cell(&self, detailed_errors: bool) -> String {
        match self {
            Self::Emails(set) if set.is_empty() => markers::NO_EMAILS_FOUND.to_string(),
            Self::Emails(set) => join_emails(set),
            Self::Failed(err) if detailed_errors => format!("{}: {err}", markers::FETCH_ERROR),
            Self::Failed(_) => markers::FETCH_ERROR.to_string(),
        }
    }

    /// Text appended to the per-URL progress line
    pub fn render_log(&self) -> String {
        match self {
            Self::Emails(set) if set.is_empty() => markers::NO_MAILS_FOUND.to_string(),
            Self::Emails(set) => join_emails(set),
            Self::Failed(err) => format!("{} ({err})", markers::FETCH_ERROR),
        }
    }
}

fn join_emails(set: &BTreeSet<String>) -> String {
    set.iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(markers::EMAIL_SEPARATOR)
}
