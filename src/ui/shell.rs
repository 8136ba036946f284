//! Interactive shell for mailscrape
//!
//! Asks for an input workbook, runs the scrape with progress lines,
//! and keeps asking for more files until the user is done.

use crate::config::Config;
use crate::core::constants::workbook;
use crate::pipeline;
use crate::ui::progress::{ConsoleSink, ProgressSink};
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors that end the interactive shell
#[derive(Debug)]
pub enum ShellError {
    /// Dialoguer interaction error (closed stdin, not a terminal)
    Dialog(dialoguer::Error),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dialog(e) => write!(f, "Dialog error: {}", e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dialog(e) => Some(e),
        }
    }
}

impl From<dialoguer::Error> for ShellError {
    fn from(error: dialoguer::Error) -> Self {
        Self::Dialog(error)
    }
}

/// Result type for shell operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Why a chosen path cannot be used as input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputProblem {
    NotSelected,
    WrongExtension,
}

impl fmt::Display for InputProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSelected => write!(f, "Please select an input file."),
            Self::WrongExtension => write!(
                f,
                "Please select an Excel file (*.{}).",
                workbook::EXTENSION
            ),
        }
    }
}

/// Check the answer to the file prompt before starting a run
pub fn check_input(answer: &str) -> Result<PathBuf, InputProblem> {
    let answer = answer.trim().trim_matches(['"', '\'']);
    if answer.is_empty() {
        return Err(InputProblem::NotSelected);
    }

    let path = PathBuf::from(answer);
    let is_xlsx = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(workbook::EXTENSION));
    if !is_xlsx {
        return Err(InputProblem::WrongExtension);
    }

    Ok(path)
}

/// Run the shell until the user declines another run
pub async fn run_shell(mut config: Config) -> ShellResult<()> {
    let theme = ColorfulTheme::default();
    let sink = ConsoleSink::new(true, false);

    println!("Email Scraper");
    println!("Collects mailto: addresses for every URL in a workbook.\n");

    loop {
        let path = match prompt_for_input(&theme, config.input.as_deref())? {
            Ok(path) => path,
            Err(problem) => {
                sink.show_error(&problem.to_string());
                continue;
            }
        };

        let start = Confirm::with_theme(&theme)
            .with_prompt(format!("Start scraping {}?", path.display()))
            .default(true)
            .interact()?;

        if start {
            config.input = Some(path);
            // Failures are already reported through the sink
            let _ = pipeline::run(&config, &sink).await;
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Scrape another file?")
            .default(false)
            .interact()?;
        if !again {
            return Ok(());
        }
    }
}

fn prompt_for_input(
    theme: &ColorfulTheme,
    previous: Option<&Path>,
) -> ShellResult<Result<PathBuf, InputProblem>> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(format!("Select input Excel file (*.{})", workbook::EXTENSION))
        .allow_empty(true);
    if let Some(previous) = previous {
        input = input.with_initial_text(previous.display().to_string());
    }

    let answer = input.interact_text()?;
    Ok(check_input(&answer))
}
