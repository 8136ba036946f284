// Command-line interface definitions and parsing for mailscrape

use crate::config::CliConfig;
use crate::core::constants::strategies;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workbook (.xlsx) with a URL column
    pub input: Option<PathBuf>,

    // Core Options
    /// Request timeout in seconds (default: 10)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Core Options"
    )]
    pub timeout: Option<u64>,

    /// Concurrent fetches for the pool strategy (default: 5)
    #[arg(short = 'w', long, value_name = "COUNT", help_heading = "Core Options")]
    pub workers: Option<usize>,

    /// How fetches are scheduled
    #[arg(long, value_name = "STRATEGY", value_parser = strategies::ALL, help_heading = "Core Options")]
    pub strategy: Option<String>,

    // Workbook Layout
    /// Sheet to read (default: Sheet1)
    #[arg(long, value_name = "NAME", help_heading = "Workbook Layout")]
    pub sheet: Option<String>,

    /// Column holding the URLs (default: URL)
    #[arg(long, value_name = "NAME", help_heading = "Workbook Layout")]
    pub url_column: Option<String>,

    /// Column receiving the addresses (default: Email)
    #[arg(long, value_name = "NAME", help_heading = "Workbook Layout")]
    pub email_column: Option<String>,

    /// Output file name prefix (default: output_emails)
    #[arg(long, value_name = "PREFIX", help_heading = "Workbook Layout")]
    pub output_prefix: Option<String>,

    // Extraction
    /// Also look for addresses in the visible page text
    #[arg(long, help_heading = "Extraction")]
    pub scan_text: bool,

    /// Write the failure reason next to the error marker
    #[arg(long, help_heading = "Extraction")]
    pub detailed_errors: bool,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Network
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick a workbook and run interactively until you quit
    Shell,
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert the derive-based CLI into a CliConfig
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        input: cli.input.clone(),
        timeout: cli.timeout,
        workers: cli.workers,
        strategy: cli.strategy.clone(),
        sheet: cli.sheet.clone(),
        url_column: cli.url_column.clone(),
        email_column: cli.email_column.clone(),
        output_prefix: cli.output_prefix.clone(),
        scan_text: cli.scan_text,
        detailed_errors: cli.detailed_errors,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        user_agent: cli.user_agent.clone(),
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

/// Write completions for `shell` to stdout
pub fn print_completions(shell: clap_complete::Shell, cmd: &mut clap::Command) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, &mut std::io::stdout());
}
