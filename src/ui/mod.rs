//! User interface and interaction
//!
//! This module contains CLI parsing, the progress sinks a run reports
//! through, and the interactive shell.

pub mod cli;
pub mod progress;
pub mod shell;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config, print_completions};
pub use progress::{ConsoleSink, MemorySink, ProgressSink, SinkEvent};
pub use shell::{ShellError, run_shell};
