use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Where a run reports what it is doing.
///
/// The pipeline only talks to this trait, so it runs the same behind the
/// console, the interactive shell or a test.
pub trait ProgressSink: Send + Sync {
    /// Append one line to the progress log
    fn append_line(&self, line: &str);

    /// Report an error that ends the current run
    fn show_error(&self, message: &str);

    /// Report a finished run and where its output went
    fn show_completion(&self, output: &Path);

    /// Fetching of `total` URLs is about to start
    fn start_fetching(&self, _total: usize) {}

    /// One URL finished; `line` describes its outcome
    fn url_fetched(&self, line: &str) {
        self.append_line(line);
    }

    /// Every URL has finished
    fn finish_fetching(&self) {}
}

/// Terminal output: a progress bar with log lines printed above it.
pub struct ConsoleSink {
    multi_progress: MultiProgress,
    url_progress: Mutex<Option<ProgressBar>>,
    show_progress: bool,
    quiet: bool,
}

impl ConsoleSink {
    pub fn new(show_progress: bool, quiet: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            url_progress: Mutex::new(None),
            show_progress: show_progress && !quiet,
            quiet,
        }
    }

    /// Progress bars are only drawn on a terminal; elsewhere lines go to stdout
    fn bars_visible(&self) -> bool {
        self.show_progress && !self.multi_progress.is_hidden()
    }

    fn print(&self, line: &str) {
        if self.quiet {
            return;
        }
        if self.bars_visible() {
            self.multi_progress.println(line).unwrap_or(());
        } else {
            println!("{line}");
        }
    }

    fn bar(&self) -> Option<ProgressBar> {
        self.url_progress.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ProgressSink for ConsoleSink {
    fn append_line(&self, line: &str) {
        self.print(line);
    }

    fn show_error(&self, message: &str) {
        if let Some(pb) = self.bar() {
            pb.abandon();
        }
        eprintln!("Error: {message}");
    }

    fn show_completion(&self, output: &Path) {
        if !self.quiet {
            println!("Scraping completed successfully!");
        }
        println!("Output file: {}", output.display());
    }

    fn start_fetching(&self, total: usize) {
        if !self.bars_visible() {
            return;
        }

        let pb = self.multi_progress.add(ProgressBar::new(total as u64));
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.yellow/red}] {pos}/{len} URLs fetched ({eta})",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Fetching pages");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.url_progress.lock() {
            *guard = Some(pb);
        }
    }

    fn url_fetched(&self, line: &str) {
        self.print(line);
        if let Some(pb) = self.bar() {
            pb.inc(1);
        }
    }

    fn finish_fetching(&self) {
        if let Some(pb) = self.bar() {
            pb.finish_and_clear();
        }
    }
}

/// Everything a sink was told, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Line(String),
    Error(String),
    Completed(PathBuf),
}

/// Keeps every event in memory; for headless runs and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SinkEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Line(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn completed(&self) -> Option<PathBuf> {
        self.events().into_iter().find_map(|event| match event {
            SinkEvent::Completed(path) => Some(path),
            _ => None,
        })
    }

    fn push(&self, event: SinkEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl ProgressSink for MemorySink {
    fn append_line(&self, line: &str) {
        self.push(SinkEvent::Line(line.to_string()));
    }

    fn show_error(&self, message: &str) {
        self.push(SinkEvent::Error(message.to_string()));
    }

    fn show_completion(&self, output: &Path) {
        self.push(SinkEvent::Completed(output.to_path_buf()));
    }
}
