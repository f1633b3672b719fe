use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pagetext_core::ExtractProgress;

/// Page progress bar on stderr. Draws nothing when stderr is not a terminal.
pub struct ExtractionBar {
    bar: ProgressBar,
}

impl ExtractionBar {
    pub fn new(input_name: &str) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(spinner_style());
        bar.set_message(format!("Opening {input_name}..."));
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn update(&self, event: &ExtractProgress) {
        match *event {
            ExtractProgress::Opened { pages } => {
                self.bar.set_length(pages as u64);
                self.bar.set_style(page_style());
                self.bar.set_message("Extracting pages");
            }
            ExtractProgress::Page { index, .. } => {
                self.bar.set_position(index as u64 + 1);
            }
            ExtractProgress::Finished { .. } => {
                self.bar.finish_and_clear();
            }
        }
    }

    /// Remove the bar if extraction stopped before finishing.
    pub fn clear(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn page_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg} [{bar:40.green/dim}] {pos}/{len} pages")
        .map(|s| s.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
