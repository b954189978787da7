//! Terminal progress bar fed by the conversion and import callbacks.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{msg:>9} [{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%)";

/// A progress bar on stderr. Nothing is drawn when stderr is not a terminal.
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_message(label.to_string());
        Self { bar }
    }

    pub fn update(&self, processed: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(processed as u64);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
