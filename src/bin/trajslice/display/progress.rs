use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Per-frame progress on stderr. The frame count is not known up front
/// (the input is streamed in one pass), so this is a spinner with a live
/// read/written counter rather than a bounded bar.
pub struct FrameSpinner {
    bar: ProgressBar,
    start: Instant,
    read: u64,
    written: u64,
}

impl FrameSpinner {
    fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .expect("invalid template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message("reading frames...");

        Self {
            bar,
            start: Instant::now(),
            read: 0,
            written: 0,
        }
    }

    fn frame(&mut self, index: usize, written: bool) {
        self.read = index as u64 + 1;
        if written {
            self.written += 1;
        }
        self.bar.set_message(format!(
            "{} frames read · {} written",
            self.read, self.written
        ));
    }

    fn finish(self) {
        self.bar.finish_and_clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.2}s",
            format!("{} frames read, {} written", self.read, self.written),
            self.start.elapsed().as_secs_f64()
        );
    }
}

pub enum Progress {
    Interactive(FrameSpinner),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool) -> Self {
        if interactive {
            Self::Interactive(FrameSpinner::new())
        } else {
            Self::Silent
        }
    }

    pub fn frame(&mut self, index: usize, written: bool) {
        if let Self::Interactive(s) = self {
            s.frame(index, written);
        }
    }

    pub fn finish(self) {
        if let Self::Interactive(s) = self {
            s.finish();
        }
    }
}
