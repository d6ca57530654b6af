mod banner;
mod error;
mod progress;
mod summary;

use std::io::{self, Write};

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use summary::{print_chunk_summary, print_summary};

#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: crate::io::stderr_is_tty(),
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        if quiet { Self { interactive: false } } else { self }
    }
}

pub fn print_warning(message: &str) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "  \x1b[33m!\x1b[0m {message}");
}
