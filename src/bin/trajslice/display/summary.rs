use std::io::{self, Write};
use std::path::PathBuf;

use trajslice::Summary;

pub fn print_summary(summary: &Summary) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "  Input format    {}", summary.format);
    let _ = writeln!(stderr, "  Frames read     {}", summary.frames_read);
    let _ = writeln!(stderr, "  Frames written  {}", summary.frames_written);
    let _ = writeln!(stderr);
}

pub fn print_chunk_summary(chunks: &[(PathBuf, usize)]) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr);
    for (path, frames) in chunks {
        let _ = writeln!(stderr, "  {:>5} frames → {}", frames, path.display());
    }
    let _ = writeln!(stderr);
}
