//! Trajectory I/O: format detection, per-format frame readers, and the
//! XYZ writer.
//!
//! Both readers are lazy, forward-only cursors: `next_frame` decodes one
//! frame on demand and `Ok(None)` marks clean end-of-stream. A reader is
//! not restartable mid-stream; reconstruct it over a fresh stream position
//! instead.

use std::fmt;
use std::io::BufRead;

pub mod detect;
pub mod error;
pub mod lammps;
pub mod xyz;

pub use detect::detect_format;
pub use error::Error;
pub use lammps::reader::DumpReader;
pub use xyz::reader::XyzReader;

use crate::model::frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Tag-delimited LAMMPS dump format (`ITEM:` sections).
    LammpsDump,
    /// Fixed-layout XYZ format (count, comment, atom lines).
    Xyz,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::LammpsDump => write!(f, "LAMMPS dump"),
            Format::Xyz => write!(f, "XYZ"),
        }
    }
}

/// Frame reader for either input grammar.
pub enum TrajReader<R: BufRead> {
    Dump(DumpReader<R>),
    Xyz(XyzReader<R>),
}

impl<R: BufRead> TrajReader<R> {
    pub fn new(reader: R, format: Format) -> Self {
        match format {
            Format::LammpsDump => Self::Dump(DumpReader::new(reader)),
            Format::Xyz => Self::Xyz(XyzReader::new(reader)),
        }
    }

    /// Decodes the next frame, or `Ok(None)` at end-of-stream.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        match self {
            Self::Dump(r) => r.next_frame(),
            Self::Xyz(r) => r.next_frame(),
        }
    }
}
