//! A streaming slicer and converter for molecular-dynamics trajectories.
//! It decodes LAMMPS dump or XYZ input one frame at a time, applies a
//! frame-selection policy (range + sampling) and optional atom-type
//! filtering/relabeling, and re-encodes to XYZ — never holding more than
//! one frame in memory.
//!
//! # Features
//!
//! - **Format auto-detection** — dump vs. XYZ, decided from the first
//!   lines of a rewindable stream
//! - **Lazy frame readers** — pull-based cursors over both grammars, with
//!   one-time column-layout discovery for the dump format
//! - **Frame selection** — inclusive `start..=end` range with a sampling
//!   rate phased relative to `start`
//! - **Atom filtering & relabeling** — keep-set of LAMMPS atom types and
//!   a type → symbol map for dump input
//! - **Constant memory** — strictly forward, single-pass, one frame at a
//!   time, with early stop once the range is exhausted
//!
//! # Quick Start
//!
//! The main entry point is [`convert`], which takes a rewindable input
//! stream, an output stream, and a [`Selection`]:
//!
//! ```
//! use std::io::Cursor;
//! use trajslice::{Selection, convert};
//!
//! let dump = "\
//! ITEM: TIMESTEP
//! 0
//! ITEM: NUMBER OF ATOMS
//! 2
//! ITEM: ATOMS type x y z
//! 1 0.0 0.0 0.0
//! 2 1.5 2.5 3.5
//! ";
//!
//! // Relabel type 2 as xenon; type 1 keeps its default symbol "1".
//! let selection = Selection {
//!     labels: [(2, "Xe".to_string())].into(),
//!     ..Selection::default()
//! };
//!
//! let mut out = Vec::new();
//! let summary = convert(Cursor::new(dump), &mut out, &selection)?;
//! assert_eq!(summary.frames_read, 1);
//! assert_eq!(summary.frames_written, 1);
//!
//! let text = String::from_utf8(out).unwrap();
//! assert_eq!(text, "2\nTimestep=0\n1 0 0 0\nXe 1.5 2.5 3.5\n");
//! # Ok::<(), trajslice::SliceError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Format detection, frame readers, the XYZ writer, and the
//!   I/O error taxonomy
//! - [`slice`] — Selection policy, filter/relabel, and the conversion
//!   driver
//! - [`model`] — The [`Atom`] and [`Frame`] value types

pub mod io;
pub mod model;
pub mod slice;

pub use model::atom::Atom;
pub use model::frame::Frame;

pub use io::{Format, TrajReader, detect_format};

pub use slice::{
    Selection, Summary, chunk_sizes, convert, convert_frames, convert_with_format,
    selected_count,
};

pub use io::Error as IoError;
pub use slice::Error as SliceError;
