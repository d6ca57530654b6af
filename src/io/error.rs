use super::Format;
use thiserror::Error;

/// Errors raised while detecting, decoding, or writing trajectory data.
///
/// Every variant is terminal for the current conversion: the driver
/// surfaces the first error encountered and stops. There is no
/// skip-bad-frame recovery mode; a malformed frame never silently
/// produces a trajectory with missing or misaligned frames.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The start of the stream matches neither the dump nor the XYZ grammar.
    #[error(
        "unrecognized trajectory format: input starts with neither 'ITEM: TIMESTEP' nor an atom count"
    )]
    UnrecognizedFormat,

    /// A structural protocol violation: a missing or misplaced tag line,
    /// an unparseable count, or an atoms header that disagrees with the
    /// layout discovered on the first frame.
    #[error("failed to parse {format} data: {details} (at line {line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    /// The dump atoms header lacks one of the required columns.
    #[error("could not find x, y, z, or type columns in the atoms header (at line {line})")]
    MissingColumns { line: usize },

    /// An atom record did not parse as the expected numeric types, or a
    /// frame ended before its declared atom count was reached.
    #[error("failed to decode atom record in frame {frame}: {details} (at line {line})")]
    AtomDecode {
        frame: usize,
        line: usize,
        details: String,
    },
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn atom_decode(frame: usize, line: usize, details: impl Into<String>) -> Self {
        Self::AtomDecode {
            frame,
            line,
            details: details.into(),
        }
    }
}
