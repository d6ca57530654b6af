use thiserror::Error;

/// Configuration and conversion errors.
///
/// `Range`, `SampleRate`, and `Label` are detected before any frame is
/// read; `Read` wraps faults from the underlying readers and writer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid frame range: start ({start}) is greater than end ({end})")]
    Range { start: usize, end: usize },

    #[error("sample rate must be at least 1")]
    SampleRate,

    #[error("invalid label '{entry}': expected <type>:<symbol>, e.g. 2:Xe")]
    Label { entry: String },

    #[error(transparent)]
    Read(#[from] crate::io::Error),
}
