//! Frame selection and the conversion driver.
//!
//! - [`selection`] – Selection parameters and the pure inclusion policy.
//! - [`filter`] – Atom-type filtering and relabeling for dump-format frames.
//! - [`driver`] – The single-pass convert loop.
//! - [`chunk`] – Size planning for chunked XYZ output.

pub mod chunk;
pub mod driver;
pub mod error;
pub mod filter;
pub mod selection;

pub use chunk::{chunk_sizes, selected_count};
pub use driver::{Summary, convert, convert_frames, convert_with_format};
pub use error::Error;
pub use selection::Selection;
