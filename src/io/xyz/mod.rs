pub mod reader;
pub mod writer;

pub use reader::{XyzReader, count_frames};
pub use writer::write_frame;
