pub mod reader;

pub use reader::{ColumnLayout, DumpReader};
