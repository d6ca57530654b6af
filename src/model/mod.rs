//! Value types shared by the readers, the filter stage, and the writer.
//!
//! - [`atom`] – Single atom with optional LAMMPS type, symbol, and position.
//! - [`frame`] – One trajectory snapshot with optional timestep and lattice.
//!
//! Frames are transient: produced one at a time by a reader, transformed,
//! written, and dropped. Nothing in the crate retains more than one.

pub mod atom;
pub mod frame;
