use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use trajslice::Format;

#[derive(Parser)]
#[command(
    name = "trajslice",
    about = "Slice, sample, and convert LAMMPS dump / XYZ trajectories",
    version,
    before_help = crate::display::banner_for_help()
)]
pub struct Cli {
    /// Input trajectory (stdin if omitted, requires --infmt)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output XYZ file, or base name with --chunks (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Input format (auto-detected from content if not specified)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub input_format: Option<InputFormat>,

    #[command(flatten)]
    pub selection: SelectionOptions,

    /// Split the selected frames into N output files (XYZ input only)
    #[arg(long, value_name = "N")]
    pub chunks: Option<usize>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Frame Selection")]
pub struct SelectionOptions {
    /// Keep every Nth frame, phased from --start
    #[arg(long = "sample", value_name = "N", default_value = "1")]
    pub sample_rate: usize,

    /// First frame index to keep (0-based)
    #[arg(long, value_name = "INDEX", default_value = "0")]
    pub start: usize,

    /// Last frame index to keep (0-based, inclusive; default: last frame)
    #[arg(long, value_name = "INDEX")]
    pub end: Option<usize>,

    /// Atom types to keep, e.g. --filter 2 (LAMMPS dump input only)
    #[arg(long = "filter", value_name = "TYPE", num_args = 1..)]
    pub keep_types: Vec<u32>,

    /// Atom type labels, e.g. --labels 1:C 2:Xe (LAMMPS dump input only)
    #[arg(long, value_name = "TYPE:SYMBOL", num_args = 1..)]
    pub labels: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// LAMMPS dump format (ITEM: sections)
    Lammps,
    /// XYZ coordinate format (count, comment, atom lines)
    Xyz,
}

impl From<InputFormat> for Format {
    fn from(fmt: InputFormat) -> Self {
        match fmt {
            InputFormat::Lammps => Format::LammpsDump,
            InputFormat::Xyz => Format::Xyz,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
