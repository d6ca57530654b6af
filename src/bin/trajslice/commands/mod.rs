mod chunk;
mod convert;

use std::collections::HashSet;

use anyhow::Result;

use trajslice::Selection;

use crate::cli::{Cli, SelectionOptions};
use crate::display::Context;

pub fn run(cli: Cli, ctx: Context) -> Result<()> {
    match cli.chunks {
        Some(n) => chunk::run_chunk(cli, n, ctx),
        None => convert::run_convert(cli, ctx),
    }
}

/// Builds and validates the selection, so range and label faults surface
/// before any input is opened.
fn build_selection(opts: &SelectionOptions) -> Result<Selection> {
    let labels = Selection::parse_labels(&opts.labels)?;
    let keep_types = if opts.keep_types.is_empty() {
        None
    } else {
        Some(opts.keep_types.iter().copied().collect::<HashSet<_>>())
    };

    let selection = Selection {
        start: opts.start,
        end: opts.end,
        sample_rate: opts.sample_rate,
        keep_types,
        labels,
    };
    selection.validate()?;
    Ok(selection)
}

/// Filter and label flags only apply to dump input; for XYZ they are
/// no-ops, so tell the user rather than silently ignoring them.
fn warn_dump_only_options(opts: &SelectionOptions, ctx: Context) {
    if !ctx.interactive {
        return;
    }
    if !opts.keep_types.is_empty() {
        crate::display::print_warning("--filter has no effect on XYZ input (LAMMPS dump only)");
    }
    if !opts.labels.is_empty() {
        crate::display::print_warning("--labels has no effect on XYZ input (LAMMPS dump only)");
    }
}
