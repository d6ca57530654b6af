use std::fs::File;
use std::io::{BufReader, Seek, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};

use trajslice::io::xyz::{count_frames, write_frame};
use trajslice::{Format, TrajReader, chunk_sizes, detect_format, selected_count};

use crate::cli::Cli;
use crate::display::{Context as DisplayContext, Progress, print_chunk_summary};
use crate::io::create_output;

/// Splits the selected frames of an XYZ trajectory into near-even output
/// files `<base>_chunk_<k>.xyz`. Two passes: a line-skipping count, then
/// one streaming pass rotating output files; no frame is buffered.
pub fn run_chunk(cli: Cli, chunks: usize, ctx: DisplayContext) -> Result<()> {
    if chunks == 0 {
        bail!("Number of chunks must be greater than 0");
    }
    let Some(input_path) = &cli.input else {
        bail!("--chunks needs an input file (the split makes two passes over it)");
    };
    let Some(output_base) = &cli.output else {
        bail!("--chunks needs an output base name, e.g. -o frames.xyz");
    };

    let selection = super::build_selection(&cli.selection)?;

    let file = File::open(input_path)
        .with_context(|| format!("Failed to open input file: {}", input_path.display()))?;
    let mut reader = BufReader::new(file);
    let format = match cli.input_format {
        Some(fmt) => fmt.into(),
        None => detect_format(&mut reader).context("Failed to detect input format")?,
    };
    if format != Format::Xyz {
        bail!("--chunks is only available for XYZ input");
    }
    super::warn_dump_only_options(&cli.selection, ctx);

    // Pass 1: frame count only, no atom decoding.
    let total = count_frames(&mut reader).context("Failed to count frames")?;
    reader.rewind().context("Failed to rewind input")?;

    let selected = selected_count(total, &selection);
    if selected == 0 {
        bail!("No frames selected ({total} in input, range/sampling keeps none)");
    }
    if chunks > selected {
        bail!("Cannot split {selected} selected frames into {chunks} chunks");
    }
    let plan = chunk_sizes(selected, chunks);

    // Pass 2: stream and rotate output files per the plan.
    let mut traj = TrajReader::new(reader, Format::Xyz);
    let mut progress = Progress::new(ctx.interactive);
    let mut written = Vec::with_capacity(chunks);

    let mut chunk_idx = 0;
    let mut in_chunk = 0;
    let mut path = chunk_path(output_base, chunk_idx, chunks);
    let mut out = open_chunk(&path)?;

    let mut frames_read = 0;
    while !selection.past_end(frames_read) {
        let Some(frame) = traj.next_frame().context("Failed to decode frame")? else {
            break;
        };
        frames_read += 1;

        if !selection.included(frame.index) {
            progress.frame(frame.index, false);
            continue;
        }

        if in_chunk == plan[chunk_idx] {
            out.flush().context("Failed to flush chunk file")?;
            written.push((path, in_chunk));
            chunk_idx += 1;
            in_chunk = 0;
            path = chunk_path(output_base, chunk_idx, chunks);
            out = open_chunk(&path)?;
        }

        write_frame(&mut out, &frame)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        in_chunk += 1;
        progress.frame(frame.index, true);
    }
    out.flush().context("Failed to flush chunk file")?;
    written.push((path, in_chunk));
    progress.finish();

    if ctx.interactive {
        print_chunk_summary(&written);
    }
    Ok(())
}

fn open_chunk(path: &Path) -> Result<Box<dyn Write>> {
    create_output(Some(path))
}

/// `frames.xyz` with 10 chunks becomes `frames_chunk_01.xyz` …
/// `frames_chunk_10.xyz`; the index is padded to the widest chunk number.
fn chunk_path(base: &Path, index: usize, chunks: usize) -> PathBuf {
    let width = chunks.to_string().len();
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frames".to_string());
    let ext = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "xyz".to_string());

    base.with_file_name(format!("{stem}_chunk_{:0width$}.{ext}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_paths_are_padded_and_numbered() {
        let base = PathBuf::from("out/frames.xyz");
        assert_eq!(
            chunk_path(&base, 0, 10),
            PathBuf::from("out/frames_chunk_01.xyz")
        );
        assert_eq!(
            chunk_path(&base, 9, 10),
            PathBuf::from("out/frames_chunk_10.xyz")
        );
        assert_eq!(
            chunk_path(&base, 2, 3),
            PathBuf::from("out/frames_chunk_3.xyz")
        );
    }

    #[test]
    fn missing_extension_defaults_to_xyz() {
        let base = PathBuf::from("frames");
        assert_eq!(chunk_path(&base, 0, 2), PathBuf::from("frames_chunk_1.xyz"));
    }
}
