use std::io::{BufRead, Seek, Write};

use super::{Error, filter, selection::Selection};
use crate::io::{self, Format, TrajReader, xyz};
use crate::model::frame::Frame;

/// Result of one completed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub format: Format,
    pub frames_read: usize,
    pub frames_written: usize,
}

/// Detects the input format, then streams the conversion.
///
/// Detection needs a rewindable stream; callers with a non-seekable input
/// (stdin) use [`convert_with_format`] instead.
pub fn convert<R: BufRead + Seek, W: Write>(
    mut input: R,
    output: W,
    selection: &Selection,
) -> Result<Summary, Error> {
    selection.validate()?;
    let format = io::detect_format(&mut input)?;
    convert_frames(input, output, format, selection, |_, _| {})
}

/// Streams the conversion with an explicitly chosen input format.
pub fn convert_with_format<R: BufRead, W: Write>(
    input: R,
    output: W,
    format: Format,
    selection: &Selection,
) -> Result<Summary, Error> {
    convert_frames(input, output, format, selection, |_, _| {})
}

/// One forward pass: decode a frame, apply the selection policy, filter
/// and relabel, write, loop. No component holds more than one frame.
///
/// `observe` runs once per decoded frame with a flag saying whether it was
/// written; the core itself never prints, so this is the boundary layer's
/// hook for progress rendering.
///
/// For XYZ input the filter/label options are no-ops: atoms from that
/// format carry no type id.
pub fn convert_frames<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    format: Format,
    selection: &Selection,
    mut observe: impl FnMut(&Frame, bool),
) -> Result<Summary, Error> {
    selection.validate()?;

    let mut reader = TrajReader::new(input, format);
    let mut frames_read = 0;
    let mut frames_written = 0;

    // The next frame's index always equals frames_read, so the loop can
    // stop before decoding anything past `end`.
    while !selection.past_end(frames_read) {
        let Some(frame) = reader.next_frame()? else {
            break;
        };
        frames_read += 1;

        if !selection.included(frame.index) {
            observe(&frame, false);
            continue;
        }

        let frame = match format {
            Format::LammpsDump => filter::apply(frame, selection),
            Format::Xyz => frame,
        };
        xyz::write_frame(&mut output, &frame)?;
        frames_written += 1;
        observe(&frame, true);
    }

    output.flush().map_err(io::Error::from)?;
    Ok(Summary {
        format,
        frames_read,
        frames_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Cursor;

    const DUMP_THREE_FRAMES: &str = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
2
ITEM: BOX BOUNDS pp pp pp
0.0 20.0
0.0 20.0
0.0 20.0
ITEM: ATOMS id type x y z
1 1 0.0 0.0 0.0
2 2 1.5 2.5 3.5
ITEM: TIMESTEP
10
ITEM: NUMBER OF ATOMS
2
ITEM: BOX BOUNDS pp pp pp
0.0 20.0
0.0 20.0
0.0 20.0
ITEM: ATOMS id type x y z
1 1 0.1 0.1 0.1
2 2 1.1 1.1 1.1
ITEM: TIMESTEP
20
ITEM: NUMBER OF ATOMS
2
ITEM: BOX BOUNDS pp pp pp
0.0 20.0
0.0 20.0
0.0 20.0
ITEM: ATOMS id type x y z
1 1 0.2 0.2 0.2
2 2 2.2 2.2 2.2
";

    fn run(input: &str, selection: &Selection) -> (Summary, String) {
        let mut out = Vec::new();
        let summary = convert(Cursor::new(input), &mut out, selection).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn samples_dump_frames_to_xyz() {
        // Three frames, every 2nd frame of indices 0..=2: frames 0 and 2.
        let selection = Selection {
            end: Some(2),
            sample_rate: 2,
            ..Selection::default()
        };
        let (summary, out) = run(DUMP_THREE_FRAMES, &selection);

        assert_eq!(summary.format, Format::LammpsDump);
        assert_eq!(summary.frames_read, 3);
        assert_eq!(summary.frames_written, 2);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "2");
        assert!(lines[1].contains("Timestep=0"));
        assert_eq!(lines[4], "2");
        assert!(lines[5].contains("Timestep=20"));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn stops_before_decoding_past_end() {
        // Frame 2 is corrupt, but end=1 means it must never be decoded.
        let input = DUMP_THREE_FRAMES.replace("2 2 2.2 2.2 2.2", "2 2 garbage 2.2 2.2");
        let selection = Selection {
            end: Some(1),
            ..Selection::default()
        };

        let mut out = Vec::new();
        let summary = convert(Cursor::new(input.as_str()), &mut out, &selection).unwrap();
        assert_eq!(summary.frames_read, 2);
        assert_eq!(summary.frames_written, 2);
    }

    #[test]
    fn range_error_before_any_read() {
        // The input is not even valid; validation must fire first.
        let selection = Selection {
            start: 100,
            end: Some(99),
            ..Selection::default()
        };
        let err = convert(Cursor::new("garbage"), Vec::new(), &selection).unwrap_err();
        assert!(matches!(err, Error::Range { start: 100, end: 99 }));
    }

    #[test]
    fn filters_atoms_by_type() {
        let selection = Selection {
            keep_types: Some(HashSet::from([2])),
            ..Selection::default()
        };
        let (summary, out) = run(DUMP_THREE_FRAMES, &selection);

        assert_eq!(summary.frames_written, 3);
        for chunk in out.split_terminator('\n').collect::<Vec<_>>().chunks(3) {
            assert_eq!(chunk[0], "1", "one type-2 atom per frame");
            assert!(chunk[2].starts_with("2 "), "default symbol is the type id");
        }
    }

    #[test]
    fn relabels_atom_types() {
        let selection = Selection {
            labels: [(1, "C".to_string()), (2, "Xe".to_string())].into(),
            ..Selection::default()
        };
        let (_, out) = run(DUMP_THREE_FRAMES, &selection);

        assert!(out.contains("C 0 0 0"));
        assert!(out.contains("Xe 1.5 2.5 3.5"));
        assert!(!out.contains("\n1 "));
    }

    #[test]
    fn xyz_round_trip_preserves_frames() {
        let xyz_input = "\
2
Timestep=0 Lattice=\"20 0 0 0 20 0 0 0 20\"
C 0 0 0
Xe 1.5 2.5 3.5
1
Timestep=10
C 0.25 0.5 0.75
";
        let (summary, out) = run(xyz_input, &Selection::default());

        assert_eq!(summary.format, Format::Xyz);
        assert_eq!(summary.frames_read, 2);
        assert_eq!(summary.frames_written, 2);
        assert_eq!(out, xyz_input);
    }

    #[test]
    fn filter_options_are_noops_for_xyz_input() {
        let xyz_input = "1\nTimestep=0\nC 0 0 0\n";
        let selection = Selection {
            keep_types: Some(HashSet::from([2])),
            labels: [(1, "N".to_string())].into(),
            ..Selection::default()
        };
        let (_, out) = run(xyz_input, &selection);
        assert_eq!(out, xyz_input);
    }

    #[test]
    fn decode_error_propagates_and_stops_the_run() {
        let input = DUMP_THREE_FRAMES.replace("1 1 0.1 0.1 0.1", "1 1 bad 0.1 0.1");
        let err = convert(Cursor::new(input.as_str()), Vec::new(), &Selection::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Read(io::Error::AtomDecode { frame: 1, .. })
        ));
    }

    #[test]
    fn explicit_format_skips_detection() {
        let xyz_input = "1\n\nC 0 0 0\n";
        let mut out = Vec::new();
        let summary = convert_with_format(
            Cursor::new(xyz_input),
            &mut out,
            Format::Xyz,
            &Selection::default(),
        )
        .unwrap();
        assert_eq!(summary.frames_written, 1);
    }

    #[test]
    fn observer_sees_skipped_and_written_frames() {
        let selection = Selection {
            sample_rate: 2,
            ..Selection::default()
        };
        let mut seen = Vec::new();
        convert_frames(
            Cursor::new(DUMP_THREE_FRAMES),
            Vec::new(),
            Format::LammpsDump,
            &selection,
            |frame, written| seen.push((frame.index, written)),
        )
        .unwrap();
        assert_eq!(seen, vec![(0, true), (1, false), (2, true)]);
    }
}
