use std::fmt::Write as _;
use std::io::Write;

use crate::io::Error;
use crate::model::frame::Frame;

/// Serializes one frame to the XYZ grammar: atom count, comment line,
/// then `<symbol> <x> <y> <z>` per atom.
///
/// The comment carries `Timestep=` and `Lattice="…"` attributes when the
/// frame has them and is left blank otherwise. Coordinates use `f64`'s
/// shortest round-trip representation, which is stable across runs.
///
/// The whole frame is formatted into one buffer and written with a single
/// call, so a frame reaches the output stream all-or-none.
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> Result<(), Error> {
    let mut buf = String::new();

    let _ = writeln!(buf, "{}", frame.atom_count());
    let _ = writeln!(buf, "{}", comment_line(frame));
    for atom in &frame.atoms {
        let _ = writeln!(
            buf,
            "{} {} {} {}",
            atom.symbol, atom.position[0], atom.position[1], atom.position[2]
        );
    }

    writer.write_all(buf.as_bytes())?;
    Ok(())
}

fn comment_line(frame: &Frame) -> String {
    let mut comment = String::new();

    if let Some(timestep) = frame.timestep {
        let _ = write!(comment, "Timestep={timestep}");
    }
    if let Some(lattice) = frame.lattice {
        if !comment.is_empty() {
            comment.push(' ');
        }
        comment.push_str("Lattice=\"");
        for (i, value) in lattice.iter().flatten().enumerate() {
            if i > 0 {
                comment.push(' ');
            }
            let _ = write!(comment, "{value}");
        }
        comment.push('"');
    }

    comment
}
