use std::io::BufRead;

use crate::io::{Error, Format};
use crate::model::{atom::Atom, frame::Frame};

/// Lazy frame reader for the fixed-layout XYZ format.
///
/// Per frame: an atom count line, an opaque comment line, then exactly
/// that many `<symbol> <x> <y> <z>` lines. When the comment carries
/// `Timestep=` or `Lattice="…"` attributes they are extracted for
/// informational passthrough; neither is required. Atoms from this format
/// carry no type id, so type-based filtering does not apply to them.
pub struct XyzReader<R: BufRead> {
    reader: R,
    line_no: usize,
    next_index: usize,
}

impl<R: BufRead> XyzReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            next_index: 0,
        }
    }

    /// Decodes the next frame, or `Ok(None)` at end-of-stream.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        let Some(count_line) = self.skip_empty_lines()? else {
            return Ok(None);
        };
        let count = count_line
            .trim()
            .parse::<usize>()
            .map_err(|_| self.parse_err("invalid atom count"))?;

        let index = self.next_index;

        let comment = self
            .read_line()?
            .ok_or_else(|| self.parse_err("stream ended while expecting comment line"))?;
        let timestep = parse_timestep(&comment);
        let lattice = parse_lattice(&comment);

        let mut atoms = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(record) = self.read_line()? else {
                return Err(Error::atom_decode(
                    index,
                    self.line_no,
                    format!(
                        "stream ended after {} of {} declared atom records",
                        atoms.len(),
                        count
                    ),
                ));
            };
            atoms.push(self.decode_atom(index, &record)?);
        }

        self.next_index += 1;
        Ok(Some(Frame {
            index,
            timestep,
            lattice,
            atoms,
        }))
    }

    fn decode_atom(&self, frame: usize, record: &str) -> Result<Atom, Error> {
        let parts: Vec<&str> = record.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(Error::atom_decode(
                frame,
                self.line_no,
                "atom record needs a symbol and three coordinates",
            ));
        }

        let mut position = [0.0; 3];
        for (k, name) in ["x", "y", "z"].iter().enumerate() {
            position[k] = parts[k + 1].parse::<f64>().map_err(|_| {
                Error::atom_decode(frame, self.line_no, format!("invalid {name} coordinate"))
            })?;
        }

        Ok(Atom::new(parts[0], position))
    }

    fn skip_empty_lines(&mut self) -> Result<Option<String>, Error> {
        loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Some(line)),
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    fn parse_err(&self, details: impl Into<String>) -> Error {
        Error::parse(Format::Xyz, self.line_no, details)
    }
}

/// Counts frames with a line-skipping scan, without decoding atom records.
/// Used as the cheap first pass of chunked output.
pub fn count_frames<R: BufRead>(mut reader: R) -> Result<usize, Error> {
    let mut frames = 0;
    let mut line_no = 0;
    let mut buf = String::new();

    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            return Ok(frames);
        }
        line_no += 1;
        if buf.trim().is_empty() {
            continue;
        }

        let count = buf
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::parse(Format::Xyz, line_no, "invalid atom count"))?;

        // Comment line plus the declared atom records.
        for _ in 0..count + 1 {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                return Err(Error::parse(
                    Format::Xyz,
                    line_no,
                    "stream ended inside a frame",
                ));
            }
            line_no += 1;
        }
        frames += 1;
    }
}

fn parse_timestep(comment: &str) -> Option<i64> {
    comment
        .split_whitespace()
        .find_map(|token| token.strip_prefix("Timestep="))
        .and_then(|value| value.parse::<i64>().ok())
}

fn parse_lattice(comment: &str) -> Option<[[f64; 3]; 3]> {
    let rest = comment.split_once("Lattice=\"")?.1;
    let inner = rest.split_once('"')?.0;

    let values: Vec<f64> = inner
        .split_whitespace()
        .map_while(|t| t.parse::<f64>().ok())
        .collect();
    if values.len() != 9 {
        return None;
    }

    let mut lattice = [[0.0; 3]; 3];
    for (row, chunk) in lattice.iter_mut().zip(values.chunks_exact(3)) {
        row.copy_from_slice(chunk);
    }
    Some(lattice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TWO_FRAMES: &str = "\
2
Timestep=0 Lattice=\"20 0 0 0 20 0 0 0 30\"
C 0.0 0.0 0.0
Xe 1.5 2.5 3.5
2
Timestep=10
C 0.1 0.2 0.3
Xe 4.5 5.5 6.5
";

    fn reader(text: &str) -> XyzReader<Cursor<&str>> {
        XyzReader::new(Cursor::new(text))
    }

    #[test]
    fn reads_frames_in_order() {
        let mut r = reader(TWO_FRAMES);

        let first = r.next_frame().unwrap().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.timestep, Some(0));
        assert_eq!(first.atoms[0].symbol, "C");
        assert_eq!(first.atoms[0].type_id, None);
        assert_eq!(first.atoms[1].position, [1.5, 2.5, 3.5]);

        let second = r.next_frame().unwrap().unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.timestep, Some(10));
        assert!(second.lattice.is_none());

        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn extracts_lattice_from_comment() {
        let mut r = reader(TWO_FRAMES);
        let frame = r.next_frame().unwrap().unwrap();
        let lattice = frame.lattice.unwrap();
        assert_eq!(lattice[0], [20.0, 0.0, 0.0]);
        assert_eq!(lattice[2], [0.0, 0.0, 30.0]);
    }

    #[test]
    fn comment_attributes_are_independently_optional() {
        let text = "1\nany free-text comment\nC 0.0 0.0 0.0\n";
        let frame = reader(text).next_frame().unwrap().unwrap();
        assert!(frame.timestep.is_none());
        assert!(frame.lattice.is_none());

        let text = "1\nLattice=\"1 0 0 0 1 0 0 0 1\"\nC 0.0 0.0 0.0\n";
        let frame = reader(text).next_frame().unwrap().unwrap();
        assert!(frame.timestep.is_none());
        assert!(frame.lattice.is_some());
    }

    #[test]
    fn malformed_lattice_is_ignored() {
        let text = "1\nLattice=\"1 0 0\"\nC 0.0 0.0 0.0\n";
        let frame = reader(text).next_frame().unwrap().unwrap();
        assert!(frame.lattice.is_none());
    }

    #[test]
    fn extra_record_tokens_are_ignored() {
        // Some producers append an id column; tolerate it on input.
        let text = "1\n\nC 1.0 2.0 3.0 42\n";
        let frame = reader(text).next_frame().unwrap().unwrap();
        assert_eq!(frame.atoms[0].position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn short_final_frame_is_a_decode_error() {
        let text = "3\ncomment\nC 0.0 0.0 0.0\n";
        match reader(text).next_frame() {
            Err(Error::AtomDecode { frame, details, .. }) => {
                assert_eq!(frame, 0);
                assert!(details.contains("1 of 3"));
            }
            other => panic!("expected AtomDecode, got {other:?}"),
        }
    }

    #[test]
    fn bad_coordinate_is_a_decode_error() {
        let text = "1\ncomment\nC 0.0 x 0.0\n";
        assert!(matches!(
            reader(text).next_frame(),
            Err(Error::AtomDecode { frame: 0, .. })
        ));
    }

    #[test]
    fn counts_frames_without_decoding() {
        assert_eq!(count_frames(Cursor::new(TWO_FRAMES)).unwrap(), 2);
        assert_eq!(count_frames(Cursor::new("")).unwrap(), 0);
    }

    #[test]
    fn count_rejects_truncated_frame() {
        let text = "2\ncomment\nC 0.0 0.0 0.0\n";
        assert!(count_frames(Cursor::new(text)).is_err());
    }
}
