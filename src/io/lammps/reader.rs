use std::io::BufRead;

use crate::io::{Error, Format};
use crate::model::{atom::Atom, frame::Frame};

const TIMESTEP_TAG: &str = "ITEM: TIMESTEP";
const COUNT_TAG: &str = "ITEM: NUMBER OF ATOMS";
const BOX_TAG: &str = "ITEM: BOX BOUNDS";
const ATOMS_TAG: &str = "ITEM: ATOMS";

/// Column positions discovered from the `ITEM: ATOMS` header tokens.
///
/// Discovered once per stream and immutable thereafter: a later frame
/// whose header disagrees is a decode error, the reader never silently
/// adapts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Atom identifier column, optional and ignored for output.
    pub id: Option<usize>,
    pub ty: usize,
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl ColumnLayout {
    /// Case-sensitive exact-token search for `id`, `type`, `x`, `y`, `z`.
    /// `None` when type or any coordinate column is absent.
    pub fn discover(tokens: &[&str]) -> Option<Self> {
        let position = |name: &str| tokens.iter().position(|t| *t == name);
        Some(Self {
            id: position("id"),
            ty: position("type")?,
            x: position("x")?,
            y: position("y")?,
            z: position("z")?,
        })
    }
}

/// Lazy frame reader for the tag-delimited LAMMPS dump format.
pub struct DumpReader<R: BufRead> {
    reader: R,
    line_no: usize,
    layout: Option<ColumnLayout>,
    next_index: usize,
}

impl<R: BufRead> DumpReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            layout: None,
            next_index: 0,
        }
    }

    /// Decodes the next frame, or `Ok(None)` at end-of-stream.
    ///
    /// The frame index increments once per successfully decoded frame,
    /// regardless of whether later stages keep it.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        let Some(tag) = self.skip_empty_lines()? else {
            return Ok(None);
        };
        if !tag.starts_with(TIMESTEP_TAG) {
            return Err(self.parse_err(format!("expected '{TIMESTEP_TAG}', got '{tag}'")));
        }

        let index = self.next_index;

        let timestep = self
            .require_line("timestep value")?
            .trim()
            .parse::<i64>()
            .map_err(|_| self.parse_err("invalid timestep value"))?;

        let count_tag = self.require_line("number-of-atoms tag")?;
        if !count_tag.starts_with(COUNT_TAG) {
            return Err(self.parse_err(format!("expected '{COUNT_TAG}', got '{count_tag}'")));
        }
        let count = self
            .require_line("atom count")?
            .trim()
            .parse::<usize>()
            .map_err(|_| self.parse_err("invalid atom count"))?;

        let mut section = self.require_line("box bounds or atoms header")?;
        let mut lattice = None;
        if section.starts_with(BOX_TAG) {
            lattice = Some(Frame::diagonal_lattice(self.read_box_extents()?));
            section = self.require_line("atoms header")?;
        }

        if !section.starts_with(ATOMS_TAG) {
            return Err(self.parse_err(format!("expected '{ATOMS_TAG}' header, got '{section}'")));
        }
        let layout = self.resolve_layout(&section)?;

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
            atoms.push(self.decode_atom(index, &record, &layout)?);
        }

        self.next_index += 1;
        Ok(Some(Frame {
            index,
            timestep: Some(timestep),
            lattice,
            atoms,
        }))
    }

    /// Header tokens after `ITEM: ATOMS`, checked against the layout
    /// discovered on the first frame.
    fn resolve_layout(&mut self, header: &str) -> Result<ColumnLayout, Error> {
        let tokens: Vec<&str> = header[ATOMS_TAG.len()..].split_whitespace().collect();
        let layout = ColumnLayout::discover(&tokens).ok_or(Error::MissingColumns {
            line: self.line_no,
        })?;

        match self.layout {
            Some(existing) if existing != layout => {
                Err(self.parse_err("atoms column layout changed mid-stream"))
            }
            _ => {
                self.layout = Some(layout);
                Ok(layout)
            }
        }
    }

    fn decode_atom(
        &self,
        frame: usize,
        record: &str,
        layout: &ColumnLayout,
    ) -> Result<Atom, Error> {
        let parts: Vec<&str> = record.split_whitespace().collect();

        let field = |col: usize, name: &str| {
            parts.get(col).copied().ok_or_else(|| {
                Error::atom_decode(
                    frame,
                    self.line_no,
                    format!("record has {} tokens, {name} column is at {col}", parts.len()),
                )
            })
        };
        let float = |col: usize, name: &str| {
            field(col, name)?.parse::<f64>().map_err(|_| {
                Error::atom_decode(frame, self.line_no, format!("invalid {name} coordinate"))
            })
        };

        let type_id = field(layout.ty, "type")?
            .parse::<u32>()
            .map_err(|_| Error::atom_decode(frame, self.line_no, "invalid atom type"))?;
        let x = float(layout.x, "x")?;
        let y = float(layout.y, "y")?;
        let z = float(layout.z, "z")?;

        Ok(Atom::with_type(type_id, [x, y, z]))
    }

    /// Three lines of lo/hi pairs, one per axis; the extent is hi − lo.
    fn read_box_extents(&mut self) -> Result<[f64; 3], Error> {
        let mut extents = [0.0; 3];
        for extent in &mut extents {
            let line = self.require_line("box bounds line")?;
            let mut tokens = line.split_whitespace();
            let lo = tokens
                .next()
                .and_then(|t| t.parse::<f64>().ok())
                .ok_or_else(|| self.parse_err("invalid box bounds lower value"))?;
            let hi = tokens
                .next()
                .and_then(|t| t.parse::<f64>().ok())
                .ok_or_else(|| self.parse_err("invalid box bounds upper value"))?;
            *extent = hi - lo;
        }
        Ok(extents)
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

    fn require_line(&mut self, what: &str) -> Result<String, Error> {
        self.read_line()?
            .ok_or_else(|| self.parse_err(format!("stream ended while expecting {what}")))
    }

    fn parse_err(&self, details: impl Into<String>) -> Error {
        Error::parse(Format::LammpsDump, self.line_no, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TWO_FRAMES: &str = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
2
ITEM: BOX BOUNDS pp pp pp
0.0 20.0
-5.0 15.0
0.0 30.0
ITEM: ATOMS id type x y z
1 1 0.0 0.0 0.0
2 2 1.5 2.5 3.5
ITEM: TIMESTEP
10
ITEM: NUMBER OF ATOMS
2
ITEM: BOX BOUNDS pp pp pp
0.0 20.0
-5.0 15.0
0.0 30.0
ITEM: ATOMS id type x y z
1 1 0.1 0.2 0.3
2 2 4.5 5.5 6.5
";

    fn reader(text: &str) -> DumpReader<Cursor<&str>> {
        DumpReader::new(Cursor::new(text))
    }

    #[test]
    fn reads_frames_in_order() {
        let mut r = reader(TWO_FRAMES);

        let first = r.next_frame().unwrap().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.timestep, Some(0));
        assert_eq!(first.atom_count(), 2);
        assert_eq!(first.atoms[0].type_id, Some(1));
        assert_eq!(first.atoms[0].symbol, "1");
        assert_eq!(first.atoms[1].position, [1.5, 2.5, 3.5]);

        let second = r.next_frame().unwrap().unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.timestep, Some(10));
        assert_eq!(second.atoms[1].position, [4.5, 5.5, 6.5]);

        assert!(r.next_frame().unwrap().is_none());
        assert!(r.next_frame().unwrap().is_none(), "terminal state is sticky");
    }

    #[test]
    fn derives_lattice_from_box_extents() {
        let mut r = reader(TWO_FRAMES);
        let frame = r.next_frame().unwrap().unwrap();
        let lattice = frame.lattice.unwrap();
        assert_eq!(lattice[0], [20.0, 0.0, 0.0]);
        assert_eq!(lattice[1], [0.0, 20.0, 0.0]);
        assert_eq!(lattice[2], [0.0, 0.0, 30.0]);
    }

    #[test]
    fn box_bounds_are_optional() {
        let text = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
1
ITEM: ATOMS type x y z
2 1.0 2.0 3.0
";
        let frame = reader(text).next_frame().unwrap().unwrap();
        assert!(frame.lattice.is_none());
        assert_eq!(frame.atoms[0].type_id, Some(2));
    }

    #[test]
    fn discovers_scrambled_column_order() {
        let text = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
1
ITEM: ATOMS z y x type id
3.0 2.0 1.0 4 7
";
        let frame = reader(text).next_frame().unwrap().unwrap();
        assert_eq!(frame.atoms[0].type_id, Some(4));
        assert_eq!(frame.atoms[0].position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn missing_type_column_is_a_hard_stop() {
        let text = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
1
ITEM: ATOMS id x y z
1 0.0 0.0 0.0
";
        assert!(matches!(
            reader(text).next_frame(),
            Err(Error::MissingColumns { .. })
        ));
    }

    #[test]
    fn missing_coordinate_column_is_a_hard_stop() {
        let text = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
1
ITEM: ATOMS id type x y
1 1 0.0 0.0
";
        assert!(matches!(
            reader(text).next_frame(),
            Err(Error::MissingColumns { .. })
        ));
    }

    #[test]
    fn rejects_layout_change_between_frames() {
        let text = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
1
ITEM: ATOMS type x y z
1 0.0 0.0 0.0
ITEM: TIMESTEP
10
ITEM: NUMBER OF ATOMS
1
ITEM: ATOMS x y z type
0.0 0.0 0.0 1
";
        let mut r = reader(text);
        r.next_frame().unwrap().unwrap();
        let err = r.next_frame().unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("layout changed"));
    }

    #[test]
    fn bad_coordinate_names_frame_and_line() {
        let text = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
1
ITEM: ATOMS type x y z
1 0.0 oops 0.0
";
        match reader(text).next_frame() {
            Err(Error::AtomDecode { frame, line, .. }) => {
                assert_eq!(frame, 0);
                assert_eq!(line, 6);
            }
            other => panic!("expected AtomDecode, got {other:?}"),
        }
    }

    #[test]
    fn truncated_frame_is_a_decode_error() {
        let text = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
3
ITEM: ATOMS type x y z
1 0.0 0.0 0.0
";
        match reader(text).next_frame() {
            Err(Error::AtomDecode { frame, details, .. }) => {
                assert_eq!(frame, 0);
                assert!(details.contains("1 of 3"));
            }
            other => panic!("expected AtomDecode, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_leading_tag_is_a_parse_error() {
        let text = "ITEM: NUMBER OF ATOMS\n1\n";
        assert!(matches!(
            reader(text).next_frame(),
            Err(Error::Parse { .. })
        ));
    }
}
