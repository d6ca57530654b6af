use std::io::{BufRead, Seek};

use super::{Error, Format};

/// Decides which grammar applies by inspecting the first meaningful lines
/// of the stream, then rewinds to the start so the chosen reader sees the
/// whole input.
///
/// Decision rule: a first non-empty line starting with `ITEM: TIMESTEP`
/// means dump format; a non-negative integer followed by a comment line
/// and a line with at least four whitespace-separated tokens means XYZ;
/// anything else is [`Error::UnrecognizedFormat`].
pub fn detect_format<R: BufRead + Seek>(reader: &mut R) -> Result<Format, Error> {
    let decision = classify(&mut *reader);
    reader.rewind()?;
    decision
}

fn classify<R: BufRead>(reader: &mut R) -> Result<Format, Error> {
    let mut line = String::new();

    // Skip leading empty lines to reach the first meaningful content.
    let first = loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(Error::UnrecognizedFormat);
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            break trimmed.to_string();
        }
    };

    if first.starts_with("ITEM: TIMESTEP") {
        return Ok(Format::LammpsDump);
    }

    if first.parse::<usize>().is_err() {
        return Err(Error::UnrecognizedFormat);
    }

    // Atom count line, then a comment line, then an atom record with at
    // least symbol + three coordinates.
    line.clear();
    if reader.read_line(&mut line)? == 0 {
        return Err(Error::UnrecognizedFormat);
    }

    line.clear();
    if reader.read_line(&mut line)? == 0 {
        return Err(Error::UnrecognizedFormat);
    }
    if line.split_whitespace().count() >= 4 {
        Ok(Format::Xyz)
    } else {
        Err(Error::UnrecognizedFormat)
    }
}
