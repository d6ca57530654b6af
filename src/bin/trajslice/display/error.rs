use std::io::{self, Write};

use anyhow::Error;

use trajslice::{IoError, SliceError};

pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "  \x1b[31m✗ Error:\x1b[0m {err}");

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "    Caused by: {cause}");
        source = cause.source();
    }

    if let Some(hints) = collect_hints(err) {
        let _ = writeln!(stderr);
        let _ = writeln!(stderr, "  Hints:");
        for hint in hints {
            let _ = writeln!(stderr, "    • {hint}");
        }
    }
    let _ = writeln!(stderr);
}

fn collect_hints(err: &Error) -> Option<Vec<String>> {
    let mut hints = Vec::new();

    if let Some(slice_err) = err.chain().find_map(|c| c.downcast_ref::<SliceError>()) {
        match slice_err {
            SliceError::Range { .. } => {
                hints.push("--start must not exceed --end".to_string());
            }
            SliceError::SampleRate => {
                hints.push("--sample must be at least 1".to_string());
            }
            SliceError::Label { .. } => {
                hints.push("Labels pair a positive type with a symbol, e.g. 1:C 2:Xe".to_string());
            }
            SliceError::Read(_) => {}
        }
    }

    if let Some(io_err) = err.chain().find_map(|c| c.downcast_ref::<IoError>()) {
        match io_err {
            IoError::Io { source } => match source.kind() {
                io::ErrorKind::NotFound => {
                    hints.push("Check that the input path exists".to_string());
                }
                io::ErrorKind::PermissionDenied => {
                    hints.push("Check file permissions on the input/output paths".to_string());
                }
                _ => {}
            },
            IoError::UnrecognizedFormat => {
                hints.push("Use --infmt to force the input format".to_string());
                hints.push(
                    "Dump input starts with 'ITEM: TIMESTEP'; XYZ starts with an atom count"
                        .to_string(),
                );
            }
            IoError::Parse { format, line, .. } => {
                hints.push(format!(
                    "Inspect the {format} input around line {line} for malformed entries"
                ));
            }
            IoError::MissingColumns { .. } => {
                hints.push(
                    "The 'ITEM: ATOMS' header must name the type, x, y, and z columns".to_string(),
                );
            }
            IoError::AtomDecode { frame, line, .. } => {
                hints.push(format!(
                    "Frame {frame} has a malformed atom record near line {line}"
                ));
            }
        }
    }

    if hints.is_empty() { None } else { Some(hints) }
}
