use super::selection::Selection;
use crate::model::frame::Frame;

/// Applies the keep-set and label map to a dump-format frame.
///
/// Atoms whose type is outside `keep_types` are dropped; a frame reduced
/// to zero atoms is still emitted downstream. Retained atoms get the
/// mapped symbol when their type appears in `labels`, otherwise they keep
/// the default symbol (the textual type id).
pub fn apply(mut frame: Frame, selection: &Selection) -> Frame {
    if let Some(keep) = &selection.keep_types {
        frame
            .atoms
            .retain(|atom| atom.type_id.is_some_and(|t| keep.contains(&t)));
    }

    if !selection.labels.is_empty() {
        for atom in &mut frame.atoms {
            if let Some(symbol) = atom.type_id.and_then(|t| selection.labels.get(&t)) {
                atom.symbol = symbol.clone();
            }
        }
    }

    frame
}
