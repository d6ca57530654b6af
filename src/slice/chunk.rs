use super::selection::Selection;

/// Near-even split of `total` selected frames into `chunks` parts: the
/// first `total % chunks` parts get one extra frame.
pub fn chunk_sizes(total: usize, chunks: usize) -> Vec<usize> {
    if chunks == 0 {
        return Vec::new();
    }
    let base = total / chunks;
    let extra = total % chunks;
    (0..chunks).map(|k| base + usize::from(k < extra)).collect()
}

/// Number of frames the selection keeps from a source with `total` frames.
pub fn selected_count(total: usize, selection: &Selection) -> usize {
    if total == 0 {
        return 0;
    }
    let last = total - 1;
    let end = selection.end.map_or(last, |e| e.min(last));
    if selection.start > end {
        return 0;
    }
    (end - selection.start) / selection.sample_rate + 1
}
