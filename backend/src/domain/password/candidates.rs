//! Splitting of stored values that hold several encodings back-to-back.

use std::iter;

const MARKERS: [&str; 2] = ["pbkdf2_", "pbkdf2$"];

/// Split `stored` into trimmed, non-empty candidate encodings.
///
/// A candidate starts at every PBKDF2 marker; text before the first marker
/// is a candidate of its own. A value without markers yields itself.
pub(super) fn split_candidates(stored: &str) -> Vec<&str> {
    let mut starts: Vec<usize> = MARKERS
        .iter()
        .flat_map(|marker| stored.match_indices(marker).map(|(index, _)| index))
        .collect();
    starts.sort_unstable();
    starts.dedup();
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }

    let ends = starts.iter().skip(1).copied().chain(iter::once(stored.len()));
    starts
        .iter()
        .zip(ends)
        .filter_map(|(&start, end)| stored.get(start..end))
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .collect()
}
