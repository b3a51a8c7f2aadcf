//! Flat-array diffs for renderers.

use super::position::Position;

/// Squares whose occupancy code dropped by exactly 1 or 2 between two flat
/// board arrays: an attacker or defender left the square. King moves and
/// marker changes are not reported.
#[must_use]
pub fn removed_cells(before: &[u8], after: &[u8], cols: usize) -> Vec<Position> {
    if cols == 0 {
        return Vec::new();
    }
    before
        .iter()
        .zip(after)
        .enumerate()
        .filter(|&(_, (&b, &a))| matches!(b.checked_sub(a), Some(1) | Some(2)))
        .map(|(i, _)| Position::new(i / cols, i % cols))
        .collect()
}
