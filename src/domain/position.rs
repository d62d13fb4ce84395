//! Position arithmetic for sibling ordering.
//!
//! Columns within a board and cards within a column carry a zero-based
//! `position`. New siblings are appended at `max + 1`; deletions leave gaps
//! in place; reordering re-packs a column back to a dense sequence.

/// Returns the append position after the given maximum, or 0 when there are
/// no siblings yet.
pub fn next_position(max: Option<u32>) -> u32 {
    match max {
        Some(max) => max + 1,
        None => 0,
    }
}

/// Checks that positions are strictly increasing (sorted, no duplicates).
///
/// Every loaded sibling list satisfies this. Gaps are legal: deleting a card
/// or column does not renumber the survivors.
pub fn is_strictly_increasing(positions: &[u32]) -> bool {
    positions.windows(2).all(|pair| pair[0] < pair[1])
}

/// Checks that positions form the dense sequence `0..len` (no gaps, no
/// duplicates). This is the shape board seeding and reordering produce.
pub fn is_dense(positions: &[u32]) -> bool {
    positions
        .iter()
        .enumerate()
        .all(|(index, &position)| position == index as u32)
}
