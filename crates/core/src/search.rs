//! Search module - nearest free cell for displaced pieces
//!
//! When an incoming group lands on occupied cells, each displaced piece is
//! pushed to the closest free cell. "Closest" is defined by BFS layer over
//! relative shifts, not Euclidean distance, and ties break on the fixed
//! [`RING_DIRS`] expansion order (cardinals before diagonals). Keeping that
//! order bit-exact keeps victim landing cells reproducible.

use std::collections::{HashSet, VecDeque};

use grid_jigsaw_types::{CellPos, GridSize, RING_DIRS};

/// Find the smallest shift `(d_row, d_col)` that moves every cell of
/// `cluster` onto a free, in-bounds cell.
///
/// `occupied` is the simulated occupancy the shifted cluster must avoid
/// (in this engine: the incoming footprint plus every piece that is not
/// moving this turn). The zero shift is never returned.
///
/// Returns `None` only when no reachable shift fits - with a sound piece
/// count that means the grid has no free cell at all.
pub fn nearest_free_shift(
    cluster: &[CellPos],
    occupied: &HashSet<CellPos>,
    grid: GridSize,
) -> Option<(i16, i16)> {
    let mut queue: VecDeque<(i16, i16)> = VecDeque::new();
    let mut visited: HashSet<(i16, i16)> = HashSet::new();
    queue.push_back((0, 0));
    visited.insert((0, 0));

    while let Some((dr, dc)) = queue.pop_front() {
        if dr != 0 || dc != 0 {
            let fits = cluster.iter().all(|cell| {
                let shifted = cell.offset(dr, dc);
                grid.contains(shifted) && !occupied.contains(&shifted)
            });
            if fits {
                return Some((dr, dc));
            }
        }

        for (step_r, step_c) in RING_DIRS {
            let next = (dr + step_r, dc + step_c);
            if next.0.abs() < grid.rows as i16
                && next.1.abs() < grid.cols as i16
                && visited.insert(next)
            {
                queue.push_back(next);
            }
        }
    }

    None
}
