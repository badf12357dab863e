//! Shared types module - data structures used across the whole engine
//!
//! This module defines the fundamental types used throughout the puzzle
//! engine. All types are pure data structures with no behavior beyond small
//! helpers, making them usable in any context (core logic, presentation
//! facade, serialized snapshots).
//!
//! # Coordinates
//!
//! The board is a `rows x cols` grid addressed as `(row, col)`:
//!
//! - **row** ranges `0..rows` (top to bottom)
//! - **col** ranges `0..cols` (left to right)
//!
//! Coordinates are `i16` so that relative offsets (which can be negative and
//! span the whole grid) never overflow during placement arithmetic.
//!
//! # Identity
//!
//! - [`PieceId`] doubles as the piece's correct slice: `id = row * cols + col`.
//! - [`GroupId`] is a plain numeric tag. Two pieces belong to the same group
//!   exactly when they carry the same tag; there is no group object. Merges
//!   always keep the numerically smaller tag, which makes merge results
//!   independent of the order in which adjacencies are discovered.
//!
//! # Examples
//!
//! ```
//! use grid_jigsaw_types::{CellPos, GridSize, PieceId};
//!
//! let grid = GridSize { cols: 3, rows: 4 };
//! assert_eq!(grid.cell_count(), 12);
//! assert!(grid.contains(CellPos { row: 3, col: 2 }));
//! assert!(!grid.contains(CellPos { row: 4, col: 0 }));
//!
//! // Piece 5 on a 3-wide grid belongs at row 1, col 2.
//! assert_eq!(PieceId(5).correct_cell(grid), CellPos { row: 1, col: 2 });
//! ```

use serde::{Deserialize, Serialize};

/// The four cardinal neighbor offsets `(d_row, d_col)`: up, down, left, right.
///
/// This exact order is load-bearing: it is the scan order for merge candidates
/// and the first ring of the free-cell search.
pub const CARDINAL_DIRS: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The eight neighbor offsets used by the free-cell search: the four
/// cardinals followed by up-left, up-right, down-left, down-right.
///
/// The fixed order is the tie-break between equidistant free cells, so a
/// displaced piece always lands in a reproducible spot.
pub const RING_DIRS: [(i16, i16); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Z-index raise applied to a dragged group when its placement commits.
pub const Z_LIFT: u32 = 10;

/// Z-index every piece starts with after a deal.
pub const INITIAL_Z: u32 = 1;

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: u8,
    pub rows: u8,
}

impl GridSize {
    /// Total number of cells (and therefore pieces) on this grid.
    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Whether `pos` lies inside `[0, rows) x [0, cols)`.
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row >= 0 && pos.row < self.rows as i16 && pos.col >= 0 && pos.col < self.cols as i16
    }
}

/// A grid cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: i16,
    pub col: i16,
}

impl CellPos {
    /// The cell shifted by `(d_row, d_col)`.
    pub fn offset(&self, d_row: i16, d_col: i16) -> CellPos {
        CellPos {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Whether `other` is one of this cell's four cardinal neighbors.
    pub fn is_cardinal_neighbor(&self, other: CellPos) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

/// Piece identity, `0..N-1` for an N-piece level.
///
/// The id also encodes the piece's correct slice of the image:
/// `id = correct_row * cols + correct_col`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PieceId(pub u16);

impl PieceId {
    /// Index into dense per-piece storage.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The cell this piece belongs in when the puzzle is solved.
    pub fn correct_cell(&self, grid: GridSize) -> CellPos {
        CellPos {
            row: (self.0 / grid.cols as u16) as i16,
            col: (self.0 % grid.cols as u16) as i16,
        }
    }
}

/// Group tag shared by every piece of one rigid cluster.
///
/// Initial singleton groups reuse the piece id value; tags minted later
/// (victim detaches, fracture fragments) are strictly larger, so "smaller tag
/// absorbs larger" keeps initial groups stable under merging.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GroupId(pub u32);

impl GroupId {
    /// The tag a piece starts with before any merge.
    pub fn initial_for(piece: PieceId) -> GroupId {
        GroupId(piece.0 as u32)
    }
}

/// Game lifecycle status.
///
/// `Won` is terminal: every mutating call becomes a no-op until the next
/// `initialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
}

impl GameStatus {
    /// Parse status from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "playing" => Some(GameStatus::Playing),
            "won" => Some(GameStatus::Won),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
        }
    }
}

/// Why a placement bounced.
///
/// Every variant is a routine negative outcome for the caller ("the drop
/// snapped back to its origin"), not an error condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceRejection {
    /// The level is already won; the engine is frozen.
    GameOver,
    /// The anchor id does not name a live piece.
    UnknownPiece,
    /// Some cell of the translated footprint falls off the grid.
    OutOfBounds,
    /// A displaced piece had nowhere to go. Unreachable on a well-formed
    /// level (the dragged group always vacates as many cells as it claims),
    /// but handled rather than trusted.
    NoFreeCell,
}

/// Outcome of a placement attempt.
///
/// The equivalent of the `{accepted, merged}` pair of the touch interface,
/// expressed as a sum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementResult {
    /// The group moved; `merged` records whether any group union fired.
    Placed { merged: bool },
    /// Nothing changed.
    Rejected(PlaceRejection),
}

impl PlacementResult {
    /// Whether the placement committed.
    pub fn accepted(&self) -> bool {
        matches!(self, PlacementResult::Placed { .. })
    }

    /// Whether the placement committed and produced at least one merge.
    pub fn merged(&self) -> bool {
        matches!(self, PlacementResult::Placed { merged: true })
    }
}
