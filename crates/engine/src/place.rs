use grid_jigsaw_core::PuzzleEngine;
use grid_jigsaw_types::{CellPos, PieceId, PlaceRejection, PlacementResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropError {
    /// The level is already won; drops are ignored.
    NotPlayable,
    /// The dragged id does not name a live piece.
    UnknownPiece,
    /// The drop (or part of the dragged group) lands off the board.
    OutOfBounds,
    /// A displaced piece had no free cell to go to.
    NoFreeCell,
    /// Non-positive piece dimensions; the pixel conversion is meaningless.
    BadPieceExtent,
}

impl DropError {
    pub fn code(self) -> &'static str {
        match self {
            DropError::BadPieceExtent => "bad_piece_extent",
            DropError::NotPlayable
            | DropError::UnknownPiece
            | DropError::OutOfBounds
            | DropError::NoFreeCell => "invalid_drop",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            DropError::NotPlayable => "level is already won",
            DropError::UnknownPiece => "dragged piece id is not part of this level",
            DropError::OutOfBounds => "drop would place the group off the board",
            DropError::NoFreeCell => "no free cell for a displaced piece",
            DropError::BadPieceExtent => "piece pixel dimensions must be positive",
        }
    }

    /// The feedback cue a rejected drop maps to.
    pub fn cue(self) -> DropCue {
        DropCue::Reject
    }
}

/// Feedback classification for the UI (haptics, sound).
///
/// `Drag` is emitted by the frontend when a drag starts; the engine side
/// produces the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropCue {
    Drag,
    Move,
    Merge,
    Reject,
}

impl DropCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropCue::Drag => "drag",
            DropCue::Move => "move",
            DropCue::Merge => "merge",
            DropCue::Reject => "reject",
        }
    }
}

/// Outcome of an accepted drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropReport {
    pub merged: bool,
    pub cue: DropCue,
}

/// Round a drop position to the nearest grid cell.
///
/// `x`/`y` are the dragged piece's top-left corner in pixels relative to the
/// board origin; `piece_w`/`piece_h` are one cell's pixel dimensions.
/// Half-cell positions round toward the next cell (`floor(v + 0.5)`), matching
/// the touch interface this facade fronts.
pub fn cell_for_drop(
    x: f32,
    y: f32,
    piece_w: f32,
    piece_h: f32,
) -> Result<CellPos, DropError> {
    if piece_w <= 0.0 || piece_h <= 0.0 {
        return Err(DropError::BadPieceExtent);
    }
    Ok(CellPos {
        row: (y / piece_h + 0.5).floor() as i16,
        col: (x / piece_w + 0.5).floor() as i16,
    })
}

/// Convert a pixel drop to a cell and attempt the placement.
///
/// Off-board drops are rejected here without touching the engine; everything
/// else is the engine's verdict folded into a `DropReport` or `DropError`.
pub fn apply_drop(
    engine: &mut PuzzleEngine,
    piece: PieceId,
    x: f32,
    y: f32,
    piece_w: f32,
    piece_h: f32,
) -> Result<DropReport, DropError> {
    let cell = cell_for_drop(x, y, piece_w, piece_h)?;
    if !engine.grid().contains(cell) {
        return Err(DropError::OutOfBounds);
    }

    match engine.attempt_placement(piece, cell.row, cell.col) {
        PlacementResult::Placed { merged } => Ok(DropReport {
            merged,
            cue: if merged { DropCue::Merge } else { DropCue::Move },
        }),
        PlacementResult::Rejected(PlaceRejection::GameOver) => Err(DropError::NotPlayable),
        PlacementResult::Rejected(PlaceRejection::UnknownPiece) => Err(DropError::UnknownPiece),
        PlacementResult::Rejected(PlaceRejection::OutOfBounds) => Err(DropError::OutOfBounds),
        PlacementResult::Rejected(PlaceRejection::NoFreeCell) => Err(DropError::NoFreeCell),
    }
}
