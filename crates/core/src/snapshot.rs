use serde::{Deserialize, Serialize};

use grid_jigsaw_types::{CellPos, GameStatus, GridSize, GroupId, PieceId};

use crate::engine::PuzzleEngine;

/// Read-only view of one piece, for rendering and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub id: PieceId,
    pub current: CellPos,
    pub correct: CellPos,
    pub group: GroupId,
    pub z_index: u32,
    pub locked: bool,
}

/// Read-only view of the whole engine after a call.
///
/// Pieces are sorted ascending by id, so two snapshots of identical states
/// compare (and serialize) identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub pieces: Vec<PieceSnapshot>,
    pub grid: GridSize,
    pub status: GameStatus,
    pub moves: u32,
    pub max_z_index: u32,
    pub epoch: u32,
    pub seed: u32,
    pub initialized: bool,
}

impl EngineSnapshot {
    pub fn clear(&mut self) {
        self.pieces.clear();
        self.grid = GridSize { cols: 0, rows: 0 };
        self.status = GameStatus::Playing;
        self.moves = 0;
        self.max_z_index = 0;
        self.epoch = 0;
        self.seed = 0;
        self.initialized = false;
    }
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            pieces: Vec::new(),
            grid: GridSize { cols: 0, rows: 0 },
            status: GameStatus::Playing,
            moves: 0,
            max_z_index: 0,
            epoch: 0,
            seed: 0,
            initialized: false,
        }
    }
}

impl PuzzleEngine {
    /// Fill `out` with the current state, reusing its piece allocation.
    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        out.pieces.clear();
        out.pieces.extend(self.pieces().iter().map(|p| PieceSnapshot {
            id: p.id,
            current: p.current,
            correct: p.correct,
            group: p.group,
            z_index: p.z_index,
            locked: p.locked,
        }));
        out.grid = self.grid();
        out.status = self.status();
        out.moves = self.moves();
        out.max_z_index = self.max_z_index();
        out.epoch = self.epoch();
        out.seed = self.seed();
        out.initialized = self.initialized();
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut s = EngineSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
