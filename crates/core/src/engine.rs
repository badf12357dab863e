//! Engine module - the grid placement / merge / split / fracture state machine
//!
//! [`PuzzleEngine`] owns every piece, the spatial occupancy index, the group
//! membership index and the game status. All four public operations
//! (`initialize`, `attempt_placement`, `bring_group_to_front`, `reset`) are
//! atomic: they either commit fully or leave the state untouched.
//!
//! The placement pipeline is the subtle part:
//!
//! 1. rigid translation of the dragged group to the target cell,
//! 2. bounds check,
//! 3. victim detection (stationary pieces under the incoming footprint),
//! 4. victim relocation via the nearest-free-cell search against a simulated
//!    occupancy set (destinations reserved one by one),
//! 5. commit (cells, z-order, victim detach into fresh singleton groups),
//! 6. fracture check on every donor group that lost a member,
//! 7. merge propagation over a worklist of touched groups,
//! 8. win check and move accounting.
//!
//! Merges always keep the numerically smaller group tag, which makes the
//! result independent of discovery order; the worklist re-queues a surviving
//! group until a full member scan finds no partner.

use std::collections::{BTreeSet, HashSet, VecDeque};

use arrayvec::ArrayVec;

use grid_jigsaw_types::{
    CellPos, GameStatus, GridSize, GroupId, PieceId, PlaceRejection, PlacementResult,
    CARDINAL_DIRS, INITIAL_Z, Z_LIFT,
};

use crate::board::Board;
use crate::groups::{connected_components, GroupIdGen, GroupIndex};
use crate::rng::SimpleRng;
use crate::search::nearest_free_shift;

/// Grid an engine idles on before the first `initialize`.
pub const DEFAULT_GRID: GridSize = GridSize { cols: 3, rows: 4 };

/// One puzzle piece. Pieces never die within a level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    /// Cell the piece currently occupies.
    pub current: CellPos,
    /// Cell the piece belongs in; immutable for the life of the level.
    pub correct: CellPos,
    /// Tag of the rigid cluster this piece moves with.
    pub group: GroupId,
    /// Render order; monotonically raised, never lowered.
    pub z_index: u32,
    /// Reserved for a frozen-piece feature; the engine never toggles it.
    pub locked: bool,
}

impl Piece {
    /// Whether the piece sits on its correct cell.
    pub fn is_home(&self) -> bool {
        self.current == self.correct
    }
}

/// The puzzle state machine. One instance per active level attempt.
#[derive(Debug, Clone)]
pub struct PuzzleEngine {
    /// Dense id-indexed piece storage; `pieces[i].id == PieceId(i)`.
    pieces: Vec<Piece>,
    board: Board,
    groups: GroupIndex,
    group_ids: GroupIdGen,
    max_z_index: u32,
    status: GameStatus,
    moves: u32,
    /// Increments on every deal; lets a presentation layer key per-level
    /// effects (deal-in animation) off a fresh value.
    epoch: u32,
    initialized: bool,
    rng: SimpleRng,
}

impl PuzzleEngine {
    /// Create an empty, uninitialized engine with a deterministic RNG seed.
    pub fn new(seed: u32) -> Self {
        Self {
            pieces: Vec::new(),
            board: Board::new(DEFAULT_GRID),
            groups: GroupIndex::new(),
            group_ids: GroupIdGen::new(),
            max_z_index: INITIAL_Z,
            status: GameStatus::Playing,
            moves: 0,
            epoch: 0,
            initialized: false,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn grid(&self) -> GridSize {
        self.board.grid()
    }

    pub fn max_z_index(&self) -> u32 {
        self.max_z_index
    }

    /// Current RNG state; replaying from this value reproduces future deals.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// Every piece, ascending by id.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Group tag of a piece.
    pub fn group_of(&self, id: PieceId) -> Option<GroupId> {
        self.pieces.get(id.index()).map(|p| p.group)
    }

    /// Members of a group, ascending by piece id. `None` for a dead tag.
    pub fn group_members(&self, group: GroupId) -> Option<&BTreeSet<PieceId>> {
        self.groups.members(group)
    }

    /// Number of live groups.
    pub fn group_count(&self) -> usize {
        self.groups.group_count()
    }

    /// Deal a fresh level: every cell gets exactly one piece, uniformly
    /// shuffled, then pieces that happen to land correctly adjacent merge
    /// immediately.
    ///
    /// # Panics
    ///
    /// Panics when either dimension is zero - that is a caller contract
    /// violation, not a runtime condition.
    pub fn initialize(&mut self, grid: GridSize) {
        assert!(
            grid.cols >= 1 && grid.rows >= 1,
            "grid dimensions must be at least 1x1"
        );

        let mut cells: Vec<CellPos> = Vec::with_capacity(grid.cell_count());
        for row in 0..grid.rows as i16 {
            for col in 0..grid.cols as i16 {
                cells.push(CellPos { row, col });
            }
        }
        self.rng.shuffle(&mut cells);
        self.deal(grid, &cells);
    }

    /// Deal a level with an explicit cell assignment (piece `i` starts on
    /// `layout[i]`), e.g. to restore a saved layout. Returns `false` and
    /// leaves the engine untouched when the layout is not a permutation of
    /// the grid's cells.
    pub fn initialize_from_layout(&mut self, grid: GridSize, layout: &[CellPos]) -> bool {
        if grid.cols < 1 || grid.rows < 1 || layout.len() != grid.cell_count() {
            return false;
        }
        let distinct: HashSet<CellPos> = layout.iter().copied().collect();
        if distinct.len() != layout.len() || !layout.iter().all(|&c| grid.contains(c)) {
            return false;
        }
        self.deal(grid, layout);
        true
    }

    fn deal(&mut self, grid: GridSize, cells: &[CellPos]) {
        self.pieces.clear();
        self.groups.clear();
        self.board = Board::new(grid);

        for (i, &cell) in cells.iter().enumerate() {
            let id = PieceId(i as u16);
            let group = GroupId::initial_for(id);
            self.pieces.push(Piece {
                id,
                current: cell,
                correct: id.correct_cell(grid),
                group,
                z_index: INITIAL_Z,
                locked: false,
            });
            self.board.set(cell.row, cell.col, Some(id));
            self.groups.insert(group, id);
        }
        self.group_ids.reset(cells.len() as u32);

        // Initial auto-merge pass: seed the worklist with every group.
        let seeds: Vec<GroupId> = self.groups.groups().collect();
        self.propagate_merges(seeds);

        self.status = GameStatus::Playing;
        self.moves = 0;
        self.max_z_index = INITIAL_Z;
        self.epoch += 1;
        self.initialized = true;
    }

    /// Drop the anchor piece's group so the anchor lands on
    /// `(target_row, target_col)`; the rest of the group translates rigidly.
    ///
    /// On success the whole pipeline runs: victims are displaced to nearby
    /// free cells as fresh singletons, donor groups are fracture-checked, and
    /// merges propagate until exhausted. On any rejection nothing changes.
    pub fn attempt_placement(
        &mut self,
        anchor: PieceId,
        target_row: i16,
        target_col: i16,
    ) -> PlacementResult {
        if self.status == GameStatus::Won {
            return PlacementResult::Rejected(PlaceRejection::GameOver);
        }
        let Some(anchor_piece) = self.pieces.get(anchor.index()) else {
            return PlacementResult::Rejected(PlaceRejection::UnknownPiece);
        };
        let dragged_group = anchor_piece.group;
        let anchor_cell = anchor_piece.current;
        let grid = self.board.grid();

        let Some(members) = self.groups.members(dragged_group) else {
            return PlacementResult::Rejected(PlaceRejection::UnknownPiece);
        };

        // Rigid translation: every member keeps its offset from the anchor.
        let mut targets: Vec<(PieceId, CellPos)> = Vec::with_capacity(members.len());
        for &member in members {
            let cur = self.pieces[member.index()].current;
            let target = CellPos {
                row: target_row + (cur.row - anchor_cell.row),
                col: target_col + (cur.col - anchor_cell.col),
            };
            if !grid.contains(target) {
                return PlacementResult::Rejected(PlaceRejection::OutOfBounds);
            }
            targets.push((member, target));
        }
        let target_cells: HashSet<CellPos> = targets.iter().map(|&(_, t)| t).collect();

        // Victims: stationary pieces under the incoming footprint. Everything
        // else that is not moving seeds the simulated occupancy.
        let mut victims: Vec<PieceId> = Vec::new();
        let mut occupied: HashSet<CellPos> = target_cells.clone();
        for piece in &self.pieces {
            if piece.group == dragged_group {
                continue;
            }
            if target_cells.contains(&piece.current) {
                victims.push(piece.id);
            } else {
                occupied.insert(piece.current);
            }
        }

        // Resolve victims in ascending id order, reserving each destination
        // before the next victim runs so two never claim the same cell.
        let mut victim_moves: Vec<(PieceId, CellPos)> = Vec::with_capacity(victims.len());
        for &victim in &victims {
            let cur = self.pieces[victim.index()].current;
            match nearest_free_shift(&[cur], &occupied, grid) {
                Some((dr, dc)) => {
                    let dest = cur.offset(dr, dc);
                    occupied.insert(dest);
                    victim_moves.push((victim, dest));
                }
                None => return PlacementResult::Rejected(PlaceRejection::NoFreeCell),
            }
        }

        // Commit. No rejection below this line.
        let lifted_z = self.max_z_index + Z_LIFT;
        let detached_z = self.max_z_index + 1;

        // Donor groups must be captured before victims are re-tagged.
        let donors: BTreeSet<GroupId> = victims
            .iter()
            .map(|&v| self.pieces[v.index()].group)
            .collect();

        // Vacate every moving cell before writing any new footprint; target
        // cells overlap the dragged group's own old cells and victim cells.
        for &(member, _) in &targets {
            let cur = self.pieces[member.index()].current;
            self.board.set(cur.row, cur.col, None);
        }
        for &(victim, _) in &victim_moves {
            let cur = self.pieces[victim.index()].current;
            self.board.set(cur.row, cur.col, None);
        }

        for &(member, target) in &targets {
            let piece = &mut self.pieces[member.index()];
            piece.current = target;
            piece.z_index = lifted_z;
            self.board.set(target.row, target.col, Some(member));
        }

        let mut touched: Vec<GroupId> = vec![dragged_group];
        for &(victim, dest) in &victim_moves {
            let fresh = self.group_ids.mint();
            let old = self.pieces[victim.index()].group;
            let piece = &mut self.pieces[victim.index()];
            piece.current = dest;
            piece.group = fresh;
            piece.z_index = detached_z;
            self.board.set(dest.row, dest.col, Some(victim));
            self.groups.relabel(victim, old, fresh);
            touched.push(fresh);
        }
        self.max_z_index = lifted_z;

        // Fracture: a donor that lost members may no longer be 4-connected.
        // The first component keeps the tag, the rest get fresh ones.
        for donor in donors {
            let survivors = match self.groups.members(donor) {
                Some(s) if s.len() > 1 => s.clone(),
                _ => continue,
            };
            let components =
                connected_components(&survivors, |p| self.pieces[p.index()].current);
            for component in components.iter().skip(1) {
                let fresh = self.group_ids.mint();
                for &piece in component {
                    self.pieces[piece.index()].group = fresh;
                    self.groups.relabel(piece, donor, fresh);
                }
                touched.push(fresh);
            }
        }

        let merged = self.propagate_merges(touched);

        if self.groups.group_count() == 1 {
            self.status = GameStatus::Won;
        }
        self.moves += 1;

        PlacementResult::Placed { merged }
    }

    /// Raise a whole group above everything else (the actively dragged group
    /// renders on top). No-op when the game is won or the tag is dead.
    pub fn bring_group_to_front(&mut self, group: GroupId) {
        if self.status == GameStatus::Won {
            return;
        }
        let Some(members) = self.groups.members(group) else {
            return;
        };
        let members: Vec<PieceId> = members.iter().copied().collect();
        let top = self.max_z_index + 1;
        for member in members {
            self.pieces[member.index()].z_index = top;
        }
        self.max_z_index = top;
    }

    /// Return to the pristine pre-`initialize` state. Does not re-shuffle;
    /// call `initialize` again to deal a new level.
    pub fn reset(&mut self) {
        self.pieces.clear();
        self.groups.clear();
        self.group_ids.reset(0);
        self.board = Board::new(DEFAULT_GRID);
        self.max_z_index = INITIAL_Z;
        self.status = GameStatus::Playing;
        self.moves = 0;
        self.epoch = 0;
        self.initialized = false;
    }

    /// First merge partner for `piece`: a neighbor from a different group
    /// whose correct offset equals the current offset. Neighbors are scanned
    /// up, down, left, right - the fixed order that makes results
    /// reproducible.
    fn mergeable_neighbor(&self, piece: PieceId) -> Option<PieceId> {
        let p = &self.pieces[piece.index()];

        let mut candidates: ArrayVec<(PieceId, (i16, i16)), 4> = ArrayVec::new();
        for (dr, dc) in CARDINAL_DIRS {
            if let Some(neighbor) = self.board.piece_at(p.current.offset(dr, dc)) {
                candidates.push((neighbor, (dr, dc)));
            }
        }

        for (neighbor_id, (dr, dc)) in candidates {
            let neighbor = &self.pieces[neighbor_id.index()];
            if neighbor.group != p.group
                && neighbor.correct.row == p.correct.row + dr
                && neighbor.correct.col == p.correct.col + dc
            {
                return Some(neighbor_id);
            }
        }
        None
    }

    /// Union two groups, keeping the numerically smaller tag.
    fn merge_groups(&mut self, a: GroupId, b: GroupId) -> GroupId {
        let (survivor, absorbed) = if a < b { (a, b) } else { (b, a) };
        let members: Vec<PieceId> = match self.groups.members(absorbed) {
            Some(s) => s.iter().copied().collect(),
            None => return survivor,
        };
        for member in members {
            self.pieces[member.index()].group = survivor;
            self.groups.relabel(member, absorbed, survivor);
        }
        survivor
    }

    /// Worklist merge propagation: scan each queued group's members for a
    /// merge partner; on a merge, re-queue the surviving group for another
    /// full scan. Terminates because every merge reduces the group count.
    /// Returns whether any merge fired.
    fn propagate_merges(&mut self, seeds: Vec<GroupId>) -> bool {
        let mut queue: VecDeque<GroupId> = seeds.into();
        let mut merged_any = false;

        while let Some(group) = queue.pop_front() {
            // Tag may have been absorbed since it was queued.
            let Some(members) = self.groups.members(group) else {
                continue;
            };
            let members: Vec<PieceId> = members.iter().copied().collect();

            let mut partner: Option<PieceId> = None;
            for piece in members {
                if let Some(neighbor) = self.mergeable_neighbor(piece) {
                    partner = Some(neighbor);
                    break;
                }
            }

            if let Some(neighbor) = partner {
                let other = self.pieces[neighbor.index()].group;
                let survivor = self.merge_groups(group, other);
                merged_any = true;
                queue.push_back(survivor);
            }
        }

        merged_any
    }
}

impl Default for PuzzleEngine {
    fn default() -> Self {
        Self::new(1)
    }
}
