//! Engine lifecycle tests - deal, reset, win closure, determinism

use grid_jigsaw::core::{EngineSnapshot, PuzzleEngine};
use grid_jigsaw::types::{CellPos, GameStatus, GridSize, PieceId, PlaceRejection, PlacementResult};

use std::collections::HashSet;

#[test]
fn test_initialize_scatters_whole_grid() {
    let grid = GridSize { cols: 5, rows: 4 };
    let mut engine = PuzzleEngine::new(2024);
    engine.initialize(grid);

    assert!(engine.initialized());
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.moves(), 0);
    assert_eq!(engine.pieces().len(), 20);

    // Every cell occupied exactly once.
    let cells: HashSet<CellPos> = engine.pieces().iter().map(|p| p.current).collect();
    assert_eq!(cells.len(), 20);
    for piece in engine.pieces() {
        assert!(grid.contains(piece.current));
        assert_eq!(piece.correct, piece.id.correct_cell(grid));
    }
}

#[test]
fn test_same_seed_same_deal() {
    let grid = GridSize { cols: 4, rows: 4 };
    let mut a = PuzzleEngine::new(12345);
    let mut b = PuzzleEngine::new(12345);
    a.initialize(grid);
    b.initialize(grid);

    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_different_seed_different_deal() {
    let grid = GridSize { cols: 4, rows: 4 };
    let mut a = PuzzleEngine::new(12345);
    let mut b = PuzzleEngine::new(54321);
    a.initialize(grid);
    b.initialize(grid);

    assert_ne!(a.seed(), b.seed());
    let layout_a: Vec<CellPos> = a.pieces().iter().map(|p| p.current).collect();
    let layout_b: Vec<CellPos> = b.pieces().iter().map(|p| p.current).collect();
    assert_ne!(layout_a, layout_b);
}

#[test]
fn test_same_seed_same_history_is_bit_identical() {
    let grid = GridSize { cols: 4, rows: 4 };
    let script: &[(u16, i16, i16)] = &[
        (0, 1, 1),
        (5, 0, 0),
        (3, 3, 3),
        (9, 9, 9), // out of bounds, rejected
        (12, 2, 1),
        (1, 0, 3),
    ];

    let mut a = PuzzleEngine::new(777);
    let mut b = PuzzleEngine::new(777);
    a.initialize(grid);
    b.initialize(grid);

    for &(piece, row, col) in script {
        let ra = a.attempt_placement(PieceId(piece), row, col);
        let rb = b.attempt_placement(PieceId(piece), row, col);
        assert_eq!(ra, rb);
    }

    assert_eq!(a.snapshot(), b.snapshot());
    // Bit-for-bit: the serialized forms match too.
    let ja = serde_json::to_string(&a.snapshot()).expect("serialize");
    let jb = serde_json::to_string(&b.snapshot()).expect("serialize");
    assert_eq!(ja, jb);
}

#[test]
fn test_rejection_leaves_state_byte_identical() {
    let grid = GridSize { cols: 3, rows: 3 };
    let mut engine = PuzzleEngine::new(42);
    engine.initialize(grid);
    let before = engine.snapshot();

    // Out of bounds target.
    let result = engine.attempt_placement(PieceId(0), 5, 5);
    assert_eq!(
        result,
        PlacementResult::Rejected(PlaceRejection::OutOfBounds)
    );
    assert_eq!(engine.snapshot(), before);

    // Unknown anchor.
    let result = engine.attempt_placement(PieceId(200), 0, 0);
    assert_eq!(
        result,
        PlacementResult::Rejected(PlaceRejection::UnknownPiece)
    );
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_win_closure_freezes_engine() {
    // Swapped 2x1: one drop wins.
    let grid = GridSize { cols: 2, rows: 1 };
    let swapped = [CellPos { row: 0, col: 1 }, CellPos { row: 0, col: 0 }];
    let mut engine = PuzzleEngine::new(1);
    assert!(engine.initialize_from_layout(grid, &swapped));

    let result = engine.attempt_placement(PieceId(0), 0, 0);
    assert!(result.merged());
    assert_eq!(engine.status(), GameStatus::Won);

    let frozen = engine.snapshot();

    // Any further placement is rejected with no change.
    assert_eq!(
        engine.attempt_placement(PieceId(0), 0, 1),
        PlacementResult::Rejected(PlaceRejection::GameOver)
    );
    assert_eq!(engine.snapshot(), frozen);

    // Raising a group is a no-op too.
    let group = engine.group_of(PieceId(0)).expect("piece exists");
    engine.bring_group_to_front(group);
    assert_eq!(engine.snapshot(), frozen);
}

#[test]
fn test_moves_count_accepted_placements_only() {
    // Quarter-turn 3x3 scatter: nine singletons, every in-bounds singleton
    // drop is accepted.
    let grid = GridSize { cols: 3, rows: 3 };
    let cells: Vec<CellPos> = [
        (0, 2),
        (1, 2),
        (2, 2),
        (0, 1),
        (1, 1),
        (2, 1),
        (0, 0),
        (1, 0),
        (2, 0),
    ]
    .iter()
    .map(|&(row, col)| CellPos { row, col })
    .collect();
    let mut engine = PuzzleEngine::new(1);
    assert!(engine.initialize_from_layout(grid, &cells));

    assert_eq!(engine.moves(), 0);
    assert!(engine.attempt_placement(PieceId(0), 1, 1).accepted());
    assert_eq!(engine.moves(), 1);

    // Rejected: no increment.
    assert!(!engine.attempt_placement(PieceId(0), 7, 7).accepted());
    assert_eq!(engine.moves(), 1);

    // A merge-less accepted drop still counts as one move.
    assert!(engine.attempt_placement(PieceId(8), 2, 1).accepted());
    assert_eq!(engine.moves(), 2);
}

#[test]
fn test_reset_then_reinitialize() {
    let grid = GridSize { cols: 3, rows: 4 };
    let mut engine = PuzzleEngine::new(31);
    engine.initialize(grid);
    // Whether this drop commits depends on the shuffle; reset must wipe
    // either way.
    let _ = engine.attempt_placement(PieceId(0), 2, 1);

    engine.reset();
    assert!(!engine.initialized());
    assert!(engine.pieces().is_empty());
    assert_eq!(engine.moves(), 0);
    assert_eq!(engine.epoch(), 0);
    assert_eq!(engine.group_count(), 0);

    // Reset does not reshuffle; a fresh initialize deals again.
    engine.initialize(grid);
    assert!(engine.initialized());
    assert_eq!(engine.pieces().len(), 12);
    assert_eq!(engine.epoch(), 1);
}

#[test]
fn test_epoch_increments_per_deal() {
    let mut engine = PuzzleEngine::new(8);
    engine.initialize(GridSize { cols: 2, rows: 2 });
    assert_eq!(engine.epoch(), 1);
    engine.initialize(GridSize { cols: 3, rows: 3 });
    assert_eq!(engine.epoch(), 2);
    assert_eq!(engine.pieces().len(), 9);
}

#[test]
fn test_z_order_lifecycle() {
    // Quarter-turn 2x2 scatter: four singletons, no initial merges.
    let grid = GridSize { cols: 2, rows: 2 };
    let cells = [
        CellPos { row: 0, col: 1 },
        CellPos { row: 1, col: 1 },
        CellPos { row: 0, col: 0 },
        CellPos { row: 1, col: 0 },
    ];
    let mut engine = PuzzleEngine::new(1);
    assert!(engine.initialize_from_layout(grid, &cells));

    assert_eq!(engine.max_z_index(), 1);
    for piece in engine.pieces() {
        assert_eq!(piece.z_index, 1);
    }

    // Raising the dragged group before the drop.
    let group = engine.group_of(PieceId(2)).expect("piece exists");
    engine.bring_group_to_front(group);
    assert_eq!(engine.max_z_index(), 2);
    assert_eq!(engine.piece(PieceId(2)).map(|p| p.z_index), Some(2));

    // A committed placement lifts the dragged group well above everything.
    assert!(engine.attempt_placement(PieceId(2), 1, 1).accepted());
    assert_eq!(engine.max_z_index(), 12);
    assert_eq!(engine.piece(PieceId(2)).map(|p| p.z_index), Some(12));
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let mut engine = PuzzleEngine::new(64);
    engine.initialize(GridSize { cols: 4, rows: 3 });
    engine.attempt_placement(PieceId(2), 1, 2);

    let snap = engine.snapshot();
    let json = serde_json::to_string(&snap).expect("serialize");
    let back: EngineSnapshot = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, snap);
    assert_eq!(back.status.as_str(), "playing");
}
