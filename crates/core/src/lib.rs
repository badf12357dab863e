//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the whole grid-placement / merge / split / fracture
//! state machine. It has **zero dependencies** on UI, storage, or I/O,
//! making it:
//!
//! - **Deterministic**: the same seed and call sequence produce an identical
//!   final state, bit for bit
//! - **Testable**: every rule is exercised by unit and integration tests
//! - **Portable**: runs the same under a touch UI, a test harness, or a bot
//!
//! # Module Structure
//!
//! - [`board`]: flat occupancy grid - which piece sits on which cell
//! - [`engine`]: [`PuzzleEngine`], the placement pipeline and game lifecycle
//! - [`groups`]: group tags, the member index, 4-connectivity partition
//! - [`rng`]: seeded LCG + Fisher-Yates for the initial scatter
//! - [`search`]: nearest-free-cell BFS for displaced pieces
//! - [`snapshot`]: serializable read-only state views
//!
//! # Game Rules
//!
//! - Pieces scatter over the full grid at deal time; lucky correct
//!   adjacencies merge immediately.
//! - A drag moves a whole group rigidly; the drop either commits or bounces
//!   (out of bounds), never partially applies.
//! - Stationary pieces under an incoming footprint are displaced to the
//!   nearest free cell and detached as singletons.
//! - A group that loses a member splits into its remaining 4-connected
//!   components.
//! - Correctly-offset adjacent groups merge, smaller tag absorbing larger,
//!   until no merge remains; one single group means the level is won.
//!
//! # Example
//!
//! ```
//! use grid_jigsaw_core::PuzzleEngine;
//! use grid_jigsaw_types::{GridSize, PieceId};
//!
//! let mut engine = PuzzleEngine::new(12345);
//! engine.initialize(GridSize { cols: 3, rows: 4 });
//!
//! let result = engine.attempt_placement(PieceId(0), 1, 1);
//! assert!(result.accepted());
//! assert_eq!(engine.moves(), 1);
//! ```

pub mod board;
pub mod engine;
pub mod groups;
pub mod rng;
pub mod search;
pub mod snapshot;

pub use grid_jigsaw_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use engine::{Piece, PuzzleEngine, DEFAULT_GRID};
pub use groups::{connected_components, GroupIdGen, GroupIndex};
pub use rng::SimpleRng;
pub use search::nearest_free_shift;
pub use snapshot::{EngineSnapshot, PieceSnapshot};
