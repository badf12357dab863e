//! Drop facade - the layer a presentation frontend talks to
//!
//! Converts a raw drop position (pixels relative to the board origin) into a
//! grid cell, runs the placement, and folds the outcome into an error code
//! plus a feedback cue the UI can map to haptics or sound.

pub mod place;

pub use place::{apply_drop, cell_for_drop, DropCue, DropError, DropReport};
