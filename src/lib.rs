//! Grid jigsaw (workspace facade crate).
//!
//! This package keeps the public `grid_jigsaw::{core,engine,types}` API in
//! one place while the implementation lives in dedicated crates under
//! `crates/`.

pub use grid_jigsaw_core as core;
pub use grid_jigsaw_engine as engine;
pub use grid_jigsaw_types as types;
