//! Rules engine for the 2048 sliding-tile merge puzzle.
//!
//! The interesting logic lives in [`engine`]: board state, directional move
//! resolution, random tile spawning, and terminal detection. Rendering and
//! input handling belong to the front-end crate.

pub mod engine;

pub use engine::{Board, Move, SpawnWeights};
