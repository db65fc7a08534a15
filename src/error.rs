//! Error types for everything that can fail before the first frame.
//!
//! Nothing in the per-frame path returns these to the frame loop; see the
//! caster, animation and wall modules for the degraded fallbacks.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid tile {ch:?} at row {row}, column {col}")]
    InvalidTile { row: usize, col: usize, ch: char },
    #[error("cell count {found} does not match {width}x{height}")]
    Shape {
        width: usize,
        height: usize,
        found: usize,
    },
    #[error("start cell ({cx}, {cy}) is outside the grid or inside a wall")]
    BlockedStart { cx: i64, cy: i64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnimationError {
    #[error("clip {0:?} has no frames")]
    EmptyClip(String),
    #[error("no clip named {0:?}")]
    MissingClip(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}: {value:?} is not a valid number")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key}: {value:?} is not one of {expected}")]
    InvalidChoice {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{key} must be {rule}, got {value}")]
    OutOfRange {
        key: &'static str,
        rule: &'static str,
        value: f32,
    },
}
