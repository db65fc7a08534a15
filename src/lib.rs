//! Grid ray caster with textured walls and depth-tested, 8-way animated
//! sprites.
//!
//! Re-exports:
//! - `config`: Runtime tunables and environment overrides
//! - `core`: Grid, viewer, actors and animation
//! - `error`: Construction-time errors
//! - `render`: Depth pass, walls, sprites and the software canvas

pub mod config;
pub mod core;
pub mod error;
pub mod render;
