//! Core game types and logic (grid, viewer, actors, animation).
//!
//! Re-exports:
//! - `grid`: tile grid loading and cell queries
//! - `player`: viewer pose and movement with wall sliding
//! - `input`: actions, input providers and per-tick movement
//! - `facing`: 8-way facing of actors relative to the viewer
//! - `animation`: clips, clip libraries and the per-actor animator
//! - `actor`: scripted actors
//! - `world`: the per-tick simulation step

pub mod actor;
pub mod animation;
pub mod facing;
pub mod grid;
pub mod input;
pub mod math;
pub mod player;
pub mod world;
