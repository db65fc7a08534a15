//! Rendering: depth pass, wall strips, billboards and the debug overlay.
//!
//! Re-exports:
//! - `caster`: DDA grid ray caster
//! - `depth`: Per-column ray hits for one frame
//! - `walls`: Wall strip height, texture column and the wall pass
//! - `sprites`: Billboard projection, occlusion and sorting
//! - `minimap`: Top-down overlay
//! - `frame`: `Renderer` tying the passes together
//! - `draw`: Colours, rects and the `DrawSink` seam
//! - `textures`: Pixmaps, wall bindings and fallbacks
//! - `framebuffer`: CPU framebuffer and its software `DrawSink`

pub mod caster;
pub mod depth;
pub mod draw;
pub mod frame;
pub mod framebuffer;
pub mod minimap;
pub mod sprites;
pub mod textures;
pub mod walls;
