//! One frame: depth pass, walls, sprites, overlay.
use log::trace;

use crate::core::world::World;
use crate::render::depth::DepthBuffer;
use crate::render::draw::DrawSink;
use crate::render::minimap::draw_minimap;
use crate::render::sprites::draw_actors;
use crate::render::textures::TextureProvider;
use crate::render::walls::{draw_walls, paint_ceiling_and_floor};

/// Owns the per-frame depth buffer so it is reused between frames.
#[derive(Default)]
pub struct Renderer {
    depth: DepthBuffer,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth buffer of the last rendered frame.
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Walls always land before sprites so sprite occlusion sees the
    /// finished depth buffer.
    pub fn render(
        &mut self,
        world: &World,
        textures: &impl TextureProvider,
        sink: &mut impl DrawSink,
    ) {
        let cfg = &world.config;
        let pose = &world.player.pose;

        self.depth.rebuild(&world.grid, pose, cfg);
        trace!(
            "depth pass: {} columns, {} hits",
            self.depth.len(),
            self.depth.columns().iter().filter(|c| c.hit.is_some()).count()
        );

        paint_ceiling_and_floor(sink, cfg);
        draw_walls(&self.depth, textures, sink, cfg);
        draw_actors(&world.actors, pose, &self.depth, textures, sink, cfg);

        if cfg.show_minimap {
            draw_minimap(&world.grid, pose, &self.depth, sink, cfg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::grid::Grid;
    use crate::core::math::Vec2;
    use crate::render::draw::{DrawList, DrawOp};
    use crate::render::textures::TextureManager;
    use crate::render::walls::{CEILING, FLOOR};

    fn world(show_minimap: bool) -> World {
        let cfg = Config {
            resolution: 40,
            show_minimap,
            ..Config::default()
        };
        World::new(Grid::original_level(), Vec2::new(110.0, 540.0), -45.0, cfg).unwrap()
    }

    #[test]
    fn frame_starts_with_ceiling_and_floor() {
        let w = world(false);
        let mut tm = TextureManager::new();
        tm.fill_fallbacks(&w.grid, &Default::default(), &[]);
        let mut list = DrawList::new();
        let mut r = Renderer::new();
        r.render(&w, &tm, &mut list);

        assert!(matches!(list.ops[0], DrawOp::Fill { color, .. } if color == CEILING));
        assert!(matches!(list.ops[1], DrawOp::Fill { color, .. } if color == FLOOR));
        assert_eq!(r.depth().len(), 40);
        // every column of the enclosed level hits a wall, each textured
        let blits = list.ops.iter().filter(|op| matches!(op, DrawOp::Blit { .. })).count();
        assert_eq!(blits, 40);
    }

    #[test]
    fn minimap_is_optional() {
        let tm = TextureManager::new();
        let mut r = Renderer::new();

        let mut off = DrawList::new();
        r.render(&world(false), &tm, &mut off);
        let mut on = DrawList::new();
        r.render(&world(true), &tm, &mut on);
        assert!(on.ops.len() > off.ops.len());
    }
}
