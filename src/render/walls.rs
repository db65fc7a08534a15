//! Wall strips: projected height, texture column and the wall pass.
use crate::config::Config;
use crate::render::caster::{RayHit, Side};
use crate::render::depth::DepthBuffer;
use crate::render::draw::{DrawSink, Rect, RectF, Rgba};
use crate::render::textures::TextureProvider;

pub const CEILING: Rgba = Rgba::grey(0x38);
pub const FLOOR: Rgba = Rgba::grey(0x70);

/// Projected wall height in pixels. Inverse in perpendicular distance.
#[inline]
pub fn wall_height(hit: &RayHit, wall_scale: f32) -> f32 {
    wall_scale / hit.perp_distance.max(1e-4)
}

/// Position across the struck face in [0, 1): along y for faces on
/// vertical grid lines, along x for horizontal ones.
#[inline]
pub fn face_offset(hit: &RayHit, cell_size: f32) -> f32 {
    let along = match hit.side {
        Side::Vertical => hit.point.y,
        Side::Horizontal => hit.point.x,
    };
    along.rem_euclid(cell_size) / cell_size
}

/// Texel column of a `tex_width`-wide texture for this hit.
#[inline]
pub fn texture_column(hit: &RayHit, cell_size: f32, tex_width: u32) -> u32 {
    let col = (face_offset(hit, cell_size) * tex_width as f32).floor() as u32;
    col.min(tex_width.saturating_sub(1))
}

/// Flat grey for a strip with no texture, darker with distance and on
/// x-step faces.
pub fn shade(hit: &RayHit) -> Rgba {
    let mut v = 255.0 - 255.0 * (hit.perp_distance / 15.0);
    if hit.side == Side::Vertical {
        v -= 20.0;
    }
    Rgba::grey(v.clamp(0.0, 255.0) as u8)
}

/// Ceiling over the top half of the view, floor under the bottom half.
pub fn paint_ceiling_and_floor(sink: &mut impl DrawSink, cfg: &Config) {
    let w = cfg.view_width as f32;
    let hh = cfg.horizon();
    sink.fill_rect(RectF::new(0.0, 0.0, w, hh), CEILING);
    sink.fill_rect(RectF::new(0.0, hh, w, cfg.view_height as f32 - hh), FLOOR);
}

/// One textured strip per column with a hit; misses draw nothing.
pub fn draw_walls(
    depth: &DepthBuffer,
    textures: &impl TextureProvider,
    sink: &mut impl DrawSink,
    cfg: &Config,
) {
    let strip = cfg.strip_width();
    let hh = cfg.horizon();

    for (i, col) in depth.columns().iter().enumerate() {
        let Some(hit) = col.hit.as_ref() else {
            continue;
        };
        let height = wall_height(hit, cfg.wall_scale);
        let dst = RectF::new(i as f32 * strip, hh - height / 2.0, strip, height);

        let tex = textures
            .wall(hit.tile, hit.side)
            .and_then(|id| textures.size(id).map(|size| (id, size)));
        match tex {
            Some((id, (tw, th))) => {
                let tx = texture_column(hit, cfg.cell_size, tw);
                sink.blit(id, Rect::new(tx, 0, 1, th), dst);
            }
            None => sink.fill_rect(dst, shade(hit)),
        }
    }
}
