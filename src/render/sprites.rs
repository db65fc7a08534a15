//! Sprite drawing helpers (billboards + sorting).
//!
//! Exposes:
//! - `project`: screen-space placement of a billboard
//! - `visible_columns`: columns of a billboard not hidden behind walls
//! - `draw_actors`: sort farthest-first and composite every actor
use std::cmp::Ordering;

use log::trace;

use crate::config::{Config, OcclusionDepth};
use crate::core::actor::Actor;
use crate::core::animation::FrameRect;
use crate::core::math::{Vec2, signed_angle_between};
use crate::core::player::Pose;
use crate::render::depth::DepthBuffer;
use crate::render::draw::{DrawSink, Rect, RectF};
use crate::render::textures::{TextureId, TextureProvider};

/// Closer than this (in cells) the projection blows up; skip the sprite.
const MIN_DISTANCE: f32 = 0.05;

/// A sprite placed on screen. Column values are in strip units.
#[derive(Clone, Debug, PartialEq)]
pub struct Billboard {
    /// Euclidean distance to the viewer in cell units.
    pub distance: f32,
    /// Signed angle off the view axis in degrees.
    pub angle: f32,
    pub center: f32,
    /// Width in columns.
    pub size: f32,
    /// Unclipped column range.
    pub first: i64,
    pub end: i64,
    /// Clipped to the screen; never empty.
    pub visible: std::ops::Range<usize>,
    /// Vertical extent in pixels.
    pub top: f32,
    pub height: f32,
}

impl Billboard {
    /// Horizontal texture coordinate in [0, 1) for column `i`.
    pub fn u(&self, i: usize) -> f32 {
        let span = (self.end - self.first).max(1) as f32;
        ((i as i64 - self.first) as f32 / span).clamp(0.0, 0.999_999)
    }
}

/// Places a sprite at world position `pos` on screen, or `None` when it
/// falls outside the view cone or its column range is empty.
pub fn project(pos: Vec2, pose: &Pose, cfg: &Config) -> Option<Billboard> {
    let to_sprite = pos - pose.pos;
    let distance = to_sprite.length() / cfg.cell_size;
    if distance < MIN_DISTANCE {
        return None;
    }

    let angle = signed_angle_between(pose.direction(), to_sprite);
    let half_fov = cfg.fov * 0.5;
    if angle.abs() > half_fov + cfg.sprite_cull_margin {
        return None;
    }

    let res = cfg.resolution as f32;
    let half = res * 0.5;
    let height = cfg.sprite_scale / distance;
    let size = height / cfg.strip_width();
    let center = half + (angle / half_fov) * half;

    let first = (center - size / 2.0).floor() as i64;
    let end = (center + size / 2.0).floor() as i64;
    let lo = first.clamp(0, cfg.resolution as i64) as usize;
    let hi = end.clamp(0, cfg.resolution as i64) as usize;
    if lo >= hi {
        return None;
    }

    // feet on the floor line at this distance
    let bottom = cfg.horizon() + (cfg.wall_scale / distance) / 2.0;

    Some(Billboard {
        distance,
        angle,
        center,
        size,
        first,
        end,
        visible: lo..hi,
        top: bottom - height,
        height,
    })
}

/// Columns of `bb` in front of the wall recorded for that column.
pub fn visible_columns<'a>(
    bb: &'a Billboard,
    depth: &'a DepthBuffer,
    mode: OcclusionDepth,
) -> impl Iterator<Item = usize> + 'a {
    bb.visible
        .clone()
        .filter(move |&i| bb.distance < depth.depth(i, mode))
}

/// Draws one billboard column by column, each one a single texel wide
/// slice of `frame`.
pub fn draw_billboard(
    bb: &Billboard,
    sheet: TextureId,
    frame: FrameRect,
    depth: &DepthBuffer,
    sink: &mut impl DrawSink,
    cfg: &Config,
) {
    let strip = cfg.strip_width();
    for i in visible_columns(bb, depth, cfg.occlusion) {
        let tx = frame.x + ((bb.u(i) * frame.w as f32) as u32).min(frame.w.saturating_sub(1));
        sink.blit(
            sheet,
            Rect::new(tx, frame.y, 1, frame.h),
            RectF::new(i as f32 * strip, bb.top, strip, bb.height),
        );
    }
}

/// Composites every drawable actor, farthest first, against `depth`.
pub fn draw_actors(
    actors: &[Actor],
    pose: &Pose,
    depth: &DepthBuffer,
    textures: &impl TextureProvider,
    sink: &mut impl DrawSink,
    cfg: &Config,
) {
    let mut order: Vec<(f32, &Actor)> = actors
        .iter()
        .map(|a| (a.pos.distance(pose.pos), a))
        .collect();
    order.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    for (_, actor) in order {
        let Some((sheet_name, frame)) = actor.sprite() else {
            continue;
        };
        let Some(sheet) = textures.sheet(sheet_name) else {
            trace!("no texture for sheet {sheet_name:?}");
            continue;
        };
        if let Some(bb) = project(actor.pos, pose, cfg) {
            draw_billboard(&bb, sheet, frame, depth, sink, cfg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::dir_from_degrees;
    use crate::render::caster::{RayHit, Side};
    use crate::render::depth::Column;

    fn cfg() -> Config {
        Config::default()
    }

    fn wall_at(perp: f32, raw: f32) -> Column {
        Column {
            ray: Vec2::new(1.0, 0.0),
            beta: 0.0,
            hit: Some(RayHit {
                point: Vec2::ZERO,
                distance: raw,
                perp_distance: perp,
                side: Side::Vertical,
                tile: 3,
                cell: (0, 0),
            }),
        }
    }

    #[test]
    fn sprite_straight_ahead_is_centred() {
        let pose = Pose::new(Vec2::new(64.0, 64.0), 0.0);
        let bb = project(Vec2::new(64.0 + 4.0 * 64.0, 64.0), &pose, &cfg()).unwrap();
        assert!((bb.distance - 4.0).abs() < 1e-4);
        assert!(bb.angle.abs() < 1e-4);
        assert!((bb.center - 100.0).abs() < 1e-3);
        // 640 / 4 px = 160 px = 50 strips of 3.2 px
        assert!((bb.size - 50.0).abs() < 1e-3);
        assert_eq!((bb.first, bb.end), (75, 125));
        assert_eq!(bb.visible, 75..125);
        assert!((bb.top + bb.height - 400.0).abs() < 1e-3);
    }

    #[test]
    fn sprites_behind_or_beside_are_culled() {
        let pose = Pose::new(Vec2::new(320.0, 320.0), 0.0);
        assert!(project(Vec2::new(100.0, 320.0), &pose, &cfg()).is_none());
        assert!(project(Vec2::new(320.0, 500.0), &pose, &cfg()).is_none());
        assert!(project(Vec2::new(320.0, 320.0), &pose, &cfg()).is_none());
    }

    #[test]
    fn off_centre_sprite_is_clipped_to_screen() {
        let pose = Pose::new(Vec2::new(0.0, 0.0), 0.0);
        // 36 degrees to the right, just past the half FOV but inside the margin
        let pos = dir_from_degrees(36.0) * (3.0 * 64.0);
        let bb = project(pos, &pose, &cfg()).unwrap();
        assert!(bb.center > 200.0);
        assert!(bb.end > 200);
        assert_eq!(bb.visible.end, 200);
        assert!(bb.visible.start < 200);
    }

    #[test]
    fn angle_wraps_across_the_heading_seam() {
        let pose = Pose::new(Vec2::new(0.0, 0.0), 359.0);
        let pos = dir_from_degrees(1.0) * (5.0 * 64.0);
        let bb = project(pos, &pose, &cfg()).unwrap();
        assert!((bb.angle - 2.0).abs() < 1e-3);
        assert!(bb.center > 100.0);
    }

    #[test]
    fn walls_occlude_farther_sprites_per_column() {
        let cfg = cfg();
        let pose = Pose::new(Vec2::ZERO, 0.0);
        let columns = vec![wall_at(5.0, 5.0); cfg.resolution];
        let depth = DepthBuffer::from_columns(Vec2::ZERO, cfg.max_view_cells(), columns);

        let far = project(Vec2::new(6.0 * 64.0, 0.0), &pose, &cfg).unwrap();
        assert_eq!(visible_columns(&far, &depth, OcclusionDepth::Perpendicular).count(), 0);

        let near = project(Vec2::new(4.0 * 64.0, 0.0), &pose, &cfg).unwrap();
        assert_eq!(
            visible_columns(&near, &depth, OcclusionDepth::Perpendicular).count(),
            near.visible.len()
        );
    }

    #[test]
    fn occlusion_mode_changes_the_result() {
        let cfg = cfg();
        let pose = Pose::new(Vec2::ZERO, 0.0);
        // wall perpendicularly at 5 but 6 along the ray
        let columns = vec![wall_at(5.0, 6.0); cfg.resolution];
        let depth = DepthBuffer::from_columns(Vec2::ZERO, cfg.max_view_cells(), columns);
        let bb = project(Vec2::new(5.5 * 64.0, 0.0), &pose, &cfg).unwrap();
        assert_eq!(visible_columns(&bb, &depth, OcclusionDepth::Perpendicular).count(), 0);
        assert_eq!(visible_columns(&bb, &depth, OcclusionDepth::Raw).count(), bb.visible.len());
    }

    #[test]
    fn texture_u_spans_the_unclipped_range() {
        let pose = Pose::new(Vec2::new(64.0, 64.0), 0.0);
        let bb = project(Vec2::new(64.0 + 4.0 * 64.0, 64.0), &pose, &cfg()).unwrap();
        assert_eq!(bb.u(75), 0.0);
        assert!((bb.u(100) - 0.5).abs() < 1e-6);
        assert!(bb.u(124) < 1.0);
    }
}
