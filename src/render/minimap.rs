//! Top-down debug overlay: grid, ray ends and the viewer.
use crate::config::Config;
use crate::core::grid::Grid;
use crate::core::player::Pose;
use crate::render::depth::DepthBuffer;
use crate::render::draw::{DrawSink, RectF, Rgba};

const BACKGROUND: Rgba = Rgba::new(0xdd, 0xdd, 0xdd, 220);
const WALL: Rgba = Rgba::grey(0x77);
const RAY_END: Rgba = Rgba::new(255, 165, 0, 255);
const VIEWER: Rgba = Rgba::new(0, 128, 0, 255);

/// Overlay size relative to the shorter view edge.
const SIZE_RATIO: f32 = 0.3;
const MARGIN: f32 = 8.0;
/// Only every n-th ray end gets a marker.
const RAY_STRIDE: usize = 8;

/// Draws the overlay in the top-left corner.
pub fn draw_minimap(
    grid: &Grid,
    pose: &Pose,
    depth: &DepthBuffer,
    sink: &mut impl DrawSink,
    cfg: &Config,
) {
    let extent = cfg.view_width.min(cfg.view_height) as f32 * SIZE_RATIO;
    let world_w = grid.width() as f32 * cfg.cell_size;
    let world_h = grid.height() as f32 * cfg.cell_size;
    let scale = extent / world_w.max(world_h);
    let block = cfg.cell_size * scale;

    sink.fill_rect(
        RectF::new(MARGIN, MARGIN, world_w * scale, world_h * scale),
        BACKGROUND,
    );

    for (cx, cy, _) in grid.walls() {
        sink.fill_rect(
            RectF::new(
                MARGIN + cx as f32 * block,
                MARGIN + cy as f32 * block,
                block,
                block,
            ),
            WALL,
        );
    }

    for i in (0..depth.len()).step_by(RAY_STRIDE) {
        if let Some(p) = depth.end_point(i, cfg.cell_size) {
            let x = p.x.clamp(0.0, world_w) * scale;
            let y = p.y.clamp(0.0, world_h) * scale;
            dot(sink, x, y, 1.0, RAY_END);
        }
    }

    let r = (block * 0.25).max(2.0);
    dot(sink, pose.pos.x * scale, pose.pos.y * scale, r, VIEWER);
}

fn dot(sink: &mut impl DrawSink, x: f32, y: f32, r: f32, color: Rgba) {
    sink.fill_rect(
        RectF::new(MARGIN + x - r, MARGIN + y - r, 2.0 * r, 2.0 * r),
        color,
    );
}
