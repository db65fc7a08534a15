//! Per-column ray results for the current frame.
//!
//! Written once per frame by `rebuild`, then read by the wall pass, the
//! sprite occluder and the minimap. Nothing else mutates it.
use crate::config::{Config, OcclusionDepth};
use crate::core::grid::Grid;
use crate::core::math::{Vec2, dir_from_degrees};
use crate::core::player::Pose;
use crate::render::caster::{RayHit, cast_ray};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Column {
    /// Unit direction of the ray.
    pub ray: Vec2,
    /// Offset from the viewer heading in degrees.
    pub beta: f32,
    pub hit: Option<RayHit>,
}

#[derive(Clone, Debug, Default)]
pub struct DepthBuffer {
    columns: Vec<Column>,
    origin: Vec2,
    /// Far plane in cell units, used for columns without a hit.
    far: f32,
}

impl DepthBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer with precomputed columns.
    pub fn from_columns(origin: Vec2, far: f32, columns: Vec<Column>) -> Self {
        Self {
            columns,
            origin,
            far,
        }
    }

    /// Ray angle offset of strip `i` out of `resolution` for a `fov` degree view.
    #[inline]
    pub fn ray_offset(i: usize, resolution: usize, fov: f32) -> f32 {
        (i as f32 - resolution as f32 / 2.0) * (fov / resolution as f32)
    }

    /// Recasts every column from `pose`, overwriting the previous frame.
    pub fn rebuild(&mut self, grid: &Grid, pose: &Pose, cfg: &Config) {
        self.origin = pose.pos;
        self.far = cfg.max_view_cells();
        self.columns.clear();
        self.columns.extend((0..cfg.resolution).map(|i| {
            let beta = Self::ray_offset(i, cfg.resolution, cfg.fov);
            let ray = dir_from_degrees(pose.heading + beta);
            Column {
                ray,
                beta,
                hit: cast_ray(grid, cfg.cell_size, pose.pos, ray, beta),
            }
        }));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    pub fn hit(&self, i: usize) -> Option<&RayHit> {
        self.columns.get(i).and_then(|c| c.hit.as_ref())
    }

    /// Depth in cell units at column `i` for the given comparison mode.
    /// Misses and out-of-range columns report the far plane.
    pub fn depth(&self, i: usize, mode: OcclusionDepth) -> f32 {
        match (self.hit(i), mode) {
            (Some(h), OcclusionDepth::Perpendicular) => h.perp_distance,
            (Some(h), OcclusionDepth::Raw) => h.distance,
            (None, _) => self.far,
        }
    }

    /// World point where the ray of column `i` ends: the hit, or the far
    /// plane along the ray for a miss.
    pub fn end_point(&self, i: usize, cell_size: f32) -> Option<Vec2> {
        let col = self.columns.get(i)?;
        Some(match col.hit {
            Some(h) => h.point,
            None => self.origin + col.ray * (self.far * cell_size),
        })
    }
}
