//! Grid ray casting (DDA).
//!
//! The ray walks the grid in cell coordinates, always stepping across
//! whichever grid line is nearer, until it enters a wall cell.
use log::trace;

use crate::core::grid::{Grid, Tile};
use crate::core::math::Vec2;

/// Upper bound on grid lines crossed by one ray. An enclosed grid never
/// gets close; anything past this is treated as a miss.
pub const MAX_STEPS: usize = 512;

/// Which kind of grid line the ray crossed to enter the wall cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// A vertical grid line (the ray stepped along x).
    Vertical,
    /// A horizontal grid line (the ray stepped along y).
    Horizontal,
}

impl Side {
    /// Face-art suffix: x-step faces use the `_h` images, y-step faces `_v`.
    pub fn asset_suffix(self) -> &'static str {
        match self {
            Side::Vertical => "h",
            Side::Horizontal => "v",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// World units.
    pub point: Vec2,
    /// Cell units along the ray.
    pub distance: f32,
    /// Cell units projected onto the view axis.
    pub perp_distance: f32,
    pub side: Side,
    pub tile: Tile,
    pub cell: (i64, i64),
}

/// Casts from `origin` (world units) along unit vector `dir`.
///
/// `beta` is the ray's angular offset from the viewer heading in degrees,
/// used only for the fisheye correction of `perp_distance`.
pub fn cast_ray(grid: &Grid, cell_size: f32, origin: Vec2, dir: Vec2, beta: f32) -> Option<RayHit> {
    let pos = origin / cell_size;
    let mut cx = pos.x.floor() as i64;
    let mut cy = pos.y.floor() as i64;

    // cells of ray length per unit step along each axis; an axis the ray
    // never advances on must never win the comparison
    let delta_x = if dir.x != 0.0 { (1.0 / dir.x).abs() } else { f32::INFINITY };
    let delta_y = if dir.y != 0.0 { (1.0 / dir.y).abs() } else { f32::INFINITY };

    let (step_x, mut dist_x) = if dir.x == 0.0 {
        (0, f32::INFINITY)
    } else if dir.x < 0.0 {
        (-1, (pos.x - cx as f32) * delta_x)
    } else {
        (1, (cx as f32 + 1.0 - pos.x) * delta_x)
    };
    let (step_y, mut dist_y) = if dir.y == 0.0 {
        (0, f32::INFINITY)
    } else if dir.y < 0.0 {
        (-1, (pos.y - cy as f32) * delta_y)
    } else {
        (1, (cy as f32 + 1.0 - pos.y) * delta_y)
    };

    for _ in 0..MAX_STEPS {
        let (distance, side) = if dist_x < dist_y {
            let d = dist_x;
            dist_x += delta_x;
            cx += step_x;
            (d, Side::Vertical)
        } else {
            let d = dist_y;
            dist_y += delta_y;
            cy += step_y;
            (d, Side::Horizontal)
        };

        if !distance.is_finite() {
            break;
        }

        match grid.tile(cx, cy) {
            None => {
                trace!("ray left the grid at cell ({cx}, {cy})");
                return None;
            }
            Some(0) => {}
            Some(tile) => {
                let point = (pos + dir * distance) * cell_size;
                return Some(RayHit {
                    point,
                    distance,
                    perp_distance: distance * beta.to_radians().cos(),
                    side,
                    tile,
                    cell: (cx, cy),
                });
            }
        }
    }

    trace!("ray from {origin:?} along {dir:?} gave up after {MAX_STEPS} steps");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::dir_from_degrees;

    const EPS: f32 = 1e-4;

    fn centre(cx: f32, cy: f32) -> Vec2 {
        Vec2::new((cx + 0.5) * 64.0, (cy + 0.5) * 64.0)
    }

    #[test]
    fn axis_aligned_hits_report_straight_distance() {
        let g = Grid::original_level();
        let hit = cast_ray(&g, 64.0, centre(1.0, 1.0), Vec2::new(0.0, 1.0), 0.0).unwrap();
        assert_eq!(hit.side, Side::Horizontal);
        assert_eq!(hit.cell, (1, 9));
        assert!((hit.distance - 7.5).abs() < EPS);
        assert!((hit.perp_distance - hit.distance).abs() < EPS);
        assert!((hit.point.y - 576.0).abs() < 1e-3);
    }

    #[test]
    fn negative_directions_step_backwards() {
        let g = Grid::original_level();
        let hit = cast_ray(&g, 64.0, centre(4.0, 4.0), Vec2::new(-1.0, 0.0), 0.0).unwrap();
        assert_eq!(hit.side, Side::Vertical);
        assert_eq!(hit.tile, 3);
        assert!((hit.distance - 3.5).abs() < EPS);
        assert!((hit.point.x - 64.0).abs() < 1e-3);

        let hit = cast_ray(&g, 64.0, centre(4.0, 4.0), Vec2::new(0.0, -1.0), 0.0).unwrap();
        assert_eq!(hit.cell, (4, 2));
        assert_eq!(hit.tile, 1);
        assert!((hit.distance - 1.5).abs() < EPS);
    }

    #[test]
    fn same_wall_same_perpendicular_depth() {
        let g = Grid::bordered(20, 20, 3).unwrap();
        let origin = centre(2.0, 10.0);
        let heading = 0.0_f32;
        let mut perps = Vec::new();
        let mut raws = Vec::new();
        for beta in [-20.0_f32, -7.0, 0.0, 12.0, 25.0] {
            let hit = cast_ray(&g, 64.0, origin, dir_from_degrees(heading + beta), beta).unwrap();
            assert_eq!(hit.side, Side::Vertical);
            perps.push(hit.perp_distance);
            raws.push(hit.distance);
        }
        for p in &perps {
            assert!((p - 16.5).abs() < 1e-3, "perp {p}");
        }
        assert!(raws[0] > raws[2] && raws[4] > raws[2]);
    }

    #[test]
    fn diagonal_ray_finds_the_corner_block() {
        let g = Grid::original_level();
        let hit = cast_ray(&g, 64.0, centre(1.0, 1.0), dir_from_degrees(45.0), 0.0).unwrap();
        assert_eq!(hit.cell, (2, 2));
        assert_eq!(hit.tile, 1);
    }

    #[test]
    fn open_grid_edge_is_a_miss() {
        let g = Grid::parse("000\n000\n000\n").unwrap();
        assert!(cast_ray(&g, 64.0, centre(1.0, 1.0), Vec2::new(1.0, 0.0), 0.0).is_none());
    }

    #[test]
    fn zero_direction_never_hits() {
        let g = Grid::original_level();
        assert!(cast_ray(&g, 64.0, centre(1.0, 1.0), Vec2::ZERO, 0.0).is_none());
    }
}
