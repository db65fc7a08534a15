//! Viewer pose and movement.
use crate::core::grid::Grid;
use crate::core::math::{Vec2, dir_from_degrees, normalize_degrees};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    /// World units.
    pub pos: Vec2,
    /// Degrees in [0, 360).
    pub heading: f32,
}

impl Pose {
    pub fn new(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            heading: normalize_degrees(heading),
        }
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        dir_from_degrees(self.heading)
    }
}

pub struct Player {
    pub pose: Pose,
    pub move_speed: f32, // world units / s
    pub turn_speed: f32, // deg / s
}

impl Player {
    pub fn new(pos: Vec2, heading: f32, move_speed: f32, turn_speed: f32) -> Self {
        Self {
            pose: Pose::new(pos, heading),
            move_speed,
            turn_speed,
        }
    }

    /// `dir` is -1, 0 or +1 (left, none, right).
    pub fn turn(&mut self, dir: f32, dt: f32) {
        self.pose.heading = normalize_degrees(self.pose.heading + dir * self.turn_speed * dt);
    }

    /// Moves along the heading (`dir` +1 forward, -1 back), sliding along
    /// walls: each axis is committed only if its destination cell is open.
    pub fn advance(&mut self, dir: f32, dt: f32, grid: &Grid, cell_size: f32) {
        if dir == 0.0 {
            return;
        }
        let step = self.pose.direction() * (dir * self.move_speed * dt);
        let cur = self.pose.pos;
        let next = cur + step;

        if grid.is_open_at(Vec2::new(cur.x, next.y), cell_size) {
            self.pose.pos.y = next.y;
        }
        if grid.is_open_at(Vec2::new(next.x, cur.y), cell_size) {
            self.pose.pos.x = next.x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32, heading: f32) -> Player {
        Player::new(Vec2::new(x, y), heading, 150.0, 180.0)
    }

    #[test]
    fn turning_wraps_heading() {
        let mut p = player_at(96.0, 96.0, 10.0);
        p.turn(-1.0, 0.5);
        assert!((p.pose.heading - 280.0).abs() < 1e-3);
        p.turn(1.0, 1.0);
        assert!((p.pose.heading - 100.0).abs() < 1e-3);
    }

    #[test]
    fn moves_forward_in_open_space() {
        let g = Grid::original_level();
        let mut p = player_at(96.0, 96.0, 0.0);
        p.advance(1.0, 0.1, &g, 64.0);
        assert!((p.pose.pos.x - 111.0).abs() < 1e-3);
        assert!((p.pose.pos.y - 96.0).abs() < 1e-3);
    }

    #[test]
    fn slides_along_walls() {
        let g = Grid::original_level();
        // pressed against the north border, heading up-right
        let mut p = player_at(96.0, 66.0, -45.0);
        p.advance(1.0, 0.1, &g, 64.0);
        assert!((p.pose.pos.y - 66.0).abs() < 1e-3, "y blocked by wall");
        assert!(p.pose.pos.x > 96.0, "x still slides");
    }

    #[test]
    fn backward_reverses_direction() {
        let g = Grid::original_level();
        let mut p = player_at(300.0, 96.0, 0.0);
        p.advance(-1.0, 0.1, &g, 64.0);
        assert!((p.pose.pos.x - 285.0).abs() < 1e-3);
    }
}
