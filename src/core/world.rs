//! Per-tick simulation: input, player pose and actor updates.
use log::{debug, info, warn};

use crate::config::Config;
use crate::core::actor::Actor;
use crate::core::grid::Grid;
use crate::core::input::{Action, EdgeLatch, InputProvider, process_input};
use crate::core::math::Vec2;
use crate::core::player::Player;
use crate::error::GridError;

pub struct World {
    pub grid: Grid,
    pub player: Player,
    pub actors: Vec<Actor>,
    pub config: Config,
    latch: EdgeLatch,
    last_tick: Option<u64>,
}

impl World {
    /// Fails if the player would start outside the grid or inside a wall.
    pub fn new(grid: Grid, start: Vec2, heading: f32, config: Config) -> Result<Self, GridError> {
        let (cx, cy) = Grid::cell_of(start, config.cell_size);
        if !grid.is_open(cx, cy) {
            return Err(GridError::BlockedStart { cx, cy });
        }
        if !grid.is_enclosed() {
            warn!("grid is not enclosed by walls; rays may run off the map");
        }
        info!(
            "world {}x{} cells, resolution {}, fov {}, occlusion {}",
            grid.width(),
            grid.height(),
            config.resolution,
            config.fov,
            config.occlusion.label()
        );
        let player = Player::new(start, heading, config.move_speed, config.turn_speed);
        Ok(Self {
            grid,
            player,
            actors: Vec::new(),
            config,
            latch: EdgeLatch::default(),
            last_tick: None,
        })
    }

    pub fn spawn(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    /// Advances one frame. `now_ms` is a monotonic clock reading; the first
    /// tick has a zero delta.
    pub fn tick(&mut self, input: &impl InputProvider, now_ms: u64) {
        let dt = match self.last_tick {
            Some(prev) => now_ms.saturating_sub(prev) as f32 / 1000.0,
            None => 0.0,
        };
        self.last_tick = Some(now_ms);

        for action in self.latch.pressed(input) {
            match action {
                Action::ToggleMinimap => {
                    self.config.show_minimap = !self.config.show_minimap;
                    debug!("minimap {}", if self.config.show_minimap { "on" } else { "off" });
                }
                Action::ToggleOcclusion => {
                    self.config.occlusion = self.config.occlusion.toggled();
                    debug!("occlusion depth now {}", self.config.occlusion.label());
                }
                _ => {}
            }
        }

        process_input(input, &mut self.player, &self.grid, self.config.cell_size, dt);

        let viewer = self.player.pose.pos;
        for actor in &mut self.actors {
            actor.update(dt, now_ms, viewer);
        }
    }
}
