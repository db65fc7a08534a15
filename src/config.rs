//! Start-time constants for the whole renderer.
//!
//! `Config::default()` reproduces the stock level; `Config::from_env()`
//! lets a few knobs be overridden without recompiling.
use crate::error::ConfigError;

/// Which depth the sprite occluder compares actor distance against.
///
/// Both are approximations: `Perpendicular` lets sprites poke through walls
/// at grazing angles near the screen edges, `Raw` clips them early there.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OcclusionDepth {
    Perpendicular,
    Raw,
}

impl OcclusionDepth {
    pub fn toggled(self) -> Self {
        match self {
            OcclusionDepth::Perpendicular => OcclusionDepth::Raw,
            OcclusionDepth::Raw => OcclusionDepth::Perpendicular,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OcclusionDepth::Perpendicular => "perp",
            OcclusionDepth::Raw => "raw",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// World units per grid cell.
    pub cell_size: f32,
    /// Number of vertical strips cast per frame.
    pub resolution: usize,
    pub view_width: u32,
    pub view_height: u32,
    /// Horizontal field of view in degrees.
    pub fov: f32,
    /// World units per second.
    pub move_speed: f32,
    /// Degrees per second.
    pub turn_speed: f32,
    /// World units; far plane for rays that never hit.
    pub max_view_distance: f32,
    pub occlusion: OcclusionDepth,
    /// Wall height in pixels at one cell of perpendicular distance.
    pub wall_scale: f32,
    /// Billboard size in pixels at one cell of distance.
    pub sprite_scale: f32,
    /// Extra degrees beyond half the FOV before a sprite is culled.
    pub sprite_cull_margin: f32,
    pub show_minimap: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: 64.0,
            resolution: 200,
            view_width: 640,
            view_height: 640,
            fov: 70.0,
            move_speed: 150.0,
            turn_speed: 180.0,
            max_view_distance: 2000.0,
            occlusion: OcclusionDepth::Perpendicular,
            wall_scale: 640.0,
            sprite_scale: 640.0,
            sprite_cull_margin: 3.5,
            show_minimap: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from the defaults plus whatever `lookup` returns for
    /// the `RAYCAST_*` keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("RAYCAST_RESOLUTION") {
            cfg.resolution = v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: "RAYCAST_RESOLUTION",
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup("RAYCAST_FOV") {
            cfg.fov = v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: "RAYCAST_FOV",
                value: v.clone(),
            })?;
            cfg.sprite_cull_margin = cfg.fov * 0.05;
        }
        if let Some(v) = lookup("RAYCAST_OCCLUSION") {
            cfg.occlusion = match v.trim() {
                "perp" => OcclusionDepth::Perpendicular,
                "raw" => OcclusionDepth::Raw,
                _ => {
                    return Err(ConfigError::InvalidChoice {
                        key: "RAYCAST_OCCLUSION",
                        value: v,
                        expected: "perp, raw",
                    });
                }
            };
        }
        if let Some(v) = lookup("RAYCAST_MINIMAP") {
            cfg.show_minimap = match v.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => {
                    return Err(ConfigError::InvalidChoice {
                        key: "RAYCAST_MINIMAP",
                        value: v,
                        expected: "0, 1",
                    });
                }
            };
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::OutOfRange {
                key: "resolution",
                rule: "at least 1",
                value: 0.0,
            });
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::OutOfRange {
                key: "fov",
                rule: "between 0 and 180 degrees",
                value: self.fov,
            });
        }
        let positive = [
            ("cell_size", self.cell_size),
            ("move_speed", self.move_speed),
            ("turn_speed", self.turn_speed),
            ("max_view_distance", self.max_view_distance),
            ("view_width", self.view_width as f32),
            ("view_height", self.view_height as f32),
            ("wall_scale", self.wall_scale),
            ("sprite_scale", self.sprite_scale),
        ];
        for (key, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::OutOfRange {
                    key,
                    rule: "positive",
                    value,
                });
            }
        }
        Ok(())
    }

    /// Width in pixels of one cast strip.
    #[inline]
    pub fn strip_width(&self) -> f32 {
        self.view_width as f32 / self.resolution as f32
    }

    /// Far plane in cell units.
    #[inline]
    pub fn max_view_cells(&self) -> f32 {
        self.max_view_distance / self.cell_size
    }

    #[inline]
    pub fn horizon(&self) -> f32 {
        self.view_height as f32 * 0.5
    }
}
