//! Texture lookup: CPU pixmaps, wall bindings and procedural fallbacks.
use std::collections::HashMap;

use log::debug;

use crate::core::animation::{AnimState, ClipLibrary};
use crate::core::facing::Facing;
use crate::core::grid::{Grid, Tile};
use crate::render::caster::Side;
use crate::render::draw::Rgba;

/// Opaque handle to a loaded texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Resolves what the renderer needs to draw into texture handles.
pub trait TextureProvider {
    /// Texture for one face orientation of a wall material.
    fn wall(&self, tile: Tile, side: Side) -> Option<TextureId>;
    /// Sprite sheet by name.
    fn sheet(&self, name: &str) -> Option<TextureId>;
    /// Width and height in texels.
    fn size(&self, id: TextureId) -> Option<(u32, u32)>;
}

/// Immutable CPU image, sampled per texel.
#[derive(Clone, Debug, PartialEq)]
pub struct Pixmap {
    w: u32,
    h: u32,
    px: Vec<Rgba>,
}

impl Pixmap {
    /// `px` is row-major and must hold `w * h` texels.
    pub fn new(w: u32, h: u32, px: Vec<Rgba>) -> Option<Self> {
        (w > 0 && h > 0 && px.len() == (w * h) as usize).then_some(Self { w, h, px })
    }

    pub fn filled(w: u32, h: u32, color: Rgba) -> Self {
        Self {
            w: w.max(1),
            h: h.max(1),
            px: vec![color; (w.max(1) * h.max(1)) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.w
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.h
    }

    /// Wraps out-of-range coordinates.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Rgba {
        let xi = (x % self.w) as usize;
        let yi = (y % self.h) as usize;
        self.px[yi * self.w as usize + xi]
    }

    #[inline]
    fn put(&mut self, x: u32, y: u32, c: Rgba) {
        if x < self.w && y < self.h {
            self.px[(y * self.w + x) as usize] = c;
        }
    }

    /// Every texel mixed toward `other` by `t`.
    pub fn tinted(&self, other: Rgba, t: u8) -> Pixmap {
        Pixmap {
            w: self.w,
            h: self.h,
            px: self.px.iter().map(|c| c.mix(other, t)).collect(),
        }
    }
}

#[derive(Default)]
pub struct TextureManager {
    maps: Vec<Pixmap>,
    names: HashMap<String, TextureId>,
    walls: HashMap<(Tile, Side), TextureId>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the texture called `name`.
    pub fn insert(&mut self, name: &str, pixmap: Pixmap) -> TextureId {
        if let Some(&id) = self.names.get(name) {
            self.maps[id.0] = pixmap;
            return id;
        }
        let id = TextureId(self.maps.len());
        self.maps.push(pixmap);
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.names.get(name).copied()
    }

    pub fn pixmap(&self, id: TextureId) -> Option<&Pixmap> {
        self.maps.get(id.0)
    }

    /// Binds a face of wall material `tile` to the texture `name`.
    /// Returns false if no such texture is loaded.
    pub fn bind_wall(&mut self, tile: Tile, side: Side, name: &str) -> bool {
        match self.id(name) {
            Some(id) => {
                self.walls.insert((tile, side), id);
                true
            }
            None => false,
        }
    }

    /// Generates a checker texture for every wall material in `grid` that
    /// has no binding yet (the x-step face a shade darker), and a
    /// placeholder sheet for every clip sheet in `clips` that is missing.
    pub fn fill_fallbacks(&mut self, grid: &Grid, clips: &ClipLibrary, sheets: &[&str]) {
        let mut tiles: Vec<Tile> = grid.walls().map(|(_, _, t)| t).collect();
        tiles.sort_unstable();
        tiles.dedup();

        for tile in tiles {
            for side in [Side::Vertical, Side::Horizontal] {
                if self.walls.contains_key(&(tile, side)) {
                    continue;
                }
                let base = Self::make_checker_pixmap(64, 64, Self::color_from_tile(tile));
                let pm = match side {
                    Side::Vertical => base.tinted(Rgba::BLACK, 40),
                    Side::Horizontal => base,
                };
                let name = format!("fallback_{tile}_{}", side.asset_suffix());
                self.insert(&name, pm);
                self.bind_wall(tile, side, &name);
                debug!("generated fallback texture {name}");
            }
        }

        for &sheet in sheets {
            if self.id(sheet).is_none() {
                let pm = Self::make_actor_sheet(clips, 64, 64);
                self.insert(sheet, pm);
                debug!("generated placeholder sprite sheet {sheet}");
            }
        }
    }

    fn color_from_tile(t: Tile) -> Rgba {
        let k = t as u32 + 1;
        let r = ((k * 97) % 200 + 40) as u8;
        let g = ((k * 57) % 200 + 40) as u8;
        let b = ((k * 31) % 200 + 40) as u8;
        Rgba::new(r, g, b, 255)
    }

    /// Checker base
    fn make_checker_pixmap(w: u32, h: u32, base: Rgba) -> Pixmap {
        let mut pm = Pixmap::filled(w, h, base);
        let cell = 8u32;
        for y in 0..h {
            for x in 0..w {
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    pm.put(x, y, base.mix(Rgba::WHITE, 24));
                }
            }
        }
        pm
    }

    /// Placeholder sheet in the `ClipLibrary::humanoid` layout: an ellipse
    /// body per frame, coloured per state, with a dark "face" dot shifted
    /// toward the side the actor shows and bobbing with the frame index.
    fn make_actor_sheet(clips: &ClipLibrary, fw: u32, fh: u32) -> Pixmap {
        let mut rows: Vec<(u32, u32, Rgba, Option<Facing>)> = Vec::new();
        let mut row = 0;
        for state in [AnimState::Walk, AnimState::Idle] {
            for facing in Facing::ALL {
                let frames = clips
                    .get(&state.clip_name(facing))
                    .map_or(1, |c| c.frame_count() as u32);
                rows.push((row, frames, Self::state_color(state), Some(facing)));
                row += 1;
            }
        }
        for state in [AnimState::Hit, AnimState::Death, AnimState::Alert, AnimState::Shoot] {
            let frames = clips
                .get(&state.clip_name(Facing::South))
                .map_or(1, |c| c.frame_count() as u32);
            rows.push((row, frames, Self::state_color(state), None));
            row += 1;
        }

        let cols = rows.iter().map(|r| r.1).max().unwrap_or(1);
        let mut pm = Pixmap::filled(cols * fw, row.max(1) * fh, Rgba::TRANSPARENT);
        for (row, frames, body, facing) in rows {
            for f in 0..frames {
                Self::paint_actor_frame(&mut pm, f * fw, row * fh, fw, fh, body, facing, f);
            }
        }
        pm
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_actor_frame(
        pm: &mut Pixmap,
        ox: u32,
        oy: u32,
        w: u32,
        h: u32,
        body: Rgba,
        facing: Option<Facing>,
        frame: u32,
    ) {
        let bob = (frame % 2) as f32 * 2.0;
        let cx = w as f32 * 0.5;
        let cy = h as f32 * 0.6 - bob;
        let rx = w as f32 * 0.23;
        let ry = h as f32 * 0.35;
        for y in 0..h {
            for x in 0..w {
                let nx = (x as f32 - cx) / rx;
                let ny = (y as f32 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    pm.put(ox + x, oy + y, body);
                }
            }
        }

        // face marker: centred for S, off to one side for E/W, hidden for N
        let shift = match facing {
            Some(Facing::North) | Some(Facing::NorthEast) | Some(Facing::NorthWest) => return,
            Some(Facing::East) | Some(Facing::SouthEast) => 0.6,
            Some(Facing::West) | Some(Facing::SouthWest) => -0.6,
            _ => 0.0,
        };
        let fx = cx + shift * rx;
        let fy = cy - ry * 0.5;
        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 - fx;
                let dy = y as f32 - fy;
                if dx * dx + dy * dy <= 9.0 {
                    pm.put(ox + x, oy + y, Rgba::new(20, 20, 20, 255));
                }
            }
        }
    }

    fn state_color(state: AnimState) -> Rgba {
        match state {
            AnimState::Idle => Rgba::new(120, 120, 255, 255),
            AnimState::Walk => Rgba::new(120, 200, 120, 255),
            AnimState::Hit => Rgba::new(255, 120, 120, 255),
            AnimState::Death => Rgba::new(110, 40, 40, 255),
            AnimState::Alert => Rgba::new(255, 220, 80, 255),
            AnimState::Shoot => Rgba::new(255, 160, 60, 255),
        }
    }
}

impl TextureProvider for TextureManager {
    fn wall(&self, tile: Tile, side: Side) -> Option<TextureId> {
        self.walls.get(&(tile, side)).copied()
    }

    fn sheet(&self, name: &str) -> Option<TextureId> {
        self.id(name)
    }

    fn size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.pixmap(id).map(|p| (p.width(), p.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixmap_rejects_wrong_length() {
        assert!(Pixmap::new(2, 2, vec![Rgba::BLACK; 3]).is_none());
        let pm = Pixmap::new(2, 1, vec![Rgba::BLACK, Rgba::WHITE]).unwrap();
        assert_eq!(pm.sample(1, 0), Rgba::WHITE);
        assert_eq!(pm.sample(3, 5), Rgba::WHITE);
    }

    #[test]
    fn insert_replaces_by_name() {
        let mut tm = TextureManager::new();
        let a = tm.insert("wall_v", Pixmap::filled(4, 4, Rgba::BLACK));
        let b = tm.insert("wall_v", Pixmap::filled(8, 8, Rgba::WHITE));
        assert_eq!(a, b);
        assert_eq!(tm.size(a), Some((8, 8)));
    }

    #[test]
    fn walls_bind_per_side() {
        let mut tm = TextureManager::new();
        tm.insert("wall_v", Pixmap::filled(64, 64, Rgba::WHITE));
        tm.insert("wall_h", Pixmap::filled(64, 64, Rgba::BLACK));
        assert!(tm.bind_wall(3, Side::Vertical, "wall_v"));
        assert!(tm.bind_wall(3, Side::Horizontal, "wall_h"));
        assert!(!tm.bind_wall(1, Side::Vertical, "brick_v"));
        assert_ne!(tm.wall(3, Side::Vertical), tm.wall(3, Side::Horizontal));
        assert_eq!(tm.wall(1, Side::Vertical), None);
    }

    #[test]
    fn fallbacks_cover_every_material_and_sheet() {
        let grid = Grid::original_level();
        let clips = ClipLibrary::humanoid("actor", 64, 64).unwrap();
        let mut tm = TextureManager::new();
        tm.insert("wall_v", Pixmap::filled(64, 64, Rgba::WHITE));
        tm.bind_wall(3, Side::Vertical, "wall_v");
        tm.fill_fallbacks(&grid, &clips, &["actor"]);

        for tile in [1, 2, 3] {
            assert!(tm.wall(tile, Side::Vertical).is_some());
            assert!(tm.wall(tile, Side::Horizontal).is_some());
        }
        assert_eq!(tm.wall(3, Side::Vertical), tm.id("wall_v"));

        // x-step faces get the darker `_h` fallback
        let h = tm.id("fallback_1_h").unwrap();
        let v = tm.id("fallback_1_v").unwrap();
        assert_eq!(tm.wall(1, Side::Vertical), Some(h));
        assert_eq!(tm.wall(1, Side::Horizontal), Some(v));
        let (dark, light) = (tm.pixmap(h).unwrap().sample(0, 0), tm.pixmap(v).unwrap().sample(0, 0));
        assert!(dark.r < light.r && dark.g < light.g && dark.b < light.b);

        let sheet = tm.sheet("actor").unwrap();
        // 20 rows of 64px, widest clip (death) has 5 frames
        assert_eq!(tm.size(sheet), Some((5 * 64, 20 * 64)));
        let pm = tm.pixmap(sheet).unwrap();
        assert_eq!(pm.sample(0, 0).a, 0);
        assert_eq!(pm.sample(32, 40).a, 255);
    }
}
