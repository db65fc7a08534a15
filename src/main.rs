use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use env_logger::Env;
use log::{debug, error, info, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;

use grid_raycaster::config::Config;
use grid_raycaster::core::actor::Actor;
use grid_raycaster::core::animation::{AnimState, ClipLibrary};
use grid_raycaster::core::grid::Grid;
use grid_raycaster::core::input::{Action, InputSnapshot};
use grid_raycaster::core::math::Vec2;
use grid_raycaster::core::world::World;
use grid_raycaster::render::caster::Side;
use grid_raycaster::render::draw::Rgba;
use grid_raycaster::render::frame::Renderer;
use grid_raycaster::render::framebuffer::{Canvas, Framebuffer};
use grid_raycaster::render::textures::{Pixmap, TextureManager};

const ACTOR_SHEET: &str = "actor";
const FRAME_SIZE: u32 = 64;

/// Open cells of the stock level that get an actor.
const SPAWN_CELLS: [(u32, u32); 5] = [(7, 1), (2, 4), (7, 4), (4, 8), (8, 7)];
const ONE_SHOTS: [AnimState; 3] = [AnimState::Alert, AnimState::Shoot, AnimState::Hit];
/// Milliseconds between scripted one-shots.
const SCRIPT_INTERVAL: std::ops::Range<u64> = 1500..4000;

/// Wall material to texture file stem.
const WALL_TEXTURES: [(u8, &str); 3] = [(1, "brick_wall"), (2, "eagle"), (3, "wall")];

const KEYS: [(Action, &[KeyboardKey]); 6] = [
    (Action::TurnLeft, &[KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT]),
    (Action::TurnRight, &[KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT]),
    (Action::MoveForward, &[KeyboardKey::KEY_W, KeyboardKey::KEY_UP]),
    (Action::MoveBackward, &[KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN]),
    (Action::ToggleMinimap, &[KeyboardKey::KEY_M]),
    (Action::ToggleOcclusion, &[KeyboardKey::KEY_O]),
];

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cfg = Config::from_env()?;
    let clips = Arc::new(ClipLibrary::humanoid(ACTOR_SHEET, FRAME_SIZE, FRAME_SIZE)?);

    let mut rng = rand::thread_rng();
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut world = World::new(Grid::original_level(), Vec2::new(110.0, 540.0), -45.0, cfg)?;
    for (cx, cy) in SPAWN_CELLS {
        let pos = Vec2::new(
            (cx as f32 + 0.5) * world.config.cell_size,
            (cy as f32 + 0.5) * world.config.cell_size,
        );
        let mut actor = Actor::new(pos, rng.gen_range(0.0..360.0), Arc::clone(&clips), now_ms())
            .with_spin(rng.gen_range(-60.0..60.0));
        actor.set_state(AnimState::Walk, now_ms());
        world.spawn(actor);
    }
    info!("spawned {} actors", world.actors.len());

    let (width, height) = (world.config.view_width, world.config.view_height);
    let (mut window, raylib_thread) = raylib::init()
        .size(width as i32, height as i32)
        .title("Grid Raycaster")
        .build();
    window.set_target_fps(60);

    let mut textures = TextureManager::new();
    load_assets(&mut textures);
    textures.fill_fallbacks(&world.grid, &clips, &[ACTOR_SHEET]);

    let mut fb = Framebuffer::new(width, height);
    let blank = Image::gen_image_color(width as i32, height as i32, Color::BLACK);
    let mut screen = window.load_texture_from_image(&raylib_thread, &blank)?;

    let mut renderer = Renderer::new();
    let mut upload_failed = false;
    let mut next_script = now_ms() + rng.gen_range(SCRIPT_INTERVAL);

    while !window.window_should_close() {
        let now = now_ms();

        let mut input = InputSnapshot::new();
        for (action, keys) in KEYS {
            input.set(action, keys.iter().any(|&k| window.is_key_down(k)));
        }
        world.tick(&input, now);

        // Scripted one-shots; actors walk again once the clip is done.
        for actor in &mut world.actors {
            if !actor.animator().is_looping() && actor.finished(now) {
                actor.set_state(AnimState::Walk, now);
            }
        }
        if now >= next_script {
            let idx = rng.gen_range(0..world.actors.len().max(1));
            if let (Some(actor), Some(&state)) =
                (world.actors.get_mut(idx), ONE_SHOTS.choose(&mut rng))
            {
                debug!("actor {idx} plays {}", state.label());
                actor.set_state(state, now);
            }
            next_script = now + rng.gen_range(SCRIPT_INTERVAL);
        }

        fb.clear();
        renderer.render(&world, &textures, &mut Canvas::new(&mut fb, &textures));
        if let Err(e) = screen.update_texture(fb.as_bytes()) {
            if !upload_failed {
                warn!("framebuffer upload failed: {e}");
                upload_failed = true;
            }
        }

        let fps = window.get_fps();
        let occlusion = world.config.occlusion.label();
        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&screen, 0, 0, Color::WHITE);
        d.draw_text(&format!("FPS: {fps}"), 10, height as i32 - 50, 20, Color::WHITE);
        d.draw_text(
            &format!("occlusion: {occlusion} (O)"),
            10,
            height as i32 - 26,
            20,
            Color::WHITE,
        );
    }

    Ok(())
}

/// Loads wall faces and the actor sheet from `assets/`. Anything missing is
/// left to `TextureManager::fill_fallbacks`.
fn load_assets(tm: &mut TextureManager) {
    for (tile, stem) in WALL_TEXTURES {
        for side in [Side::Vertical, Side::Horizontal] {
            let name = format!("{stem}_{}", side.asset_suffix());
            if let Some(pm) = load_pixmap(&format!("assets/{name}.png")) {
                tm.insert(&name, pm);
                tm.bind_wall(tile, side, &name);
            }
        }
    }
    if let Some(pm) = load_pixmap(&format!("assets/{ACTOR_SHEET}.png")) {
        tm.insert(ACTOR_SHEET, pm);
    }
}

fn load_pixmap(path: &str) -> Option<Pixmap> {
    let img = match Image::load_image(path) {
        Ok(img) => img,
        Err(e) => {
            debug!("{path}: {e}");
            return None;
        }
    };
    let w = img.width().max(1) as u32;
    let h = img.height().max(1) as u32;
    let px: Vec<Rgba> = img
        .get_image_data()
        .iter()
        .map(|c| Rgba::new(c.r, c.g, c.b, c.a))
        .collect();
    let pm = Pixmap::new(w, h, px);
    if pm.is_none() {
        warn!("{path}: unexpected pixel count for {w}x{h}");
    } else {
        info!("loaded {path} ({w}x{h})");
    }
    pm
}
