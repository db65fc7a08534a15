use std::sync::Arc;

use grid_raycaster::config::{Config, OcclusionDepth};
use grid_raycaster::core::actor::Actor;
use grid_raycaster::core::animation::{AnimState, ClipLibrary};
use grid_raycaster::core::grid::Grid;
use grid_raycaster::core::input::{Action, InputSnapshot};
use grid_raycaster::core::math::Vec2;
use grid_raycaster::core::player::Pose;
use grid_raycaster::core::world::World;
use grid_raycaster::render::caster::{Side, cast_ray};
use grid_raycaster::render::depth::DepthBuffer;
use grid_raycaster::render::draw::{DrawList, Rgba};
use grid_raycaster::render::frame::Renderer;
use grid_raycaster::render::textures::{Pixmap, TextureManager};

const CELL: f32 = 64.0;

fn centre(cx: u32, cy: u32) -> Vec2 {
    Vec2::new((cx as f32 + 0.5) * CELL, (cy as f32 + 0.5) * CELL)
}

fn room() -> Grid {
    Grid::bordered(10, 10, 3).unwrap()
}

fn clips() -> Arc<ClipLibrary> {
    Arc::new(ClipLibrary::humanoid("actor", 64, 64).unwrap())
}

#[test]
fn centre_ray_hits_the_east_border() {
    let grid = room();
    let hit = cast_ray(&grid, CELL, centre(1, 1), Vec2::new(1.0, 0.0), 0.0).unwrap();
    assert_eq!(hit.tile, 3);
    assert_eq!(hit.side, Side::Vertical);
    assert_eq!(hit.cell, (9, 1));
    assert!((hit.distance - 7.5).abs() < 1e-4);
    assert!((hit.perp_distance - 7.5).abs() < 1e-4);

    // With two strips the second one is the centre ray.
    let cfg = Config {
        resolution: 2,
        ..Config::default()
    };
    let mut depth = DepthBuffer::new();
    depth.rebuild(&grid, &Pose::new(centre(1, 1), 0.0), &cfg);
    let centre_hit = depth.hit(1).unwrap();
    assert_eq!(centre_hit.side, Side::Vertical);
    assert!((centre_hit.distance - 7.5).abs() < 1e-4);
}

#[test]
fn straight_wall_has_equal_perpendicular_depth() {
    let grid = room();
    let cfg = Config {
        resolution: 64,
        fov: 60.0,
        ..Config::default()
    };
    // facing the east wall from mid room; every ray lands on it
    let pose = Pose::new(Vec2::new(5.0 * CELL, 5.0 * CELL), 0.0);
    let mut depth = DepthBuffer::new();
    depth.rebuild(&grid, &pose, &cfg);

    for i in 0..depth.len() {
        let hit = depth.hit(i).unwrap();
        assert_eq!(hit.side, Side::Vertical);
        assert!((hit.perp_distance - 4.0).abs() < 1e-3, "column {i}: {}", hit.perp_distance);
        assert!(hit.distance >= hit.perp_distance - 1e-4);
    }
}

fn sprite_scene(occlusion: OcclusionDepth) -> (World, TextureManager) {
    let cfg = Config {
        resolution: 100,
        show_minimap: false,
        occlusion,
        ..Config::default()
    };
    let mut grid_rows = String::new();
    for y in 0..10 {
        for x in 0..10 {
            let wall = x == 0 || y == 0 || x == 9 || y == 9 || (x == 4 && y == 5);
            grid_rows.push(if wall { '3' } else { '0' });
        }
        grid_rows.push('\n');
    }
    let grid = Grid::parse(&grid_rows).unwrap();
    let mut world = World::new(grid, centre(1, 5), 0.0, cfg).unwrap();
    world.spawn(Actor::new(centre(7, 5), 180.0, clips(), 0));

    let mut tm = TextureManager::new();
    tm.insert("actor", Pixmap::filled(64 * 5, 64 * 16, Rgba::WHITE));
    tm.fill_fallbacks(&world.grid, &ClipLibrary::new(), &[]);
    (world, tm)
}

#[test]
fn wall_between_viewer_and_actor_hides_it() {
    let (mut world, tm) = sprite_scene(OcclusionDepth::Perpendicular);
    world.tick(&InputSnapshot::new(), 0);

    let sheet = tm.id("actor").unwrap();
    let mut list = DrawList::new();
    Renderer::new().render(&world, &tm, &mut list);
    assert_eq!(list.blits_of(sheet).count(), 0);

    // step the wall out of the way
    world.grid = room();
    let mut list = DrawList::new();
    Renderer::new().render(&world, &tm, &mut list);
    assert!(list.blits_of(sheet).count() > 0);
}

#[test]
fn farther_actor_is_drawn_first() {
    let cfg = Config {
        resolution: 100,
        show_minimap: false,
        ..Config::default()
    };
    let mut world = World::new(room(), centre(1, 5), 0.0, cfg).unwrap();
    world.spawn(Actor::new(centre(3, 5), 0.0, clips(), 0));
    world.spawn(Actor::new(centre(7, 5), 0.0, clips(), 0));
    world.tick(&InputSnapshot::new(), 0);

    let mut tm = TextureManager::new();
    tm.insert("actor", Pixmap::filled(64 * 5, 64 * 16, Rgba::WHITE));
    let sheet = tm.id("actor").unwrap();

    let mut list = DrawList::new();
    Renderer::new().render(&world, &tm, &mut list);

    let heights: Vec<f32> = list.blits_of(sheet).map(|(_, dst)| dst.h).collect();
    assert!(!heights.is_empty());
    let first = heights[0];
    let last = *heights.last().unwrap();
    // the far actor is smaller on screen and lands before the near one
    assert!(first < last, "{first} vs {last}");
    let switch = heights.iter().position(|&h| (h - last).abs() < 1e-3).unwrap();
    assert!(heights[..switch].iter().all(|&h| (h - first).abs() < 1e-3));
}

#[test]
fn one_shot_freezes_on_its_last_frame() {
    let mut actor = Actor::new(centre(5, 5), 0.0, clips(), 0);
    actor.set_state(AnimState::Death, 0);
    actor.update(0.0, 1100, centre(1, 5));
    assert_eq!(actor.animator().frame_index(), 4);
    assert!(actor.finished(1100));

    actor.update(0.0, 5000, centre(1, 5));
    assert_eq!(actor.animator().frame_index(), 4);
}

#[test]
fn toggles_flip_on_press_not_hold() {
    let (mut world, _) = sprite_scene(OcclusionDepth::Perpendicular);
    let held = InputSnapshot::new().with(Action::ToggleOcclusion);
    world.tick(&held, 0);
    world.tick(&held, 16);
    world.tick(&held, 32);
    assert_eq!(world.config.occlusion, OcclusionDepth::Raw);

    world.tick(&InputSnapshot::new(), 48);
    world.tick(&held, 64);
    assert_eq!(world.config.occlusion, OcclusionDepth::Perpendicular);
}

#[test]
fn walking_into_a_wall_slides_along_it() {
    let cfg = Config::default();
    let mut world = World::new(room(), Vec2::new(1.5 * CELL, 8.7 * CELL), 80.0, cfg).unwrap();
    let forward = InputSnapshot::new().with(Action::MoveForward);
    world.tick(&forward, 0);
    for t in 1..=60 {
        world.tick(&forward, t * 16);
    }
    let pos = world.player.pose.pos;
    assert!(world.grid.is_open_at(pos, CELL));
    assert!(pos.y < 9.0 * CELL);
    assert!(pos.x > 1.5 * CELL);
}

#[test]
fn blocked_start_is_rejected() {
    let err = World::new(room(), Vec2::new(10.0, 10.0), 0.0, Config::default());
    assert!(err.is_err());
}
