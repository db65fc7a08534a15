//! Scripted actors: position, orientation and animation state.
use std::sync::Arc;

use crate::core::animation::{AnimState, Animator, ClipLibrary, FrameRect};
use crate::core::facing::Facing;
use crate::core::math::{Vec2, dir_from_degrees, rotate_degrees};

pub struct Actor {
    /// World units.
    pub pos: Vec2,
    /// Unit vector the actor looks along.
    pub orientation: Vec2,
    /// Scripted turning in degrees per second (0 = stands still).
    pub spin: f32,
    /// Visual class; selects the clip library.
    pub class: Arc<ClipLibrary>,
    animator: Animator,
    facing: Facing,
    /// Cleared for the tick when the wanted clip could not be resolved.
    drawable: bool,
}

impl Actor {
    pub fn new(pos: Vec2, heading: f32, class: Arc<ClipLibrary>, now_ms: u64) -> Self {
        Self {
            pos,
            orientation: dir_from_degrees(heading),
            spin: 0.0,
            class,
            animator: Animator::new(AnimState::Idle, now_ms),
            facing: Facing::South,
            drawable: false,
        }
    }

    pub fn with_spin(mut self, deg_per_sec: f32) -> Self {
        self.spin = deg_per_sec;
        self
    }

    pub fn state(&self) -> AnimState {
        self.animator.state()
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Externally driven state change (behaviour logic lives with the caller).
    pub fn set_state(&mut self, state: AnimState, now_ms: u64) {
        self.animator.set_state(state, now_ms);
    }

    /// One-shot clip has played out.
    pub fn finished(&self, now_ms: u64) -> bool {
        self.animator.is_finished(now_ms)
    }

    /// Spins the actor, recomputes its facing relative to `viewer` and
    /// advances its animation.
    pub fn update(&mut self, dt: f32, now_ms: u64, viewer: Vec2) {
        if self.spin != 0.0 {
            self.orientation = rotate_degrees(self.orientation, self.spin * dt).normalize_or_zero();
        }
        self.facing = Facing::for_viewer(self.pos, self.orientation, viewer);
        self.drawable = self
            .animator
            .update(now_ms, self.facing, &self.class)
            .is_ok();
    }

    /// Sheet name and frame to draw this tick, or `None` when the actor must
    /// be skipped.
    pub fn sprite(&self) -> Option<(&str, FrameRect)> {
        if !self.drawable {
            return None;
        }
        let frame = self.animator.current_frame()?;
        let clip = self.animator.clip()?;
        Some((clip.sheet(), frame))
    }
}
