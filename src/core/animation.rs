//! Sprite-sheet clips and the per-actor animation cursor.
//!
//! Clips are immutable and shared by `Arc` across every actor of the same
//! visual class. Each actor owns one `Animator`, which picks a clip from
//! its behavioural state (and, for looping states, the 8-way facing) and
//! derives the frame index from elapsed time.
use std::collections::HashMap;
use std::sync::Arc;

use log::warn;

use crate::core::facing::Facing;
use crate::error::AnimationError;

/// Source rectangle of one frame inside a sprite sheet, in texels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl FrameRect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    name: String,
    /// Texture name of the sheet the frames live in.
    sheet: String,
    frames: Vec<FrameRect>,
    frame_ms: u64,
}

impl AnimationClip {
    pub fn new(
        name: impl Into<String>,
        sheet: impl Into<String>,
        frames: Vec<FrameRect>,
        frame_ms: u64,
    ) -> Result<Self, AnimationError> {
        let name = name.into();
        if frames.is_empty() {
            return Err(AnimationError::EmptyClip(name));
        }
        Ok(Self {
            name,
            sheet: sheet.into(),
            frames,
            frame_ms: frame_ms.max(1),
        })
    }

    /// `count` frames laid left to right along one row of a sheet.
    pub fn strip(
        name: impl Into<String>,
        sheet: impl Into<String>,
        row: u32,
        count: u32,
        frame_w: u32,
        frame_h: u32,
        frame_ms: u64,
    ) -> Result<Self, AnimationError> {
        let frames = (0..count)
            .map(|i| FrameRect::new(i * frame_w, row * frame_h, frame_w, frame_h))
            .collect();
        Self::new(name, sheet, frames, frame_ms)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    pub fn frame(&self, index: usize) -> FrameRect {
        self.frames[index.min(self.frames.len() - 1)]
    }

    pub fn total_ms(&self) -> u64 {
        self.frame_ms * self.frames.len() as u64
    }
}

/// Frame index after `elapsed_ms`. Looping clips wrap; one-shot clips
/// freeze on the last frame.
pub fn frame_at(elapsed_ms: u64, frame_ms: u64, frames: usize, looping: bool) -> usize {
    if frames == 0 {
        return 0;
    }
    let step = (elapsed_ms / frame_ms.max(1)) as usize;
    if looping {
        step % frames
    } else {
        step.min(frames - 1)
    }
}

/// Behavioural state driving clip selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnimState {
    Idle,
    Walk,
    Hit,
    Death,
    Alert,
    Shoot,
}

impl AnimState {
    /// Idle and Walk loop and vary by facing; the rest play once.
    #[inline]
    pub fn is_looping(self) -> bool {
        matches!(self, AnimState::Idle | AnimState::Walk)
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Walk => "walk",
            AnimState::Hit => "hit",
            AnimState::Death => "death",
            AnimState::Alert => "alert",
            AnimState::Shoot => "shoot",
        }
    }

    /// Clip name for this state seen from `facing`, e.g. `walk_se` or `death`.
    pub fn clip_name(self, facing: Facing) -> String {
        if self.is_looping() {
            format!("{}_{}", self.label(), facing.suffix())
        } else {
            self.label().to_string()
        }
    }
}

/// Clips of one visual class, keyed by clip name.
#[derive(Clone, Debug, Default)]
pub struct ClipLibrary {
    clips: HashMap<String, Arc<AnimationClip>>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, clip: AnimationClip) {
        self.clips.insert(clip.name().to_string(), Arc::new(clip));
    }

    pub fn get(&self, name: &str) -> Result<Arc<AnimationClip>, AnimationError> {
        self.clips
            .get(name)
            .cloned()
            .ok_or_else(|| AnimationError::MissingClip(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Full humanoid set on one sheet: one row per looping clip and facing
    /// (`walk_*` rows 0..8, `idle_*` rows 8..16) followed by one row per
    /// one-shot state.
    pub fn humanoid(sheet: &str, frame_w: u32, frame_h: u32) -> Result<Self, AnimationError> {
        let mut lib = Self::new();
        let mut row = 0;
        for state in [AnimState::Walk, AnimState::Idle] {
            let (count, ms) = if state == AnimState::Walk { (4, 150) } else { (2, 400) };
            for facing in Facing::ALL {
                lib.insert(AnimationClip::strip(
                    state.clip_name(facing),
                    sheet,
                    row,
                    count,
                    frame_w,
                    frame_h,
                    ms,
                )?);
                row += 1;
            }
        }
        for (state, count) in [
            (AnimState::Hit, 2),
            (AnimState::Death, 5),
            (AnimState::Alert, 3),
            (AnimState::Shoot, 3),
        ] {
            lib.insert(AnimationClip::strip(
                state.clip_name(Facing::South),
                sheet,
                row,
                count,
                frame_w,
                frame_h,
                200,
            )?);
            row += 1;
        }
        Ok(lib)
    }
}

/// Per-actor animation cursor.
#[derive(Clone, Debug)]
pub struct Animator {
    state: AnimState,
    clip: Option<Arc<AnimationClip>>,
    frame_ms: u64,
    started_at: u64,
    looping: bool,
    frame: usize,
    /// Name of the clip that failed to resolve, so the miss is logged once.
    missing: Option<String>,
}

impl Animator {
    pub fn new(state: AnimState, now_ms: u64) -> Self {
        Self {
            state,
            clip: None,
            frame_ms: 100,
            started_at: now_ms,
            looping: state.is_looping(),
            frame: 0,
            missing: None,
        }
    }

    pub fn state(&self) -> AnimState {
        self.state
    }

    pub fn clip(&self) -> Option<&Arc<AnimationClip>> {
        self.clip.as_ref()
    }

    pub fn frame_index(&self) -> usize {
        self.frame
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Current frame rect, if a clip has ever resolved.
    pub fn current_frame(&self) -> Option<FrameRect> {
        self.clip.as_ref().map(|c| c.frame(self.frame))
    }

    /// Switches behavioural state. Entering any state restarts the clock at
    /// frame 0; one-shot states stop looping. Asking for the current state
    /// again is a no-op.
    pub fn set_state(&mut self, state: AnimState, now_ms: u64) {
        if state == self.state {
            return;
        }
        self.state = state;
        self.started_at = now_ms;
        self.looping = state.is_looping();
        self.frame = 0;
    }

    /// True once a one-shot clip has run its full length.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        match &self.clip {
            Some(clip) if !self.looping => now_ms.saturating_sub(self.started_at) >= clip.total_ms(),
            _ => false,
        }
    }

    /// Re-selects the clip for `(state, facing)` and advances the frame.
    ///
    /// A facing change swaps the clip without touching the clock, so looping
    /// motion continues. If the clip is missing the previous clip is kept and
    /// the error is returned so the caller can skip drawing this tick.
    pub fn update(
        &mut self,
        now_ms: u64,
        facing: Facing,
        clips: &ClipLibrary,
    ) -> Result<(), AnimationError> {
        let name = self.state.clip_name(facing);
        let wanted = self.clip.as_ref().is_none_or(|c| c.name() != name);
        if wanted {
            match clips.get(&name) {
                Ok(clip) => {
                    self.frame_ms = clip.frame_ms();
                    self.clip = Some(clip);
                    self.missing = None;
                }
                Err(err) => {
                    if self.missing.as_deref() != Some(name.as_str()) {
                        warn!("animation clip {name:?} not found, keeping previous clip");
                        self.missing = Some(name);
                    }
                    return Err(err);
                }
            }
        }

        let frames = self.clip.as_ref().map_or(0, |c| c.frame_count());
        let elapsed = now_ms.saturating_sub(self.started_at);
        self.frame = frame_at(elapsed, self.frame_ms, frames, self.looping);
        Ok(())
    }
}
