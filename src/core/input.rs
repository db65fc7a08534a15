//! Input actions and per-tick processing of player movement.
use crate::core::grid::Grid;
use crate::core::player::Player;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    TurnLeft,
    TurnRight,
    MoveForward,
    MoveBackward,
    ToggleMinimap,
    ToggleOcclusion,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::TurnLeft,
        Action::TurnRight,
        Action::MoveForward,
        Action::MoveBackward,
        Action::ToggleMinimap,
        Action::ToggleOcclusion,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Current press state of every action, polled once per tick.
pub trait InputProvider {
    fn is_down(&self, action: Action) -> bool;
}

/// Plain press-state table, filled by the host each frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    down: [bool; Action::ALL.len()],
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, down: bool) {
        self.down[action.index()] = down;
    }
}

impl InputProvider for InputSnapshot {
    fn is_down(&self, action: Action) -> bool {
        self.down[action.index()]
    }
}

/// Remembers last tick's state so toggles fire once per press.
#[derive(Debug, Default)]
pub struct EdgeLatch {
    prev: InputSnapshot,
}

impl EdgeLatch {
    /// Returns the actions that went down this tick and records the new state.
    pub fn pressed(&mut self, input: &impl InputProvider) -> Vec<Action> {
        let mut fired = Vec::new();
        for action in Action::ALL {
            let down = input.is_down(action);
            if down && !self.prev.is_down(action) {
                fired.push(action);
            }
            self.prev.set(action, down);
        }
        fired
    }
}

/// Turns and moves the player from held actions.
pub fn process_input(
    input: &impl InputProvider,
    player: &mut Player,
    grid: &Grid,
    cell_size: f32,
    dt: f32,
) {
    if input.is_down(Action::TurnLeft) {
        player.turn(-1.0, dt);
    }
    if input.is_down(Action::TurnRight) {
        player.turn(1.0, dt);
    }

    let dir = if input.is_down(Action::MoveForward) {
        1.0
    } else if input.is_down(Action::MoveBackward) {
        -1.0
    } else {
        0.0
    };
    player.advance(dir, dt, grid, cell_size);
}
