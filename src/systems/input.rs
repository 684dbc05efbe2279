//! Per-frame input snapshot, filled by whatever drives the simulation.

use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use bitflags::bitflags;
use glam::Vec2;
use tracing::info;

use crate::systems::components::DisplayState;

bitflags! {
    /// Named inputs the game listens to.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Inputs: u16 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP = 1 << 2;
        const FAST_FALL = 1 << 3;
        const FULLSCREEN = 1 << 4;
        const GAMEPAD_SOUTH = 1 << 5;
        /// Any other key; only useful for "press anything" prompts.
        const OTHER = 1 << 6;
    }
}

/// Everything the player did this frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub held: Inputs,
    pub pressed: Inputs,
    pub released: Inputs,
    /// Left analog stick, each axis in `-1.0..=1.0`.
    pub stick: Vec2,
    /// Quiz answer clicked this frame, by on-screen index.
    pub choice: Option<usize>,
}

impl InputSnapshot {
    /// Derives the next snapshot from the inputs held this frame, computing edges
    /// against the inputs held in `self`.
    pub fn next(&self, held: Inputs) -> Self {
        Self {
            held,
            pressed: held - self.held,
            released: self.held - held,
            stick: Vec2::ZERO,
            choice: None,
        }
    }

    pub fn with_stick(mut self, stick: Vec2) -> Self {
        self.stick = stick;
        self
    }

    pub fn with_choice(mut self, choice: usize) -> Self {
        self.choice = Some(choice);
        self
    }

    pub fn is_held(&self, input: Inputs) -> bool {
        self.held.intersects(input)
    }

    pub fn just_pressed(&self, input: Inputs) -> bool {
        self.pressed.intersects(input)
    }

    pub fn just_released(&self, input: Inputs) -> bool {
        self.released.intersects(input)
    }

    /// Whether a horizontal direction is held.
    pub fn moving(&self) -> bool {
        self.is_held(Inputs::LEFT | Inputs::RIGHT)
    }

    /// Whether anything at all was pressed this frame.
    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty() || self.choice.is_some()
    }
}

/// Toggles fullscreen on the fullscreen input.
pub fn display_toggle_system(input: Res<InputSnapshot>, mut display: ResMut<DisplayState>) {
    if input.just_pressed(Inputs::FULLSCREEN) {
        display.fullscreen = !display.fullscreen;
        let fullscreen = display.fullscreen;
        info!(fullscreen, "Display mode toggled");
    }
}
