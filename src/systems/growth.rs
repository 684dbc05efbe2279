use bevy_ecs::{
    component::Component,
    system::{Query, Res},
};
use tracing::debug;

use crate::constants::growth::{BASE_SCALE, EASE_RATE};
use crate::systems::components::{DeltaTime, Scale};

/// Timer remainders this small count as expired; frame steps don't sum exactly.
const EXPIRY_EPSILON: f32 = 1e-4;

/// Timed scale-up that reverts on its own.
///
/// Triggering growth while already big replaces the timer and target instead
/// of stacking them.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Growth {
    is_big: bool,
    timer: f32,
    target: f32,
}

impl Default for Growth {
    fn default() -> Self {
        Self {
            is_big: false,
            timer: 0.0,
            target: BASE_SCALE,
        }
    }
}

impl Growth {
    pub fn is_big(&self) -> bool {
        self.is_big
    }

    /// Seconds left before reverting.
    pub fn remaining(&self) -> f32 {
        self.timer
    }

    /// Scale the entity is easing toward.
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn grow_for(&mut self, duration: f32, target: f32) {
        self.is_big = true;
        self.timer = duration;
        self.target = target;
    }

    pub fn shrink_now(&mut self) {
        self.is_big = false;
        self.timer = 0.0;
        self.target = BASE_SCALE;
    }

    /// Counts down the timer, returning `true` if growth expired on this tick.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.is_big {
            return false;
        }
        self.timer -= dt;
        if self.timer <= EXPIRY_EPSILON {
            self.shrink_now();
            return true;
        }
        false
    }

    /// Moves `current` toward the target by an exponential step.
    pub fn ease(&self, current: f32, dt: f32) -> f32 {
        let t = (dt * EASE_RATE).min(1.0);
        current + (self.target - current) * t
    }
}

/// Ticks growth timers and eases every grown entity toward its target scale.
pub fn growth_system(dt: Res<DeltaTime>, mut query: Query<(&mut Growth, &mut Scale)>) {
    for (mut growth, mut scale) in query.iter_mut() {
        if growth.advance(dt.0) {
            debug!("Growth expired");
        }
        scale.0 = growth.ease(scale.0, dt.0);
    }
}
