use bevy_ecs::{
    component::Component,
    event::EventReader,
    system::{Query, Res},
};
use tracing::trace;

use crate::events::{ContactEvent, ContactSide};
use crate::systems::components::{DeltaTime, Position};

/// Back-and-forth horizontal movement that reverses on lateral impact.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    pub speed: f32,
    /// `1.0` moves right, `-1.0` moves left.
    pub direction: f32,
}

impl Patrol {
    pub fn new(speed: f32, direction: f32) -> Self {
        Self { speed, direction }
    }

    /// Horizontal distance covered in `dt` seconds.
    pub fn displacement(&self, dt: f32) -> f32 {
        self.speed * self.direction * dt
    }

    /// Flips direction if the contact was on a side; vertical contacts are ignored.
    pub fn react(&mut self, side: ContactSide) -> bool {
        if side.is_lateral() {
            self.direction = -self.direction;
            true
        } else {
            false
        }
    }
}

/// Moves every patrolling entity along its current direction.
pub fn patrol_system(dt: Res<DeltaTime>, mut patrols: Query<(&Patrol, &mut Position)>) {
    for (patrol, mut position) in patrols.iter_mut() {
        position.0.x += patrol.displacement(dt.0);
    }
}

/// Reverses patrols that bumped into something sideways this frame.
pub fn patrol_bounce_system(mut contacts: EventReader<ContactEvent>, mut patrols: Query<&mut Patrol>) {
    for contact in contacts.read().filter(|c| c.is_new()) {
        if let Ok(mut patrol) = patrols.get_mut(contact.actor) {
            if patrol.react(contact.side) {
                trace!(entity = ?contact.actor, direction = patrol.direction, "Patrol reversed");
            }
        }
    }
}
