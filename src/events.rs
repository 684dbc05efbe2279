use bevy_ecs::{entity::Entity, event::Event};

/// Which face of the actor touched the other collider.
///
/// Coordinates grow downward, so `Bottom` means the actor is resting on (or
/// landing on) the other entity and `Top` means it hit something with its head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl ContactSide {
    pub fn is_lateral(self) -> bool {
        matches!(self, ContactSide::Left | ContactSide::Right)
    }
}

/// Whether this pair was already touching on the previous physics step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactPhase {
    Began,
    Persisting,
}

/// A contact reported by the physics step, seen from `actor`'s perspective.
///
/// Pairs of dynamic bodies are reported twice, once per perspective.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactEvent {
    pub actor: Entity,
    pub other: Entity,
    pub side: ContactSide,
    pub phase: ContactPhase,
}

impl ContactEvent {
    pub fn began(actor: Entity, other: Entity, side: ContactSide) -> Self {
        Self {
            actor,
            other,
            side,
            phase: ContactPhase::Began,
        }
    }

    pub fn is_new(&self) -> bool {
        self.phase == ContactPhase::Began
    }
}
