use bevy_ecs::{component::Component, resource::Resource};
use bitflags::bitflags;
use glam::Vec2;

use crate::constants::physics::GRAVITY;

/// World position of an entity: the bottom-center of its collider.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Uniform scale applied to the sprite and collider.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Scale(pub f32);

impl Default for Scale {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Name of the sprite an entity is drawn with.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite(pub &'static str);

bitflags! {
    /// Labels used to select collision reactions.
    #[derive(Component, Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Tags: u16 {
        const PLATFORM = 1 << 0;
        const DANGER = 1 << 1;
        const ENEMY = 1 << 2;
        const COIN = 1 << 3;
        const PRIZE = 1 << 4;
        const APPLE = 1 << 5;
        const PORTAL = 1 << 6;
        /// Platforms the player may jump up through.
        const SOFT = 1 << 7;
    }
}

impl Tags {
    /// True when every tag in `other` is present.
    pub fn is(&self, other: Tags) -> bool {
        self.contains(other)
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Penetration depth on each axis; both positive only when the boxes overlap.
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        Vec2::new(
            self.max.x.min(other.max.x) - self.min.x.max(other.min.x),
            self.max.y.min(other.max.y) - self.min.y.max(other.min.y),
        )
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        let pen = self.penetration(other);
        pen.x > 0.0 && pen.y > 0.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.min += delta;
        self.max += delta;
    }
}

/// Axis-aligned collision area, sized before the entity's [`Scale`] is applied.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: Vec2,
}

impl Collider {
    pub fn new(size: Vec2) -> Self {
        Self { size }
    }

    pub fn bounds(&self, position: Vec2, scale: f32) -> Aabb {
        let size = self.size * scale;
        let half_width = size.x * 0.5;
        Aabb {
            min: Vec2::new(position.x - half_width, position.y - size.y),
            max: Vec2::new(position.x + half_width, position.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Terrain; never moves and halts dynamic bodies.
    Static,
    /// Affected by gravity and resolved against static bodies.
    Dynamic,
}

/// A physics body.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub kind: BodyKind,
    pub velocity: Vec2,
    /// Gravity multiplier.
    pub weight: f32,
    /// Resting on a surface as of the last physics step.
    pub grounded: bool,
    /// Became grounded during the last physics step.
    pub just_landed: bool,
}

impl Body {
    pub fn new(kind: BodyKind) -> Self {
        Self {
            kind,
            velocity: Vec2::ZERO,
            weight: 1.0,
            grounded: false,
            just_landed: false,
        }
    }

    pub fn dynamic() -> Self {
        Self::new(BodyKind::Dynamic)
    }

    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Launches the body upward, giving up any ground contact.
    pub fn jump(&mut self, force: f32) {
        self.velocity.y = -force;
        self.grounded = false;
        self.just_landed = false;
    }

    pub fn is_rising(&self) -> bool {
        !self.grounded && self.velocity.y < 0.0
    }

    pub fn apply_gravity(&mut self, dt: f32) {
        self.velocity.y += GRAVITY * self.weight * dt;
    }
}

/// Grid cell a level entity was spawned from.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCell(pub glam::IVec2);

/// A tag component for the entity driven by player input.
#[derive(Default, Component, Debug)]
pub struct PlayerControlled;

/// Fixed on-screen text.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
}

/// A selectable quiz answer, in bank order.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct ChoiceButton {
    pub index: usize,
    pub text: String,
}

/// Seconds elapsed since the previous frame.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DeltaTime(pub f32);

/// Center of the view.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub center: Vec2,
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub fullscreen: bool,
}

/// Coins collected this session; only ever grows until a full restart.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coins(pub u32);

/// Detune applied to the next coin cue, decaying toward zero over time.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CoinPitch(pub f32);
