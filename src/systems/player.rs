use bevy_ecs::{
    component::Component,
    event::EventWriter,
    query::With,
    system::{Commands, Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::{
    constants::player,
    error::GameError,
    systems::scene::{PendingScene, Scene},
    systems::{
        components::{Body, Camera, Collider, DeltaTime, PlayerControlled, Position, Scale, Sprite, Tags},
        growth::Growth,
        input::{InputSnapshot, Inputs},
    },
};

/// Animation the player sprite is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PlayerAnimation {
    #[default]
    Idle,
    #[strum(serialize = "run")]
    Running,
    #[strum(serialize = "jump")]
    Jumping,
}

impl PlayerAnimation {
    /// The animation to show when touching down.
    pub fn on_ground(moving: bool) -> Self {
        if moving {
            PlayerAnimation::Running
        } else {
            PlayerAnimation::Idle
        }
    }
}

/// Player-only state that isn't covered by the physics body.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    pub animation: PlayerAnimation,
    /// Facing left.
    pub flip_x: bool,
    /// An apple is out in the world; prizes stay inert until it is eaten.
    pub has_apple: bool,
}

impl PlayerState {
    /// Switches animation, returning whether it actually changed.
    ///
    /// Replaying the current animation would restart it from its first frame.
    pub fn play(&mut self, animation: PlayerAnimation) -> bool {
        if self.animation == animation {
            return false;
        }
        self.animation = animation;
        true
    }
}

/// Whether the player should pass through a platform instead of landing on it.
///
/// Only platforms tagged both `platform` and `soft` qualify, and only while the
/// player is rising. No stock tile is soft.
pub fn vetoes_resolution(body: &Body, other: Tags) -> bool {
    other.is(Tags::PLATFORM | Tags::SOFT) && body.is_rising()
}

/// Spawns the player at the level start.
pub fn spawn_player(commands: &mut Commands) -> bevy_ecs::entity::Entity {
    commands
        .spawn((
            PlayerControlled,
            Position(player::SPAWN),
            Scale(player::SPAWN_SCALE),
            Collider::new(player::SIZE),
            Body::dynamic(),
            Growth::default(),
            PlayerState::default(),
            Sprite("dino"),
        ))
        .id()
}

/// Applies this frame's movement, jump and fast-fall input to the player.
///
/// Movement is continuous while a direction is held; jumping is edge-triggered
/// and requires ground contact.
pub fn player_input_system(
    input: Res<InputSnapshot>,
    dt: Res<DeltaTime>,
    mut players: Query<(&mut Position, &mut Body, &mut PlayerState), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let (mut position, mut body, mut state) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player input: {}",
                e
            )));
            return;
        }
    };

    if input.just_pressed(Inputs::JUMP) && body.grounded {
        body.jump(player::JUMP_FORCE);
        state.play(PlayerAnimation::Jumping);
        debug!("Player jumped");
    }

    // The gamepad jump doesn't touch the animation
    if input.just_pressed(Inputs::GAMEPAD_SOUTH) && body.grounded {
        body.jump(player::JUMP_FORCE);
    }

    for (direction, sign) in [(Inputs::LEFT, -1.0), (Inputs::RIGHT, 1.0)] {
        if !input.is_held(direction) {
            continue;
        }
        position.0.x += sign * player::MOVE_SPEED * dt.0;
        state.flip_x = sign < 0.0;
        if body.grounded {
            state.play(PlayerAnimation::Running);
        }
    }

    position.0.x += input.stick.x * player::MOVE_SPEED * dt.0;

    if input.just_released(Inputs::LEFT | Inputs::RIGHT) && body.grounded && !input.moving() {
        state.play(PlayerAnimation::Idle);
    }

    if input.just_pressed(Inputs::FAST_FALL) {
        body.weight = player::FAST_FALL_WEIGHT;
    }
    if input.just_released(Inputs::FAST_FALL) {
        body.weight = 1.0;
    }
}

/// Picks the idle or run animation when the player touches down.
pub fn player_landing_system(
    input: Res<InputSnapshot>,
    mut players: Query<(&Body, &mut PlayerState), With<PlayerControlled>>,
) {
    for (body, mut state) in players.iter_mut() {
        if body.just_landed {
            state.play(PlayerAnimation::on_ground(input.moving()));
        }
    }
}

/// Loses the game when the player falls off the world, and pins the camera.
pub fn player_bounds_system(
    mut camera: ResMut<Camera>,
    mut pending: ResMut<PendingScene>,
    players: Query<&Position, With<PlayerControlled>>,
) {
    for position in players.iter() {
        camera.center = position.0;
        if position.0.y >= player::FALL_DEATH {
            info!(y = position.0.y, "Player fell out of the world");
            pending.request(Scene::Lost);
        }
    }
}
