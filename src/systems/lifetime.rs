use bevy_ecs::{
    component::Component,
    entity::Entity,
    system::{Commands, Query, Res},
};

use crate::systems::components::DeltaTime;

/// Component for entities that should be automatically deleted after some time
#[derive(Component, Debug, Clone, Copy)]
pub struct TimeToLive {
    pub remaining: f32,
}

impl TimeToLive {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }
}

/// Counts down every [`TimeToLive`] and despawns the entities that run out
pub fn time_to_live_system(mut commands: Commands, dt: Res<DeltaTime>, mut query: Query<(Entity, &mut TimeToLive)>) {
    for (entity, mut ttl) in query.iter_mut() {
        if ttl.remaining <= dt.0 {
            commands.entity(entity).despawn();
        } else {
            ttl.remaining -= dt.0;
        }
    }
}
