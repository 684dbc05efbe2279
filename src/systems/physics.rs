//! A minimal axis-aligned physics step.
//!
//! Dynamic bodies fall under gravity and are pushed out of static bodies along
//! the axis of least penetration. Every overlap involving a dynamic body is
//! reported as a [`ContactEvent`] for the reaction systems to consume.

use std::collections::HashSet;

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::Has,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::trace;

use crate::events::{ContactEvent, ContactPhase, ContactSide};
use crate::systems::components::{Aabb, Body, Collider, DeltaTime, PlayerControlled, Position, Scale, Tags};
use crate::systems::player::vetoes_resolution;

/// Pairs that were touching at the end of the previous step.
#[derive(Resource, Debug, Default)]
pub struct ActiveContacts(pub HashSet<(Entity, Entity)>);

/// Classifies a contact by the axis of least penetration.
pub fn contact_side(actor: &Aabb, other: &Aabb) -> ContactSide {
    let pen = actor.penetration(other);
    let (a, b) = (actor.center(), other.center());
    if pen.y <= pen.x {
        if a.y < b.y {
            ContactSide::Bottom
        } else {
            ContactSide::Top
        }
    } else if a.x < b.x {
        ContactSide::Right
    } else {
        ContactSide::Left
    }
}

/// The translation that separates `actor` from `other` for a contact on `side`.
pub fn separation(actor: &Aabb, other: &Aabb, side: ContactSide) -> Vec2 {
    let pen = actor.penetration(other);
    match side {
        ContactSide::Bottom => Vec2::new(0.0, -pen.y),
        ContactSide::Top => Vec2::new(0.0, pen.y),
        ContactSide::Right => Vec2::new(-pen.x, 0.0),
        ContactSide::Left => Vec2::new(pen.x, 0.0),
    }
}

struct Snapshot {
    entity: Entity,
    bounds: Aabb,
    tags: Tags,
    solid: bool,
    dynamic: bool,
}

/// Integrates dynamic bodies, resolves them against terrain and reports contacts.
pub fn physics_system(
    dt: Res<DeltaTime>,
    mut active: ResMut<ActiveContacts>,
    mut contacts: EventWriter<ContactEvent>,
    mut bodies: Query<(
        Entity,
        &mut Position,
        Option<&mut Body>,
        &Collider,
        Option<&Scale>,
        Option<&Tags>,
        Has<PlayerControlled>,
    )>,
) {
    // Integrate
    for (_, mut position, body, ..) in bodies.iter_mut() {
        let Some(mut body) = body else { continue };
        if body.is_static() {
            continue;
        }
        body.apply_gravity(dt.0);
        position.0 += body.velocity * dt.0;
    }

    let mut world: Vec<Snapshot> = bodies
        .iter()
        .map(|(entity, position, body, collider, scale, tags, _)| Snapshot {
            entity,
            bounds: collider.bounds(position.0, scale.map_or(1.0, |s| s.0)),
            tags: tags.copied().unwrap_or_default(),
            solid: body.is_some_and(|b| b.is_static()),
            dynamic: body.is_some_and(|b| !b.is_static()),
        })
        .collect();

    let mut touching = HashSet::new();

    for index in 0..world.len() {
        if !world[index].dynamic {
            continue;
        }
        let actor = world[index].entity;
        let Ok((_, mut position, Some(mut body), _, _, _, is_player)) = bodies.get_mut(actor) else {
            continue;
        };

        let was_grounded = body.grounded;
        body.grounded = false;
        let mut bounds = world[index].bounds;

        // Resolve against the deepest overlaps first so that seams between
        // neighbouring tiles don't register as walls.
        let mut candidates: SmallVec<[(usize, f32); 8]> = world
            .iter()
            .enumerate()
            .filter(|(i, other)| *i != index && bounds.overlaps(&other.bounds))
            .map(|(i, other)| {
                let pen = bounds.penetration(&other.bounds);
                (i, pen.x * pen.y)
            })
            .collect();
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (other_index, _) in candidates {
            let other = &world[other_index];
            if !bounds.overlaps(&other.bounds) {
                continue;
            }
            let side = contact_side(&bounds, &other.bounds);

            if other.solid && !(is_player && vetoes_resolution(&body, other.tags)) {
                let delta = separation(&bounds, &other.bounds, side);
                bounds.translate(delta);
                position.0 += delta;
                match side {
                    ContactSide::Bottom => {
                        body.velocity.y = body.velocity.y.min(0.0);
                        body.grounded = true;
                    }
                    ContactSide::Top => body.velocity.y = body.velocity.y.max(0.0),
                    ContactSide::Left | ContactSide::Right => body.velocity.x = 0.0,
                }
            }

            let pair = (actor, other.entity);
            let phase = if active.0.contains(&pair) {
                ContactPhase::Persisting
            } else {
                ContactPhase::Began
            };
            touching.insert(pair);

            trace!(?actor, other = ?other.entity, ?side, ?phase, "Contact");
            contacts.write(ContactEvent {
                actor,
                other: other.entity,
                side,
                phase,
            });
        }

        body.just_landed = body.grounded && !was_grounded;
        world[index].bounds = bounds;
    }

    active.0 = touching;
}
