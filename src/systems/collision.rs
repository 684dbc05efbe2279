use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::With,
    system::{Commands, Query, Res, ResMut},
};
use glam::IVec2;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::{
    constants::{audio, effect, growth, physics, player},
    error::{EntityError, GameError},
    events::{ContactEvent, ContactSide},
    level::{spawn_tile, Level},
    systems::{
        audio::{AudioEvent, PlayParams, SoundCue},
        components::{Body, CoinPitch, Coins, DeltaTime, PlayerControlled, Position, Sprite, Tags, TileCell},
        growth::Growth,
        lifetime::TimeToLive,
        player::PlayerState,
        progression::{open_gate, QuestionBank, QuizState},
        scene::{PendingScene, Scene},
    },
};

/// What touching a tagged entity does to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Lose,
    StompEnemy,
    EnterPortal,
    Headbutt,
    EatApple,
    CollectCoin,
}

/// Picks the reaction for a player contact with an entity carrying `tags`.
///
/// When an entity carries several tags, the first match in this order wins:
/// danger, enemy, portal, prize, apple, coin.
pub fn reaction_for(tags: Tags, side: ContactSide) -> Option<Reaction> {
    if tags.is(Tags::DANGER) {
        Some(Reaction::Lose)
    } else if tags.is(Tags::ENEMY) {
        if side == ContactSide::Bottom {
            Some(Reaction::StompEnemy)
        } else {
            Some(Reaction::Lose)
        }
    } else if tags.is(Tags::PORTAL) {
        Some(Reaction::EnterPortal)
    } else if tags.is(Tags::PRIZE) {
        (side == ContactSide::Top).then_some(Reaction::Headbutt)
    } else if tags.is(Tags::APPLE) {
        Some(Reaction::EatApple)
    } else if tags.is(Tags::COIN) {
        Some(Reaction::CollectCoin)
    } else {
        None
    }
}

/// Lets the coin detune drift back toward zero.
pub fn coin_pitch_system(dt: Res<DeltaTime>, mut pitch: ResMut<CoinPitch>) {
    if pitch.0 > 0.0 {
        pitch.0 = (pitch.0 - dt.0 * audio::COIN_PITCH_DECAY).max(0.0);
    }
}

/// Applies gameplay reactions to the contacts the player started this step.
#[allow(clippy::too_many_arguments)]
pub fn collision_system(
    mut commands: Commands,
    mut contacts: EventReader<ContactEvent>,
    mut players: Query<(Entity, &mut Body, &mut Growth, &mut PlayerState), With<PlayerControlled>>,
    others: Query<(&Tags, &Position, Option<&TileCell>)>,
    level: Res<Level>,
    bank: Res<QuestionBank>,
    mut quiz: ResMut<QuizState>,
    mut coins: ResMut<Coins>,
    mut pitch: ResMut<CoinPitch>,
    mut pending: ResMut<PendingScene>,
    mut audio_events: EventWriter<AudioEvent>,
    mut errors: EventWriter<GameError>,
) {
    let Ok((player_entity, mut body, mut growth, mut state)) = players.single_mut() else {
        // Drain so stale contacts aren't replayed once a player exists again
        contacts.clear();
        return;
    };

    // Entities already consumed this step; a second contact must not count twice
    let mut consumed: SmallVec<[Entity; 8]> = SmallVec::new();

    for contact in contacts.read() {
        if contact.actor != player_entity || !contact.is_new() || consumed.contains(&contact.other) {
            continue;
        }
        let Ok((tags, position, cell)) = others.get(contact.other) else {
            continue;
        };
        let Some(reaction) = reaction_for(*tags, contact.side) else {
            continue;
        };

        debug!(?reaction, other = ?contact.other, side = ?contact.side, "Player reaction");

        match reaction {
            Reaction::Lose => {
                audio_events.write(AudioEvent::play(SoundCue::Hit));
                pending.request(Scene::Lost);
            }
            Reaction::StompEnemy => {
                body.jump(player::JUMP_FORCE * player::STOMP_BOUNCE);
                commands.entity(contact.other).despawn();
                consumed.push(contact.other);
                commands.spawn((Position(position.0), Sprite("kaboom"), TimeToLive::new(effect::KABOOM_SECONDS)));
                audio_events.write(AudioEvent::play(SoundCue::PowerUp));
            }
            Reaction::EnterPortal => {
                audio_events.write(AudioEvent::play(SoundCue::Portal));
                open_gate(&mut commands, &mut quiz, &bank, level.id);
            }
            Reaction::Headbutt => {
                if state.has_apple {
                    continue;
                }
                let Some(&TileCell(cell)) = cell else {
                    errors.write(EntityError::MissingTileCell(format!("{:?}", contact.other)).into());
                    continue;
                };
                match spawn_tile(&mut commands, &level.legend, '#', cell - IVec2::Y) {
                    Ok(apple) => {
                        let mut apple_body = Body::dynamic();
                        apple_body.jump(physics::DEFAULT_JUMP_FORCE);
                        commands.entity(apple).insert(apple_body);
                        state.has_apple = true;
                        audio_events.write(AudioEvent::play(SoundCue::Blip));
                    }
                    Err(e) => {
                        debug_assert!(false, "apple tile missing from legend: {e}");
                        errors.write(e.into());
                    }
                }
            }
            Reaction::EatApple => {
                commands.entity(contact.other).despawn();
                consumed.push(contact.other);
                growth.grow_for(growth::POWER_UP_DURATION, growth::POWER_UP_SCALE);
                state.has_apple = false;
                audio_events.write(AudioEvent::play(SoundCue::PowerUp));
            }
            Reaction::CollectCoin => {
                commands.entity(contact.other).despawn();
                consumed.push(contact.other);
                coins.0 += 1;
                audio_events.write(AudioEvent::Play(
                    SoundCue::Coin,
                    PlayParams {
                        detune: pitch.0,
                        ..Default::default()
                    },
                ));
                pitch.0 += audio::COIN_PITCH_STEP;
                info!(coins = coins.0, "Coin collected");
            }
        }
    }
}
