//! The top-level mode switch: playing a level, lost, or won.

use bevy_ecs::{
    event::Events,
    resource::Resource,
    system::{Res, ResMut},
    world::World,
};
use tracing::{debug, error, info};

use crate::{
    constants::{audio::MUSIC_VOLUME, SCREEN_SIZE},
    error::{GameError, GameResult},
    events::ContactEvent,
    level::{spawn_level, Level, Levels, TileLegend},
    systems::{
        audio::{AudioEvent, PlayParams, SoundCue},
        components::{Camera, CoinPitch, Coins, Label, Position},
        input::InputSnapshot,
        physics::ActiveContacts,
        player::spawn_player,
        progression::QuizState,
    },
};

/// A game mode together with the data its entry needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::IntoStaticStr)]
pub enum Scene {
    Playing { level_id: usize, coins: u32 },
    Lost,
    Won,
}

impl Scene {
    /// Where a fresh session starts.
    pub const START: Scene = Scene::Playing { level_id: 0, coins: 0 };

    /// The message shown in terminal scenes.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            Scene::Playing { .. } => None,
            Scene::Lost => Some("You Lose"),
            Scene::Won => Some("You Win"),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Scene::Playing { .. })
    }
}

/// The scene that was last entered.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentScene(pub Scene);

/// A transition waiting for the end of the frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingScene(Option<Scene>);

impl PendingScene {
    /// Queues `scene`, unless something already queued takes precedence.
    ///
    /// `Lost` overrides anything; otherwise the first request of a frame wins.
    pub fn request(&mut self, scene: Scene) {
        match self.0 {
            None => self.0 = Some(scene),
            Some(Scene::Lost) => {}
            Some(current) if scene == Scene::Lost => {
                debug!(dropped = ?current, "Lost overrides pending transition");
                self.0 = Some(scene);
            }
            Some(_) => {}
        }
    }

    pub fn peek(&self) -> Option<Scene> {
        self.0
    }

    pub fn take(&mut self) -> Option<Scene> {
        self.0.take()
    }
}

/// Restarts from the first level on any press in a terminal scene.
pub fn restart_system(input: Res<InputSnapshot>, mut pending: ResMut<PendingScene>) {
    if input.any_pressed() {
        pending.request(Scene::START);
    }
}

/// Applies the pending transition, if any, at the end of the frame.
pub fn scene_transition_system(world: &mut World) {
    let Some(next) = world.resource_mut::<PendingScene>().take() else {
        return;
    };
    if let Err(e) = enter(world, next) {
        error!(error = %e, scene = ?next, "Scene entry failed");
        world.send_event(e);
    }
}

/// Tears the current scene down and builds `scene` from scratch.
pub fn enter(world: &mut World, scene: Scene) -> GameResult<()> {
    teardown(world);
    world.insert_resource(CurrentScene(scene));
    info!(scene = <&'static str>::from(scene), ?scene, "Entering scene");

    match scene {
        Scene::Playing { level_id, coins } => enter_level(world, level_id, coins),
        Scene::Lost | Scene::Won => {
            let text = scene
                .banner()
                .ok_or_else(|| GameError::InvalidState(format!("{scene:?} has no banner")))?;
            world.spawn((
                Label { text: text.to_string() },
                Position(SCREEN_SIZE * 0.5),
            ));
            Ok(())
        }
    }
}

/// Removes every entity and all per-scene state.
fn teardown(world: &mut World) {
    let removed = world.entities().len();
    world.clear_entities();
    world.resource_mut::<Events<ContactEvent>>().clear();
    world.resource_mut::<ActiveContacts>().0.clear();
    *world.resource_mut::<QuizState>() = QuizState::default();
    world.send_event(AudioEvent::StopMusic);
    debug!(removed, "Scene torn down");
}

fn enter_level(world: &mut World, level_id: usize, coins: u32) -> GameResult<()> {
    let layout = world.resource::<Levels>().get(level_id)?.clone();
    let legend = world.resource::<TileLegend>().clone();

    world.send_event(AudioEvent::Play(
        SoundCue::BgSound,
        PlayParams {
            volume: MUSIC_VOLUME,
            looping: true,
            ..Default::default()
        },
    ));

    let spawned = {
        let mut commands = world.commands();
        let spawned = spawn_level(&mut commands, &layout, &legend);
        spawn_player(&mut commands);
        spawned
    };
    world.flush();

    world.insert_resource(Level {
        id: level_id,
        layout,
        legend,
    });
    world.insert_resource(Coins(coins));
    world.insert_resource(CoinPitch::default());
    world.insert_resource(Camera::default());

    info!(level_id, coins, tiles = spawned, "Level started");
    Ok(())
}
