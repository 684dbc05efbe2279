#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bevy_ecs::{entity::Entity, event::Events, query::With, world::World};
use glam::Vec2;
use quiz_platformer::{
    constants::tile,
    error::GameError,
    events::{ContactEvent, ContactSide},
    game::{Game, GameConfig},
    level::{Level, LevelLayout, Levels, TileLegend},
    systems::{
        spawn_player, ActiveContacts, AudioBackend, AudioEvent, AudioResource, AudioState, Body, BodyKind, Camera,
        CoinPitch, Coins, Collider, DeltaTime, DisplayState, InputSnapshot, PendingScene, PlayParams, PlayerControlled,
        Position, QuestionBank, QuizState, SoundCue, Tags, TileCell,
    },
};

/// One frame at 60 Hz.
pub const DT: f32 = 1.0 / 60.0;

/// A flat strip of grass with an empty row above it.
pub const FLAT: &[&str] = &["          ", "=========="];

pub fn layout(rows: &[&str]) -> LevelLayout {
    LevelLayout::new(rows).unwrap()
}

/// A world carrying every resource and event queue the gameplay systems read.
pub fn create_test_world() -> World {
    let mut world = World::new();
    world.init_resource::<Events<ContactEvent>>();
    world.init_resource::<Events<AudioEvent>>();
    world.init_resource::<Events<GameError>>();

    let legend = TileLegend::default();
    world.insert_resource(Level {
        id: 0,
        layout: layout(FLAT),
        legend: legend.clone(),
    });
    world.insert_resource(Levels(vec![layout(FLAT), layout(FLAT)]));
    world.insert_resource(legend);
    world.insert_resource(QuestionBank::default());
    world.insert_resource(QuizState::default());
    world.insert_resource(PendingScene::default());
    world.insert_resource(ActiveContacts::default());
    world.insert_resource(Coins::default());
    world.insert_resource(CoinPitch::default());
    world.insert_resource(Camera::default());
    world.insert_resource(DisplayState::default());
    world.insert_resource(DeltaTime(DT));
    world.insert_resource(InputSnapshot::default());
    world.insert_resource(AudioState::default());
    world.insert_resource(AudioResource::default());
    world
}

pub fn spawn_test_player(world: &mut World) -> Entity {
    let player = spawn_player(&mut world.commands());
    world.flush();
    player
}

pub fn spawn_tagged(world: &mut World, position: Vec2, tags: Tags, kind: Option<BodyKind>) -> Entity {
    let mut entity = world.spawn((Position(position), Collider::new(tile::SIZE), tags));
    if let Some(kind) = kind {
        entity.insert(Body::new(kind));
    }
    entity.id()
}

pub fn spawn_tile_at(world: &mut World, cell: (i32, i32), tags: Tags) -> Entity {
    let cell = glam::IVec2::new(cell.0, cell.1);
    world
        .spawn((
            Position(quiz_platformer::level::cell_origin(cell)),
            Collider::new(tile::SIZE),
            Body::new(BodyKind::Static),
            TileCell(cell),
            tags,
        ))
        .id()
}

pub fn send_contact(world: &mut World, actor: Entity, other: Entity, side: ContactSide) {
    world.send_event(ContactEvent::began(actor, other, side));
}

pub fn audio_events(world: &World) -> Vec<AudioEvent> {
    world
        .resource::<Events<AudioEvent>>()
        .iter_current_update_events()
        .copied()
        .collect()
}

pub fn contact_events(world: &World) -> Vec<ContactEvent> {
    world
        .resource::<Events<ContactEvent>>()
        .iter_current_update_events()
        .copied()
        .collect()
}

pub fn player_body(world: &mut World) -> Body {
    *world
        .query_filtered::<&Body, With<PlayerControlled>>()
        .single(world)
        .unwrap()
}

pub fn count<C: bevy_ecs::component::Component>(world: &mut World) -> usize {
    world.query::<&C>().iter(world).count()
}

pub fn entity_count(world: &mut World) -> usize {
    world.query::<Entity>().iter(world).count()
}

/// A game over the given layouts, with the stock riddles.
pub fn create_game(levels: &[&[&str]]) -> Game {
    let config = GameConfig {
        levels: levels.iter().map(|rows| layout(rows)).collect(),
        questions: QuestionBank::default(),
        legend: TileLegend::default(),
        muted: false,
    };
    Game::new(config).unwrap()
}

/// Runs `frames` frames holding `held`.
pub fn run_frames(game: &mut Game, frames: usize, held: quiz_platformer::systems::Inputs) {
    for _ in 0..frames {
        let input = game.input_for(held);
        game.tick(DT, input);
    }
}

/// Runs frames with nothing held until the player is grounded.
pub fn settle(game: &mut Game) {
    for _ in 0..120 {
        if player_body(&mut game.world).grounded {
            return;
        }
        run_frames(game, 1, quiz_platformer::systems::Inputs::empty());
    }
    panic!("player never landed");
}

/// Every cue the game asked for, in order.
#[derive(Clone, Default)]
pub struct RecordingAudio {
    pub played: Arc<Mutex<Vec<(SoundCue, PlayParams)>>>,
    pub stops: Arc<Mutex<usize>>,
}

impl AudioBackend for RecordingAudio {
    fn play(&mut self, cue: SoundCue, params: PlayParams) {
        self.played.lock().unwrap().push((cue, params));
    }

    fn stop_music(&mut self) {
        *self.stops.lock().unwrap() += 1;
    }
}

impl RecordingAudio {
    pub fn cues(&self) -> Vec<SoundCue> {
        self.played.lock().unwrap().iter().map(|(cue, _)| *cue).collect()
    }

    pub fn params_for(&self, cue: SoundCue) -> Vec<PlayParams> {
        self.played
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == cue)
            .map(|(_, params)| *params)
            .collect()
    }
}
