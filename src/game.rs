//! This module contains the main game logic and state.

use bevy_ecs::event::{EventReader, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use glam::Vec2;
use tracing::{debug, info, warn};

use crate::constants::LEVELS;
use crate::error::{GameError, GameResult};
use crate::events::ContactEvent;
use crate::level::{LevelLayout, Levels, TileLegend};
use crate::systems::{
    self, audio_system, coin_pitch_system, collision_system, display_toggle_system, growth_system, patrol_bounce_system,
    patrol_system, physics_system, player_bounds_system, player_input_system, player_landing_system, quiz_system,
    restart_system, scene_transition_system, time_to_live_system, ActiveContacts, AudioBackend, AudioEvent, AudioResource,
    AudioState, Camera, CoinPitch, Coins, CurrentScene, DeltaTime, DisplayState, InputSnapshot, Inputs, PendingScene,
    PlayerControlled, PlayerState, Position, QuestionBank, QuizState, Scene,
};

/// Ordered stages of a single frame.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum FrameSet {
    /// Player input and display toggles
    Input,
    /// Behaviours, timers and the physics step
    Update,
    /// Reactions to this step's contacts
    Respond,
    /// Question and restart prompts
    Menu,
    /// Audio and error reporting
    Present,
    /// Scene switches, applied last so the frame sees a consistent world
    Transition,
}

/// Everything needed to start a session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub levels: Vec<LevelLayout>,
    pub questions: QuestionBank,
    pub legend: TileLegend,
    pub muted: bool,
}

impl GameConfig {
    /// The five stock levels, riddles and tiles.
    pub fn stock() -> GameResult<Self> {
        let levels = LEVELS
            .iter()
            .map(|rows| LevelLayout::new(*rows))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            levels,
            questions: QuestionBank::default(),
            legend: TileLegend::default(),
            muted: false,
        })
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// Owns the world and the per-frame schedule. The host feeds it one
/// [`InputSnapshot`] and a delta time per frame.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds the world and enters the first level.
    ///
    /// # Errors
    ///
    /// Returns `GameError` when the configuration has no levels or the first
    /// level cannot be entered.
    pub fn new(config: GameConfig) -> GameResult<Game> {
        info!(levels = config.levels.len(), questions = config.questions.len(), "Starting game initialization");
        if config.levels.is_empty() {
            return Err(GameError::InvalidState("at least one level is required".to_string()));
        }

        let mut world = World::default();
        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, config);

        let mut schedule = Schedule::default();
        Self::configure_schedule(&mut schedule);

        systems::scene::enter(&mut world, Scene::START)?;
        debug!("Game initialized");

        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        world.init_resource::<Events<GameError>>();
        world.init_resource::<Events<ContactEvent>>();
        world.init_resource::<Events<AudioEvent>>();
    }

    fn insert_resources(world: &mut World, config: GameConfig) {
        world.insert_resource(Levels(config.levels));
        world.insert_resource(config.questions);
        world.insert_resource(config.legend);
        world.insert_resource(AudioState {
            muted: config.muted,
            ..Default::default()
        });
        world.insert_resource(AudioResource::default());
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(InputSnapshot::default());
        world.insert_resource(DisplayState::default());
        world.insert_resource(Camera::default());
        world.insert_resource(Coins::default());
        world.insert_resource(CoinPitch::default());
        world.insert_resource(QuizState::default());
        world.insert_resource(PendingScene::default());
        world.insert_resource(ActiveContacts::default());
        world.insert_resource(CurrentScene(Scene::START));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (display_toggle_system, player_input_system).chain().in_set(FrameSet::Input),
                (
                    patrol_system,
                    growth_system,
                    time_to_live_system,
                    coin_pitch_system,
                    physics_system,
                )
                    .chain()
                    .in_set(FrameSet::Update),
                (
                    patrol_bounce_system,
                    player_landing_system,
                    collision_system,
                    player_bounds_system,
                )
                    .chain()
                    .in_set(FrameSet::Respond),
                (
                    quiz_system.run_if(|quiz: Res<QuizState>| quiz.is_open()),
                    restart_system.run_if(|scene: Res<CurrentScene>| !scene.0.is_playing()),
                )
                    .chain()
                    .in_set(FrameSet::Menu),
                (audio_system, log_errors_system).chain().in_set(FrameSet::Present),
                scene_transition_system.in_set(FrameSet::Transition),
            ))
            .configure_sets(
                (
                    FrameSet::Input.run_if(gameplay_active),
                    FrameSet::Update.run_if(gameplay_active),
                    FrameSet::Respond.run_if(gameplay_active),
                    FrameSet::Menu,
                    FrameSet::Present,
                    FrameSet::Transition,
                )
                    .chain(),
            );
    }

    /// Replaces the audio backend, e.g. with a real mixer.
    pub fn set_audio_backend(&mut self, backend: Box<dyn AudioBackend>) {
        self.world.insert_resource(AudioResource(backend));
    }

    /// The snapshot for a frame where exactly `held` is held, with edges
    /// computed against the previous frame.
    pub fn input_for(&self, held: Inputs) -> InputSnapshot {
        self.world.resource::<InputSnapshot>().next(held)
    }

    /// Executes one frame of game logic by running all scheduled ECS systems.
    ///
    /// # Arguments
    ///
    /// * `dt` - Frame delta time in seconds
    /// * `input` - What the player did this frame
    pub fn tick(&mut self, dt: f32, input: InputSnapshot) {
        self.update_events();
        self.world.insert_resource(DeltaTime(dt));
        self.world.insert_resource(input);

        self.schedule.run(&mut self.world);
    }

    /// Ages every event queue by one frame.
    fn update_events(&mut self) {
        self.world.resource_mut::<Events<GameError>>().update();
        self.world.resource_mut::<Events<ContactEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();
    }

    pub fn scene(&self) -> Scene {
        self.world.resource::<CurrentScene>().0
    }

    pub fn coins(&self) -> u32 {
        self.world.resource::<Coins>().0
    }

    pub fn quiz(&self) -> QuizState {
        *self.world.resource::<QuizState>()
    }

    pub fn player_position(&mut self) -> Option<Vec2> {
        self.world
            .query_filtered::<&Position, With<PlayerControlled>>()
            .iter(&self.world)
            .next()
            .map(|p| p.0)
    }

    pub fn player_state(&mut self) -> Option<PlayerState> {
        self.world
            .query_filtered::<&PlayerState, With<PlayerControlled>>()
            .iter(&self.world)
            .next()
            .copied()
    }
}

/// Gameplay only advances while a level is on screen and no question is open.
fn gameplay_active(scene: Res<CurrentScene>, quiz: Res<QuizState>) -> bool {
    scene.0.is_playing() && !quiz.is_open()
}

/// Reports the non-fatal errors systems raised this frame.
fn log_errors_system(mut errors: EventReader<GameError>) {
    for error in errors.read() {
        warn!(%error, "Game error");
    }
}
