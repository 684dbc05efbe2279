use pretty_assertions::assert_eq;
use quiz_platformer::{
    constants::{audio::MUSIC_VOLUME, player, LEVELS},
    game::{Game, GameConfig},
    level::TileLegend,
    systems::{Inputs, Label, PlayerAnimation, QuestionBank, Scene, SoundCue, TileCell},
};
use speculoos::prelude::*;

mod common;

const PORTAL: &[&str] = &["  @       ", "=========="];
const COIN_THEN_PORTAL: &[&str] = &["  $ @     ", "=========="];
const COINS: &[&str] = &["  $ $     ", "=========="];
const SPIKE: &[&str] = &["   ^      ", "=========="];
const VOID: &[&str] = &["     "];
const PORTAL_BESIDE_COIN: &[&str] = &["@$   ", "====="];

fn walk_into_portal(game: &mut Game) {
    for _ in 0..60 {
        if game.quiz().is_open() {
            return;
        }
        common::run_frames(game, 1, Inputs::RIGHT);
    }
    panic!("portal never reached");
}

fn answer(game: &mut Game, correct: bool) {
    let level_id = game.quiz().0.expect("question should be open").level_id;
    let bank = QuestionBank::default();
    let question = bank.select(level_id);
    let index = question
        .choices
        .iter()
        .position(|choice| question.is_correct(choice) == correct)
        .unwrap();

    let input = game.input_for(Inputs::empty()).with_choice(index);
    game.tick(common::DT, input);
}

#[test]
fn test_new_game_starts_on_first_level() {
    let mut game = common::create_game(&[common::FLAT]);

    assert_eq!(game.scene(), Scene::START);
    assert_that(&game.coins()).is_equal_to(0);
    assert_that(&common::entity_count(&mut game.world)).is_equal_to(10 + 1);
}

#[test]
fn test_config_without_levels_rejected() {
    let config = GameConfig {
        levels: Vec::new(),
        questions: QuestionBank::default(),
        legend: TileLegend::default(),
        muted: false,
    };
    assert_that(&Game::new(config).is_err()).is_true();
}

#[test]
fn test_stock_game_spawns_every_known_tile() {
    let config = GameConfig::stock().unwrap();
    assert_that(&config.levels.len()).is_equal_to(LEVELS.len());

    let legend = TileLegend::default();
    let expected = config.levels[0].cells().filter(|(_, c)| legend.contains(*c)).count();

    let mut game = Game::new(config).unwrap();
    assert_that(&common::count::<TileCell>(&mut game.world)).is_equal_to(expected);
}

#[test]
fn test_run_left_scenario() {
    let mut game = common::create_game(&[common::FLAT]);
    common::settle(&mut game);
    let start = game.player_position().unwrap().x;

    common::run_frames(&mut game, 3, Inputs::LEFT);

    let x = game.player_position().unwrap().x;
    let expected = start - 3.0 * player::MOVE_SPEED * common::DT;
    assert_that(&(x - expected).abs()).is_less_than(1e-3);

    let state = game.player_state().unwrap();
    assert_that(&state.flip_x).is_true();
    assert_eq!(state.animation, PlayerAnimation::Running);
    assert_that(&common::player_body(&mut game.world).grounded).is_true();

    common::run_frames(&mut game, 1, Inputs::empty());
    assert_eq!(game.player_state().unwrap().animation, PlayerAnimation::Idle);
}

#[test]
fn test_coin_scenario() {
    let mut game = common::create_game(&[COINS]);
    let audio = common::RecordingAudio::default();
    game.set_audio_backend(Box::new(audio.clone()));

    let mut seen = Vec::new();
    for _ in 0..40 {
        common::run_frames(&mut game, 1, Inputs::RIGHT);
        seen.push(game.coins());
    }

    assert_that(&game.coins()).is_equal_to(2);
    assert_that(&seen.windows(2).all(|pair| pair[0] <= pair[1])).is_true();
    assert_that(&common::count::<TileCell>(&mut game.world)).is_equal_to(10);

    let music = audio.params_for(SoundCue::BgSound);
    assert_that(&music).has_length(1);
    assert_that(&music[0].looping).is_true();
    assert_eq!(music[0].volume, MUSIC_VOLUME);

    let coins = audio.params_for(SoundCue::Coin);
    assert_that(&coins).has_length(2);
    assert_eq!(coins[0].detune, 0.0);
    assert_that(&coins[1].detune).is_greater_than(0.0);
    assert_that(&coins[1].detune).is_less_than(100.0);
}

#[test]
fn test_spike_scenario() {
    let mut game = common::create_game(&[SPIKE]);
    let audio = common::RecordingAudio::default();
    game.set_audio_backend(Box::new(audio.clone()));

    for _ in 0..40 {
        if game.scene() == Scene::Lost {
            break;
        }
        common::run_frames(&mut game, 1, Inputs::RIGHT);
    }

    assert_eq!(game.scene(), Scene::Lost);
    assert_that(&audio.cues().contains(&SoundCue::Hit)).is_true();
}

#[test]
fn test_fall_death_then_restart() {
    let mut game = common::create_game(&[VOID]);
    let audio = common::RecordingAudio::default();
    game.set_audio_backend(Box::new(audio.clone()));

    common::run_frames(&mut game, 100, Inputs::empty());

    assert_eq!(game.scene(), Scene::Lost);
    let labels: Vec<String> = game
        .world
        .query::<&Label>()
        .iter(&game.world)
        .map(|label| label.text.clone())
        .collect();
    assert_eq!(labels, vec!["You Lose".to_string()]);
    assert_that(&common::entity_count(&mut game.world)).is_equal_to(1);
    assert_that(&*audio.stops.lock().unwrap()).is_greater_than_or_equal_to(1);

    // Nothing happens until something is pressed
    common::run_frames(&mut game, 5, Inputs::empty());
    assert_eq!(game.scene(), Scene::Lost);

    common::run_frames(&mut game, 1, Inputs::JUMP);
    assert_eq!(game.scene(), Scene::START);
    assert_that(&game.coins()).is_equal_to(0);
    assert_that(&game.player_position().is_some()).is_true();
}

#[test]
fn test_portal_suspends_play() {
    let mut game = common::create_game(&[PORTAL, PORTAL]);
    walk_into_portal(&mut game);

    let position = game.player_position().unwrap();
    common::run_frames(&mut game, 10, Inputs::RIGHT);

    assert_eq!(game.player_position().unwrap(), position);
    assert_that(&common::count::<Label>(&mut game.world)).is_equal_to(1);
    assert_eq!(game.scene(), Scene::START);
}

#[test]
fn test_correct_answers_advance_then_win() {
    let mut game = common::create_game(&[PORTAL, PORTAL]);

    walk_into_portal(&mut game);
    answer(&mut game, true);

    assert_eq!(game.scene(), Scene::Playing { level_id: 1, coins: 0 });
    assert_that(&game.quiz().is_open()).is_false();
    // Floor, portal and player; nothing from the first level or the question survives
    assert_that(&common::entity_count(&mut game.world)).is_equal_to(12);

    walk_into_portal(&mut game);
    answer(&mut game, true);

    assert_eq!(game.scene(), Scene::Won);
    let labels: Vec<String> = game
        .world
        .query::<&Label>()
        .iter(&game.world)
        .map(|label| label.text.clone())
        .collect();
    assert_eq!(labels, vec!["You Win".to_string()]);
}

#[test]
fn test_wrong_answer_retries_with_coins() {
    let mut game = common::create_game(&[COIN_THEN_PORTAL, PORTAL]);

    walk_into_portal(&mut game);
    assert_that(&game.coins()).is_equal_to(1);
    answer(&mut game, false);

    assert_eq!(game.scene(), Scene::Playing { level_id: 0, coins: 1 });
    assert_that(&game.coins()).is_equal_to(1);
    // The coin is back, but the count carried over
    assert_that(&common::count::<TileCell>(&mut game.world)).is_equal_to(12);

    walk_into_portal(&mut game);
    assert_that(&game.coins()).is_equal_to(2);
    answer(&mut game, true);
    assert_eq!(game.scene(), Scene::Playing { level_id: 1, coins: 2 });
}

#[test]
fn test_coin_taken_with_portal_survives_retry() {
    let mut game = common::create_game(&[PORTAL_BESIDE_COIN, PORTAL_BESIDE_COIN]);

    // The player spawns touching both the portal and the coin
    common::run_frames(&mut game, 1, Inputs::empty());
    assert_that(&game.quiz().is_open()).is_true();
    assert_that(&game.coins()).is_equal_to(1);

    answer(&mut game, false);

    assert_eq!(game.scene(), Scene::Playing { level_id: 0, coins: 1 });
    assert_that(&game.coins()).is_equal_to(1);
}
