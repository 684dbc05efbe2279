use bevy_ecs::{entity::Entity, system::RunSystemOnce, world::World};
use glam::Vec2;
use pretty_assertions::assert_eq;
use quiz_platformer::{
    constants::player,
    systems::{
        display_toggle_system, player_bounds_system, player_input_system, player_landing_system, Body, Camera,
        DisplayState, InputSnapshot, Inputs, PendingScene, PlayerAnimation, PlayerState, Position, Scale, Scene,
    },
};
use speculoos::prelude::*;

mod common;

fn grounded_player(world: &mut World) -> Entity {
    let player = common::spawn_test_player(world);
    world.get_mut::<Body>(player).unwrap().grounded = true;
    player
}

fn press(world: &mut World, held: Inputs) {
    let next = world.resource::<InputSnapshot>().next(held);
    world.insert_resource(next);
    world.run_system_once(player_input_system).expect("System should run successfully");
}

#[test]
fn test_spawn_defaults() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    assert_eq!(world.get::<Position>(player).unwrap().0, Vec2::new(10.0, 10.0));
    assert_eq!(world.get::<Scale>(player).unwrap().0, 2.5);
    assert_eq!(*world.get::<PlayerState>(player).unwrap(), PlayerState::default());
}

#[test]
fn test_jump_requires_ground() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    press(&mut world, Inputs::JUMP);
    assert_eq!(world.get::<Body>(player).unwrap().velocity.y, 0.0);

    press(&mut world, Inputs::empty());
    world.get_mut::<Body>(player).unwrap().grounded = true;
    press(&mut world, Inputs::JUMP);

    let body = *world.get::<Body>(player).unwrap();
    assert_eq!(body.velocity.y, -player::JUMP_FORCE);
    assert_that(&body.grounded).is_false();
    assert_eq!(world.get::<PlayerState>(player).unwrap().animation, PlayerAnimation::Jumping);
}

#[test]
fn test_held_jump_does_not_repeat() {
    let mut world = common::create_test_world();
    let player = grounded_player(&mut world);

    press(&mut world, Inputs::JUMP);
    {
        let mut body = world.get_mut::<Body>(player).unwrap();
        body.velocity.y = 0.0;
        body.grounded = true;
    }
    press(&mut world, Inputs::JUMP);
    assert_eq!(world.get::<Body>(player).unwrap().velocity.y, 0.0);
}

#[test]
fn test_gamepad_jump_keeps_animation() {
    let mut world = common::create_test_world();
    let player = grounded_player(&mut world);

    press(&mut world, Inputs::GAMEPAD_SOUTH);

    assert_eq!(world.get::<Body>(player).unwrap().velocity.y, -player::JUMP_FORCE);
    assert_eq!(world.get::<PlayerState>(player).unwrap().animation, PlayerAnimation::Idle);
}

#[test]
fn test_run_left_then_release() {
    let mut world = common::create_test_world();
    let player = grounded_player(&mut world);
    let start = world.get::<Position>(player).unwrap().0.x;

    press(&mut world, Inputs::LEFT);
    press(&mut world, Inputs::LEFT);

    let x = world.get::<Position>(player).unwrap().0.x;
    assert_that(&(start - x - 2.0 * player::MOVE_SPEED * common::DT).abs()).is_less_than(1e-3);
    let state = *world.get::<PlayerState>(player).unwrap();
    assert_that(&state.flip_x).is_true();
    assert_eq!(state.animation, PlayerAnimation::Running);

    press(&mut world, Inputs::empty());
    assert_eq!(world.get::<PlayerState>(player).unwrap().animation, PlayerAnimation::Idle);
}

#[test]
fn test_airborne_movement_keeps_animation() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    press(&mut world, Inputs::RIGHT);

    let state = *world.get::<PlayerState>(player).unwrap();
    assert_that(&state.flip_x).is_false();
    assert_eq!(state.animation, PlayerAnimation::Idle);
    assert_that(&world.get::<Position>(player).unwrap().0.x).is_greater_than(10.0);
}

#[test]
fn test_stick_moves_proportionally() {
    let mut world = common::create_test_world();
    let player = grounded_player(&mut world);

    world.insert_resource(InputSnapshot::default().with_stick(Vec2::new(0.5, 0.0)));
    world.run_system_once(player_input_system).unwrap();

    let x = world.get::<Position>(player).unwrap().0.x;
    let expected = 10.0 + 0.5 * player::MOVE_SPEED * common::DT;
    assert_that(&(x - expected).abs()).is_less_than(1e-3);
}

#[test]
fn test_fast_fall_weight() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    press(&mut world, Inputs::FAST_FALL);
    assert_eq!(world.get::<Body>(player).unwrap().weight, player::FAST_FALL_WEIGHT);

    press(&mut world, Inputs::empty());
    assert_eq!(world.get::<Body>(player).unwrap().weight, 1.0);
}

#[test]
fn test_landing_picks_animation() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);
    world.get_mut::<PlayerState>(player).unwrap().animation = PlayerAnimation::Jumping;
    world.get_mut::<Body>(player).unwrap().just_landed = true;

    world.insert_resource(InputSnapshot::default().next(Inputs::RIGHT));
    world.run_system_once(player_landing_system).unwrap();
    assert_eq!(world.get::<PlayerState>(player).unwrap().animation, PlayerAnimation::Running);

    world.get_mut::<PlayerState>(player).unwrap().animation = PlayerAnimation::Jumping;
    world.insert_resource(InputSnapshot::default());
    world.run_system_once(player_landing_system).unwrap();
    assert_eq!(world.get::<PlayerState>(player).unwrap().animation, PlayerAnimation::Idle);
}

#[test]
fn test_fall_death() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world);

    world.run_system_once(player_bounds_system).unwrap();
    assert_eq!(world.resource::<PendingScene>().peek(), None);
    assert_eq!(world.resource::<Camera>().center, Vec2::new(10.0, 10.0));

    world.get_mut::<Position>(player).unwrap().0.y = player::FALL_DEATH + 1.0;
    world.run_system_once(player_bounds_system).unwrap();
    assert_eq!(world.resource::<PendingScene>().peek(), Some(Scene::Lost));
}

#[test]
fn test_fullscreen_toggle() {
    let mut world = common::create_test_world();

    world.insert_resource(InputSnapshot::default().next(Inputs::FULLSCREEN));
    world.run_system_once(display_toggle_system).unwrap();
    assert_that(&world.resource::<DisplayState>().fullscreen).is_true();

    // Holding the key doesn't toggle again
    let held = world.resource::<InputSnapshot>().next(Inputs::FULLSCREEN);
    world.insert_resource(held);
    world.run_system_once(display_toggle_system).unwrap();
    assert_that(&world.resource::<DisplayState>().fullscreen).is_true();
}
