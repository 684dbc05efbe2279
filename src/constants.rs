//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::Vec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Grid geometry of a level.
pub mod tile {
    use glam::Vec2;

    /// Width of a single level cell, in pixels.
    pub const WIDTH: f32 = 64.0;
    /// Height of a single level cell, in pixels.
    pub const HEIGHT: f32 = 64.0;
    /// The size of a cell as a vector.
    pub const SIZE: Vec2 = Vec2::new(WIDTH, HEIGHT);
}

pub mod physics {
    /// Downward acceleration applied to every dynamic body, in pixels/s².
    pub const GRAVITY: f32 = 3200.0;
    /// Impulse applied by a plain `jump()` with no explicit force (used for apples).
    pub const DEFAULT_JUMP_FORCE: f32 = 640.0;
}

pub mod player {
    use glam::Vec2;

    /// Upward impulse of a regular jump.
    pub const JUMP_FORCE: f32 = 1320.0;
    /// Horizontal speed while a direction is held, in pixels/s.
    pub const MOVE_SPEED: f32 = 480.0;
    /// Falling below this vertical position loses the game.
    pub const FALL_DEATH: f32 = 2400.0;
    /// Multiplier on `JUMP_FORCE` when bouncing off a stomped enemy.
    pub const STOMP_BOUNCE: f32 = 1.5;
    /// Fall weight while the fast-fall input is held.
    pub const FAST_FALL_WEIGHT: f32 = 3.0;
    /// Where the player spawns when a level starts.
    pub const SPAWN: Vec2 = Vec2::new(10.0, 10.0);
    /// Scale the player spawns with; eases down to the growth baseline.
    pub const SPAWN_SCALE: f32 = 2.5;
    /// Unscaled collider of the player sprite.
    pub const SIZE: Vec2 = Vec2::new(24.0, 24.0);
}

pub mod enemy {
    /// Horizontal speed of a patrolling enemy.
    pub const PATROL_SPEED: f32 = 60.0;
}

pub mod growth {
    /// Resting scale of anything with a growth behaviour.
    pub const BASE_SCALE: f32 = 2.0;
    /// Scale reached after eating an apple.
    pub const POWER_UP_SCALE: f32 = 2.5;
    /// How long an apple keeps the player big, in seconds.
    pub const POWER_UP_DURATION: f32 = 3.0;
    /// Exponential easing rate of the displayed scale, per second.
    pub const EASE_RATE: f32 = 6.0;
}

pub mod audio {
    /// Detune added to the coin cue per pickup.
    pub const COIN_PITCH_STEP: f32 = 100.0;
    /// Detune removed from the accumulator per second.
    pub const COIN_PITCH_DECAY: f32 = 100.0;
    /// Volume of the looping background track.
    pub const MUSIC_VOLUME: f32 = 0.5;
}

pub mod effect {
    /// Lifetime of the explosion left behind by a stomped enemy, in seconds.
    pub const KABOOM_SECONDS: f32 = 0.5;
}

pub mod ui {
    /// Vertical position of the question prompt.
    pub const PROMPT_Y: f32 = 50.0;
    /// Vertical position of the first choice button.
    pub const FIRST_CHOICE_Y: f32 = 150.0;
    /// Vertical spacing between choice buttons.
    pub const CHOICE_SPACING: f32 = 50.0;
}

/// Logical size of the screen, used to place fixed UI.
pub const SCREEN_SIZE: Vec2 = Vec2::new(1280.0, 720.0);

/// The stock level layouts, top row first.
pub const LEVELS: [&[&str]; 5] = [
    &[
        "                  ",
        "     $      $     ",
        "   --        --   ",
        "       $$         ",
        " %     ===   ===  ",
        "   ^^  >      =   ",
        "=======   ======  ",
        "                  ",
        "      0           ",
        "   --    ^^    @  ",
        "==================",
    ],
    &[
        "                          $",
        "                          $",
        "                          $",
        "        ^^                $",
        "           $$             $",
        "       ===          ===   $",
        "  %   ====     =       =  $",
        "       ^^         =    =  $",
        "                      =    ",
        "       ^^      = >    =   @",
        "===========================",
    ],
    &[
        "     $    $    $    $     $",
        "          ^^               ",
        "   ========    =======     ",
        "       $$                 $",
        "  %    ===  ^^   ===      $",
        "       ===    ===  =   ^^ $",
        "   ^^^>^^^^>^^^^>^^^^>^^^^@",
        "===========================",
    ],
    &[
        "               $           ",
        "              ---          ",
        "            $$             ",
        " %    ===   ===            ",
        "            ^^          >  ",
        "        ===  ===  ==  ^^   ",
        "      ^^          ===  === ",
        "====      ^^     =======   ",
        "      ===   >  ==    @     ",
        "===========================",
    ],
    &[
        "     $    $    $    $    $ ",
        "  ^^     ^^^^       ^^^^   ",
        "======   ===   ========    ",
        "     $$                   $",
        "  %  ===   ===   ^^  ===  $",
        "       ^^    ==   ^^      $",
        "  ^^^^>^^^^^>^^^>^^^>^^^^>@",
        "===========================",
    ],
];

/// The stock riddle bank as `(prompt, choices, correct)`.
pub const QUESTIONS: [(&str, [&str; 3], &str); 5] = [
    ("What has keys but can't open locks?", ["Piano", "Map", "Clock"], "Piano"),
    (
        "What comes once in a minute, twice in a moment, but never in a thousand years?",
        ["The letter M", "Time", "Clock"],
        "The letter M",
    ),
    (
        "I speak without a mouth and hear without ears. What am I?",
        ["Echo", "Radio", "Phone"],
        "Echo",
    ),
    ("What is always coming but never arrives?", ["Tomorrow", "Today", "Yesterday"], "Tomorrow"),
    (
        "What can travel around the world while staying in a corner?",
        ["Stamp", "Airplane", "Sun"],
        "Stamp",
    ),
];
