use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::constants::LOOP_TIME;
use crate::error::GameResult;
use crate::formatter;
use crate::game::{Game, GameConfig};
use crate::systems::{InputSnapshot, Inputs, Scene};

/// Holds `held` for `frames` frames, optionally clicking a quiz choice on the first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub frames: u32,
    pub held: Inputs,
    pub choice: Option<usize>,
}

impl ScriptStep {
    pub fn hold(held: Inputs, frames: u32) -> Self {
        Self {
            frames,
            held,
            choice: None,
        }
    }

    pub fn wait(frames: u32) -> Self {
        Self::hold(Inputs::empty(), frames)
    }

    pub fn choose(index: usize) -> Self {
        Self {
            frames: 1,
            held: Inputs::empty(),
            choice: Some(index),
        }
    }
}

/// Replays a fixed list of steps in place of a keyboard.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: VecDeque<ScriptStep>,
    /// Frames already spent on the front step.
    elapsed: u32,
}

impl ScriptedInput {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            elapsed: 0,
        }
    }

    /// A short run through the first level: walk, jump, fast-fall, then idle.
    pub fn demo() -> Self {
        Self::new([
            ScriptStep::wait(30),
            ScriptStep::hold(Inputs::RIGHT, 45),
            ScriptStep::hold(Inputs::RIGHT | Inputs::JUMP, 10),
            ScriptStep::hold(Inputs::RIGHT | Inputs::FAST_FALL, 30),
            ScriptStep::hold(Inputs::LEFT, 20),
            ScriptStep::wait(60),
        ])
    }

    /// The snapshot for the next frame, or `None` once the script has run out.
    pub fn next_frame(&mut self, previous: &InputSnapshot) -> Option<InputSnapshot> {
        while self.steps.front().is_some_and(|step| self.elapsed >= step.frames) {
            self.steps.pop_front();
            self.elapsed = 0;
        }
        let step = *self.steps.front()?;

        let mut snapshot = previous.next(step.held);
        if self.elapsed == 0 {
            if let Some(choice) = step.choice {
                snapshot = snapshot.with_choice(choice);
            }
        }
        self.elapsed += 1;
        Some(snapshot)
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Headless host: paces frames at [`LOOP_TIME`] and feeds scripted input.
pub struct App {
    pub game: Game,
    input: ScriptedInput,
    last_tick: Instant,
}

impl App {
    pub fn new(config: GameConfig, input: ScriptedInput) -> GameResult<Self> {
        let game = Game::new(config)?;
        info!("Application initialization completed successfully");
        Ok(App {
            game,
            input,
            last_tick: Instant::now(),
        })
    }

    /// Executes a single frame, then sleeps off whatever is left of the frame budget.
    ///
    /// # Returns
    ///
    /// `true` while the script has input left, `false` once it is exhausted.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        let previous = *self.game.world.resource::<InputSnapshot>();
        let Some(snapshot) = self.input.next_frame(&previous) else {
            info!(scene = ?self.game.scene(), coins = self.game.coins(), "Input script finished");
            return false;
        };

        formatter::increment_frame();
        let before = self.game.scene();
        self.game.tick(dt, snapshot);
        if self.game.scene() != before {
            debug!(from = ?before, to = ?self.game.scene(), "Scene changed");
        }

        let elapsed = start.elapsed();
        if elapsed < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(elapsed);
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        } else {
            warn!(behind = ?(elapsed - LOOP_TIME), "Game loop behind schedule");
        }

        true
    }

    pub fn scene(&self) -> Scene {
        self.game.scene()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_holds_each_step() {
        let mut script = ScriptedInput::new([ScriptStep::hold(Inputs::RIGHT, 2), ScriptStep::wait(1)]);
        let first = script.next_frame(&InputSnapshot::default()).unwrap();
        assert!(first.just_pressed(Inputs::RIGHT));
        let second = script.next_frame(&first).unwrap();
        assert!(second.is_held(Inputs::RIGHT) && !second.just_pressed(Inputs::RIGHT));
        let third = script.next_frame(&second).unwrap();
        assert!(third.just_released(Inputs::RIGHT));
        assert!(script.next_frame(&third).is_none());
        assert!(script.is_finished());
    }

    #[test]
    fn test_choice_only_on_first_frame() {
        let mut script = ScriptedInput::new([ScriptStep {
            frames: 2,
            held: Inputs::empty(),
            choice: Some(1),
        }]);
        let first = script.next_frame(&InputSnapshot::default()).unwrap();
        assert_eq!(first.choice, Some(1));
        assert_eq!(script.next_frame(&first).unwrap().choice, None);
    }
}
