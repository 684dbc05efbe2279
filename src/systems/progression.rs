//! The trivia gate between levels.

use bevy_ecs::{
    resource::Resource,
    system::{Commands, Res, ResMut},
};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::{
    constants::{ui, QUESTIONS, SCREEN_SIZE},
    error::GameError,
    level::Levels,
    systems::{
        components::{ChoiceButton, Coins, Label, Position},
        input::InputSnapshot,
        scene::{PendingScene, Scene},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    /// Shown top to bottom in this order.
    pub choices: SmallVec<[String; 3]>,
    pub correct: String,
}

impl Question {
    pub fn new(prompt: &str, choices: &[&str], correct: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct: correct.to_string(),
        }
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct == choice
    }
}

/// Non-empty list of questions, one asked per portal.
#[derive(Resource, Debug, Clone)]
pub struct QuestionBank(Vec<Question>);

impl Default for QuestionBank {
    fn default() -> Self {
        Self(
            QUESTIONS
                .iter()
                .map(|(prompt, choices, correct)| Question::new(prompt, choices, correct))
                .collect(),
        )
    }
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, GameError> {
        if questions.is_empty() {
            return Err(GameError::InvalidState("question bank must not be empty".to_string()));
        }
        Ok(Self(questions))
    }

    pub fn index_for(&self, level_id: usize) -> usize {
        level_id % self.0.len()
    }

    /// The question asked after `level_id`, wrapping around the bank.
    pub fn select(&self, level_id: usize) -> &Question {
        &self.0[self.index_for(level_id)]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A question on screen, waiting for an answer.
///
/// The coin count is read when the answer comes in, so pickups later in the
/// frame that opened the gate still carry over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenGate {
    pub level_id: usize,
    pub question: usize,
}

/// Whether gameplay is suspended behind a question.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizState(pub Option<OpenGate>);

impl QuizState {
    pub fn is_open(&self) -> bool {
        self.0.is_some()
    }
}

/// Where an answer leads.
pub fn resolve_answer(level_id: usize, coins: u32, question: &Question, choice: &str, levels: &Levels) -> Scene {
    if !question.is_correct(choice) {
        return Scene::Playing { level_id, coins };
    }
    if levels.has_next(level_id) {
        Scene::Playing {
            level_id: level_id + 1,
            coins,
        }
    } else {
        Scene::Won
    }
}

/// Suspends play and puts the question for `level_id` on screen.
pub fn open_gate(commands: &mut Commands, quiz: &mut QuizState, bank: &QuestionBank, level_id: usize) {
    if quiz.is_open() {
        return;
    }

    let index = bank.index_for(level_id);
    let question = bank.select(level_id);
    *quiz = QuizState(Some(OpenGate {
        level_id,
        question: index,
    }));

    let center_x = SCREEN_SIZE.x * 0.5;
    commands.spawn((
        Label {
            text: question.prompt.clone(),
        },
        Position(Vec2::new(center_x, ui::PROMPT_Y)),
    ));
    for (i, choice) in question.choices.iter().enumerate() {
        commands.spawn((
            ChoiceButton {
                index: i,
                text: choice.clone(),
            },
            Position(Vec2::new(center_x, ui::FIRST_CHOICE_Y + i as f32 * ui::CHOICE_SPACING)),
        ));
    }

    info!(level_id, question = index, "Progression gate opened");
}

/// Waits for a choice and requests the scene it leads to.
pub fn quiz_system(
    input: Res<InputSnapshot>,
    quiz: Res<QuizState>,
    bank: Res<QuestionBank>,
    levels: Res<Levels>,
    coins: Res<Coins>,
    mut pending: ResMut<PendingScene>,
) {
    let (Some(gate), Some(choice)) = (quiz.0, input.choice) else {
        return;
    };

    let question = bank.select(gate.level_id);
    let Some(answer) = question.choices.get(choice) else {
        warn!(choice, "Choice index out of range");
        return;
    };

    let next = resolve_answer(gate.level_id, coins.0, question, answer, &levels);
    debug!(answer = %answer, correct = question.is_correct(answer), ?next, "Question answered");
    pending.request(next);
}
