//! Quiz platformer simulation library crate.

pub mod app;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod level;
pub mod systems;
