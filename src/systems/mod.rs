//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod audio;
pub mod collision;
pub mod components;
pub mod growth;
pub mod input;
pub mod lifetime;
pub mod patrol;
pub mod physics;
pub mod player;
pub mod progression;
pub mod scene;

pub use self::audio::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::growth::*;
pub use self::input::*;
pub use self::lifetime::*;
pub use self::patrol::*;
pub use self::physics::*;
pub use self::player::*;
pub use self::progression::*;
pub use self::scene::*;
