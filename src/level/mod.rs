//! Level decoding and instantiation.

pub mod builder;
pub mod legend;
pub mod parser;

pub use builder::{cell_origin, spawn_level, spawn_tile, Level, Levels};
pub use legend::{Behavior, SpawnSpec, TileKind, TileLegend};
pub use parser::{LevelLayout, LevelParser, TilePlacement};
