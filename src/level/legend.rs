//! The tile legend: which entity each layout character turns into.

use std::collections::HashMap;

use bevy_ecs::resource::Resource;
use glam::Vec2;
use phf::phf_map;

use crate::constants::{enemy::PATROL_SPEED, tile};
use crate::systems::components::{BodyKind, Tags};

/// The kinds of tile the stock legend knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::EnumIter)]
pub enum TileKind {
    Grass,
    Steel,
    Bag,
    Coin,
    Prize,
    Spike,
    Apple,
    Ghosty,
    Portal,
}

/// Stock mapping of layout characters to tile kinds.
pub static STOCK_TILES: phf::Map<char, TileKind> = phf_map! {
    '=' => TileKind::Grass,
    '-' => TileKind::Steel,
    '0' => TileKind::Bag,
    '$' => TileKind::Coin,
    '%' => TileKind::Prize,
    '^' => TileKind::Spike,
    '#' => TileKind::Apple,
    '>' => TileKind::Ghosty,
    '@' => TileKind::Portal,
};

/// Per-entity update logic attached at spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Patrol { speed: f32, direction: f32 },
}

/// Everything needed to instantiate one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSpec {
    pub sprite: &'static str,
    /// Collider size before scaling; `None` for purely decorative tiles.
    pub collider: Option<Vec2>,
    pub body: Option<BodyKind>,
    /// Added to the cell origin.
    pub offset: Vec2,
    pub tags: Tags,
    pub behavior: Option<Behavior>,
}

impl SpawnSpec {
    /// A static, fully solid tile.
    fn solid(sprite: &'static str, tags: Tags) -> Self {
        Self {
            sprite,
            collider: Some(tile::SIZE),
            body: Some(BodyKind::Static),
            offset: Vec2::ZERO,
            tags,
            behavior: None,
        }
    }
}

impl TileKind {
    pub fn spec(self) -> SpawnSpec {
        match self {
            TileKind::Grass => SpawnSpec::solid("grass", Tags::PLATFORM),
            TileKind::Steel => SpawnSpec::solid("steel", Tags::empty()),
            TileKind::Bag => SpawnSpec::solid("bag", Tags::empty()),
            TileKind::Prize => SpawnSpec::solid("prize", Tags::PRIZE),
            TileKind::Spike => SpawnSpec::solid("spike", Tags::DANGER),
            TileKind::Coin => SpawnSpec {
                body: None,
                offset: Vec2::new(0.0, -9.0),
                ..SpawnSpec::solid("coin", Tags::COIN)
            },
            TileKind::Apple => SpawnSpec {
                body: Some(BodyKind::Dynamic),
                ..SpawnSpec::solid("apple", Tags::APPLE)
            },
            TileKind::Ghosty => SpawnSpec {
                body: Some(BodyKind::Dynamic),
                behavior: Some(Behavior::Patrol {
                    speed: PATROL_SPEED,
                    direction: 1.0,
                }),
                ..SpawnSpec::solid("ghosty", Tags::ENEMY)
            },
            TileKind::Portal => SpawnSpec {
                collider: Some(tile::SIZE * 0.5),
                body: None,
                offset: Vec2::new(0.0, -12.0),
                ..SpawnSpec::solid("portal", Tags::PORTAL)
            },
        }
    }
}

/// Mapping from layout character to spawn specification.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TileLegend {
    specs: HashMap<char, SpawnSpec>,
}

impl Default for TileLegend {
    fn default() -> Self {
        Self {
            specs: STOCK_TILES.entries().map(|(c, kind)| (*c, kind.spec())).collect(),
        }
    }
}

impl TileLegend {
    /// A legend with no entries.
    pub fn empty() -> Self {
        Self { specs: HashMap::new() }
    }

    pub fn get(&self, c: char) -> Option<&SpawnSpec> {
        self.specs.get(&c)
    }

    pub fn contains(&self, c: char) -> bool {
        self.specs.contains_key(&c)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
