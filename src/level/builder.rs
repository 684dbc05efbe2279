//! Instantiation of level entities from layouts and legends.

use bevy_ecs::{entity::Entity, resource::Resource, system::Commands};
use glam::{IVec2, Vec2};
use tracing::debug;

use crate::constants::tile;
use crate::error::LevelError;
use crate::level::legend::{Behavior, TileLegend};
use crate::level::parser::{LevelLayout, LevelParser};
use crate::systems::components::{Body, Collider, Position, Scale, Sprite, TileCell};
use crate::systems::patrol::Patrol;

/// The level currently being played.
#[derive(Resource, Debug, Clone)]
pub struct Level {
    pub id: usize,
    pub layout: LevelLayout,
    pub legend: TileLegend,
}

/// Every level in play order.
#[derive(Resource, Debug, Clone)]
pub struct Levels(pub Vec<LevelLayout>);

impl Levels {
    pub fn get(&self, id: usize) -> Result<&LevelLayout, LevelError> {
        self.0.get(id).ok_or(LevelError::LevelNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a level follows `id`.
    pub fn has_next(&self, id: usize) -> bool {
        id + 1 < self.0.len()
    }
}

/// World-space origin of a grid cell.
pub fn cell_origin(cell: IVec2) -> Vec2 {
    Vec2::new(cell.x as f32 * tile::WIDTH, cell.y as f32 * tile::HEIGHT)
}

/// Spawns a single tile at `cell` using the legend entry for `tile`.
///
/// # Errors
///
/// Returns [`LevelError::UnknownTile`] if the legend has no entry for `tile`.
/// Callers treat that as a broken invariant, not a gameplay condition.
pub fn spawn_tile(commands: &mut Commands, legend: &TileLegend, tile: char, cell: IVec2) -> Result<Entity, LevelError> {
    let spec = legend.get(tile).ok_or(LevelError::UnknownTile(tile))?;

    let mut entity = commands.spawn((
        TileCell(cell),
        Position(cell_origin(cell) + spec.offset),
        Scale::default(),
        Sprite(spec.sprite),
        spec.tags,
    ));

    if let Some(size) = spec.collider {
        entity.insert(Collider::new(size));
    }
    if let Some(kind) = spec.body {
        entity.insert(Body::new(kind));
    }
    if let Some(Behavior::Patrol { speed, direction }) = spec.behavior {
        entity.insert(Patrol::new(speed, direction));
    }

    Ok(entity.id())
}

/// Spawns every recognized tile of `layout`, returning how many were created.
pub fn spawn_level(commands: &mut Commands, layout: &LevelLayout, legend: &TileLegend) -> usize {
    let placements = LevelParser::parse(layout, legend);
    for placement in &placements {
        // The parser only yields characters present in the legend.
        if let Err(e) = spawn_tile(commands, legend, placement.tile, placement.cell) {
            debug_assert!(false, "parser yielded an unmapped tile: {e}");
        }
    }

    debug!(
        width = layout.width(),
        height = layout.height(),
        entities = placements.len(),
        "Level spawned"
    );
    placements.len()
}
