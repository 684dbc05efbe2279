//! Decoding of textual level layouts into tile placements.

use glam::IVec2;
use tracing::trace;

use crate::error::LevelError;
use crate::level::legend::TileLegend;

/// A rectangular grid of layout characters, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayout {
    rows: Vec<String>,
}

impl LevelLayout {
    /// Builds a layout from its rows.
    ///
    /// Every row must have the same length; this is a property of level
    /// authoring and only checked in debug builds.
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Result<Self, LevelError> {
        if rows.is_empty() {
            return Err(LevelError::EmptyLayout);
        }

        let rows: Vec<String> = rows.iter().map(|r| r.as_ref().to_string()).collect();
        debug_assert!(
            rows.iter().all(|r| r.chars().count() == rows[0].chars().count()),
            "level rows must all have the same length"
        );

        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows[0].chars().count()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Every cell with its character, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .map(move |(x, c)| (IVec2::new(x as i32, y as i32), c))
        })
    }
}

/// A tile to place at a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub tile: char,
    pub cell: IVec2,
}

/// Parser for converting layouts into tile placements.
pub struct LevelParser;

impl LevelParser {
    /// Returns one placement per cell whose character is in the legend.
    ///
    /// Characters the legend does not know (including spaces) are empty space.
    pub fn parse(layout: &LevelLayout, legend: &TileLegend) -> Vec<TilePlacement> {
        layout
            .cells()
            .filter_map(|(cell, tile)| {
                if legend.contains(tile) {
                    Some(TilePlacement { tile, cell })
                } else {
                    if tile != ' ' {
                        trace!(?cell, tile = %tile, "Skipping unmapped layout character");
                    }
                    None
                }
            })
            .collect()
    }
}
