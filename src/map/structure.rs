//! Enterable structures overlaid on the terrain grid
//!
//! A structure is a tile rectangle whose perimeter is wall except at its
//! entry points. Inserting one stamps walls as `Impassable` and everything
//! else inside as `Interior`.

use serde::{Deserialize, Serialize};

use crate::core::constants::TILE_SIZE;
use crate::core::types::{TileCoord, Vec2};
use crate::terrain::{TerrainCategory, TerrainGrid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub id: String,
    pub name: String,
    /// Top-left corner in tiles
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub entry_points: Vec<TileCoord>,
    /// Ids of agents inside; maintained by the owning game system
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub occupants: Vec<String>,
}

impl Structure {
    pub fn new(id: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        let id = id.into();
        Self {
            name: format!("Building_{}", id),
            id,
            x,
            y,
            width,
            height,
            entry_points: Vec::new(),
            occupants: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_entry_points(mut self, points: &[(i32, i32)]) -> Self {
        self.entry_points = points.iter().map(|&p| TileCoord::from(p)).collect();
        self
    }

    pub fn contains_tile(&self, tile: TileCoord) -> bool {
        tile.x >= self.x
            && tile.x < self.x + self.width
            && tile.y >= self.y
            && tile.y < self.y + self.height
    }

    pub fn is_entry_point(&self, tile: TileCoord) -> bool {
        self.entry_points.contains(&tile)
    }

    fn on_perimeter(&self, tile: TileCoord) -> bool {
        tile.x == self.x
            || tile.x == self.x + self.width - 1
            || tile.y == self.y
            || tile.y == self.y + self.height - 1
    }

    /// Perimeter tile that is not an entry point
    pub fn is_wall_tile(&self, tile: TileCoord) -> bool {
        self.contains_tile(tile) && self.on_perimeter(tile) && !self.is_entry_point(tile)
    }

    /// Contained tile that is not a wall (entry points count as interior)
    pub fn is_interior_tile(&self, tile: TileCoord) -> bool {
        self.contains_tile(tile) && !self.is_wall_tile(tile)
    }

    /// Center of the footprint in pixels
    pub fn center_pixel(&self) -> Vec2 {
        Vec2::new(
            (self.x as f32 + self.width as f32 / 2.0) * TILE_SIZE,
            (self.y as f32 + self.height as f32 / 2.0) * TILE_SIZE,
        )
    }

    /// Every tile of the footprint in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |ty| (self.x..self.x + self.width).map(move |tx| TileCoord::new(tx, ty)))
    }

    /// Whether the footprint and all entry points fit inside the grid
    pub fn fits_within(&self, grid: &TerrainGrid) -> bool {
        self.width > 0
            && self.height > 0
            && grid.in_bounds(TileCoord::new(self.x, self.y))
            && grid.in_bounds(TileCoord::new(self.x + self.width - 1, self.y + self.height - 1))
            && self.entry_points.iter().all(|p| self.contains_tile(*p))
    }

    /// Stamp walls and interior into the grid
    pub fn apply_to(&self, grid: &mut TerrainGrid) {
        for tile in self.tiles() {
            let terrain = if self.is_wall_tile(tile) {
                TerrainCategory::Impassable
            } else {
                TerrainCategory::Interior
            };
            grid.set_tile(tile, terrain);
        }
    }
}
