//! Terrain model - categories, the property table, and the tile grid

pub mod category;
pub mod grid;

pub use category::{max_movement_multiplier, TerrainCategory, TerrainProperties};
pub use grid::{bresenham_line, TerrainGrid};
