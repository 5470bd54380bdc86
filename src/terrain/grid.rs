//! Fixed-size terrain grid with pixel/tile conversion and point queries

use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_LOS_STEP, TILE_SIZE};
use crate::core::types::{MobilityClass, TileCoord, Vec2};
use crate::terrain::category::TerrainCategory;

/// Row-major 2D array of terrain categories.
///
/// Reads outside the grid return `Impassable` rather than failing, so
/// callers can probe neighbors without bounds checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct TerrainGrid {
    width: usize,
    height: usize,
    tiles: Vec<TerrainCategory>,
}

/// Unvalidated wire form of a grid
#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    tiles: Vec<TerrainCategory>,
}

impl TryFrom<RawGrid> for TerrainGrid {
    type Error = String;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.tiles.len() != raw.width * raw.height {
            return Err(format!(
                "grid is {}x{} but holds {} tiles",
                raw.width,
                raw.height,
                raw.tiles.len()
            ));
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            tiles: raw.tiles,
        })
    }
}

impl TerrainGrid {
    /// Create a grid of open ground
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_fill(width, height, TerrainCategory::Open)
    }

    pub fn with_fill(width: usize, height: usize, terrain: TerrainCategory) -> Self {
        Self {
            width,
            height,
            tiles: vec![terrain; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of tiles in the grid
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, tile: TileCoord) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as usize) < self.width && (tile.y as usize) < self.height
    }

    /// Flat index of an in-bounds tile
    #[inline]
    pub fn index_of(&self, tile: TileCoord) -> Option<usize> {
        if self.in_bounds(tile) {
            Some(tile.y as usize * self.width + tile.x as usize)
        } else {
            None
        }
    }

    /// Tile for a flat index produced by `index_of`
    #[inline]
    pub fn coord_of(&self, index: usize) -> TileCoord {
        TileCoord::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Terrain at a tile; `Impassable` outside the grid
    #[inline]
    pub fn tile_at(&self, tile: TileCoord) -> TerrainCategory {
        match self.index_of(tile) {
            Some(i) => self.tiles[i],
            None => TerrainCategory::Impassable,
        }
    }

    /// Overwrite a tile. Out-of-bounds writes are ignored.
    ///
    /// Any pathfinder cache built over this grid is stale afterwards.
    pub fn set_tile(&mut self, tile: TileCoord, terrain: TerrainCategory) {
        if let Some(i) = self.index_of(tile) {
            self.tiles[i] = terrain;
        }
    }

    /// Fill a rectangle, clipped to the grid
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, terrain: TerrainCategory) {
        for ty in y..y + height {
            for tx in x..x + width {
                self.set_tile(TileCoord::new(tx, ty), terrain);
            }
        }
    }

    /// Paint a road along a polyline of tile points with a square brush
    pub fn draw_road(&mut self, points: &[TileCoord], width: i32) {
        let lo = -(width / 2);
        let hi = (width + 1) / 2;
        for pair in points.windows(2) {
            for tile in bresenham_line(pair[0], pair[1]) {
                for wy in lo..hi {
                    for wx in lo..hi {
                        self.set_tile(tile.offset(wx, wy), TerrainCategory::Road);
                    }
                }
            }
        }
    }

    /// Iterate all tiles with their coordinates in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, TerrainCategory)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, terrain)| (self.coord_of(i), *terrain))
    }

    // === COORDINATES ===

    /// Convert pixel position to tile coordinates (floored, unclamped)
    #[inline]
    pub fn pixel_to_tile(pos: Vec2) -> TileCoord {
        TileCoord::new(
            (pos.x / TILE_SIZE).floor() as i32,
            (pos.y / TILE_SIZE).floor() as i32,
        )
    }

    /// Tile center (`center = true`) or top-left corner in pixels
    #[inline]
    pub fn tile_to_pixel(tile: TileCoord, center: bool) -> Vec2 {
        let offset = if center { TILE_SIZE / 2.0 } else { 0.0 };
        Vec2::new(
            tile.x as f32 * TILE_SIZE + offset,
            tile.y as f32 * TILE_SIZE + offset,
        )
    }

    #[inline]
    pub fn tile_center(tile: TileCoord) -> Vec2 {
        Self::tile_to_pixel(tile, true)
    }

    /// Clamp a tile coordinate into the grid
    pub fn clamp_tile(&self, tile: TileCoord) -> TileCoord {
        let max_x = self.width.saturating_sub(1) as i32;
        let max_y = self.height.saturating_sub(1) as i32;
        TileCoord::new(tile.x.clamp(0, max_x), tile.y.clamp(0, max_y))
    }

    // === POINT QUERIES ===

    pub fn terrain_at_pixel(&self, pos: Vec2) -> TerrainCategory {
        self.tile_at(Self::pixel_to_tile(pos))
    }

    /// Raw movement multiplier at a pixel. Higher is faster, 0 is impassable.
    pub fn movement_cost(&self, pos: Vec2) -> f32 {
        self.terrain_at_pixel(pos).movement_multiplier()
    }

    /// Movement multiplier for a mover of the given class; 0 where it can't go
    pub fn effective_cost(&self, tile: TileCoord, mobility: MobilityClass) -> f32 {
        self.tile_at(tile).effective_multiplier(mobility)
    }

    /// Cover fraction (0.0 = none, 1.0 = full) at a pixel
    pub fn cover_fraction(&self, pos: Vec2) -> f32 {
        self.terrain_at_pixel(pos).cover()
    }

    pub fn is_passable(&self, pos: Vec2, mobility: MobilityClass) -> bool {
        self.terrain_at_pixel(pos).is_passable_for(mobility)
    }

    #[inline]
    pub fn is_tile_passable(&self, tile: TileCoord, mobility: MobilityClass) -> bool {
        self.tile_at(tile).is_passable_for(mobility)
    }

    pub fn blocks_line_of_sight(&self, pos: Vec2) -> bool {
        self.terrain_at_pixel(pos).blocks_los()
    }

    /// Check line of sight by sampling the segment every `step` pixels.
    ///
    /// Endpoints are not sampled. Not exact rasterization: a sight line
    /// grazing a blocking tile corner may pass between samples. A step that
    /// is not positive falls back to `DEFAULT_LOS_STEP`.
    pub fn has_clear_line_of_sight(&self, from: Vec2, to: Vec2, step: f32) -> bool {
        let step = if step > 0.0 { step } else { DEFAULT_LOS_STEP };
        let dist = from.distance(to);
        if dist < step {
            return true;
        }

        let steps = (dist / step) as usize;
        (1..steps).all(|i| {
            let t = i as f32 / steps as f32;
            !self.blocks_line_of_sight(from.lerp(to, t))
        })
    }

    /// Line of sight sampled every half tile
    pub fn has_clear_line_of_sight_default(&self, from: Vec2, to: Vec2) -> bool {
        self.has_clear_line_of_sight(from, to, DEFAULT_LOS_STEP)
    }
}

/// Tiles on the Bresenham line from `from` to `to`, both ends included
pub fn bresenham_line(from: TileCoord, to: TileCoord) -> Vec<TileCoord> {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx - dy;

    let mut line = Vec::with_capacity((dx.max(dy) + 1) as usize);
    let (mut x, mut y) = (from.x, from.y);
    loop {
        line.push(TileCoord::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    line
}
