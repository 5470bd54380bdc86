//! Battlefield and navigation constants
//!
//! External systems (UI, combat) depend on the tile size and default
//! battlefield dimensions, so they live here rather than in the grid.

/// Edge length of a terrain tile in pixels
pub const TILE_SIZE: f32 = 32.0;

/// Default battlefield width in tiles (960 px)
pub const MAP_TILES_X: usize = 30;

/// Default battlefield height in tiles (768 px)
pub const MAP_TILES_Y: usize = 24;

pub const MAP_PIXEL_W: f32 = TILE_SIZE * MAP_TILES_X as f32;
pub const MAP_PIXEL_H: f32 = TILE_SIZE * MAP_TILES_Y as f32;

/// Number of raw tile paths kept by a pathfinder
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Heap pops allowed per path request
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// How far (in 8-connected steps) to look for a passable stand-in goal
pub const DEFAULT_GOAL_SEARCH_RADIUS: u32 = 10;

/// Distance in pixels at which a follower counts a waypoint as reached
pub const DEFAULT_ARRIVAL_THRESHOLD: f32 = 8.0;

/// Line-of-sight sampling interval (half a tile)
pub const DEFAULT_LOS_STEP: f32 = TILE_SIZE / 2.0;

/// Base cost of an orthogonal step
pub const ORTHOGONAL_COST: f32 = 1.0;

/// Base cost of a diagonal step
pub const DIAGONAL_COST: f32 = std::f32::consts::SQRT_2;
