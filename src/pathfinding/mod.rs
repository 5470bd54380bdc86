//! Route planning - A* search, smoothing, and the result cache

pub mod cache;
pub mod pathfinder;
pub mod search;
pub mod smoothing;

// Re-exports for convenient access
pub use cache::{CacheKey, PathCache};
pub use pathfinder::{Path, PathStats, Pathfinder};
pub use search::{astar, find_nearest_passable, heuristic, octile_distance, SearchOutcome};
pub use smoothing::smooth_path;
