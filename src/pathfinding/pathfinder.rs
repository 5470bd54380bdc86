//! Request-level pathfinding: goal substitution, caching, smoothing
//!
//! The pathfinder does not own the grid. Whoever mutates the grid must call
//! `clear_cache` before the next request, or cached routes will walk through
//! the new terrain.

use serde::{Deserialize, Serialize};

use crate::core::config::NavConfig;
use crate::core::error::{NavError, Result};
use crate::core::types::{MobilityClass, TileCoord, Vec2};
use crate::pathfinding::cache::{CacheKey, PathCache};
use crate::pathfinding::search::{astar, find_nearest_passable};
use crate::pathfinding::smoothing::smooth_path;
use crate::terrain::TerrainGrid;

/// Ordered pixel waypoints from start to goal
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    waypoints: Vec<Vec2>,
}

impl Path {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self { waypoints }
    }

    /// Waypoints at the centers of the given tiles
    pub fn from_tiles(tiles: &[TileCoord]) -> Self {
        Self::new(tiles.iter().map(|&t| TerrainGrid::tile_center(t)).collect())
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.waypoints.get(index).copied()
    }

    pub fn first(&self) -> Option<Vec2> {
        self.waypoints.first().copied()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Polyline length through all waypoints, in pixels
    pub fn length(&self) -> f32 {
        self.waypoints.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    pub fn into_waypoints(self) -> Vec<Vec2> {
        self.waypoints
    }
}

/// Counters for cache effectiveness and search load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PathStats {
    pub requests: u64,
    pub cache_hits: u64,
    /// Cache misses; each runs the A* search
    pub searches_run: u64,
    pub evictions: u64,
    pub unreachable_goals: u64,
    pub exhausted_searches: u64,
}

impl std::ops::AddAssign for PathStats {
    fn add_assign(&mut self, rhs: Self) {
        self.requests += rhs.requests;
        self.cache_hits += rhs.cache_hits;
        self.searches_run += rhs.searches_run;
        self.evictions += rhs.evictions;
        self.unreachable_goals += rhs.unreachable_goals;
        self.exhausted_searches += rhs.exhausted_searches;
    }
}

/// A* pathfinder with a FIFO result cache
#[derive(Debug, Clone)]
pub struct Pathfinder {
    cache: PathCache,
    goal_search_radius: u32,
    max_iterations: usize,
    stats: PathStats,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::with_config(&NavConfig::default())
    }
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &NavConfig) -> Self {
        Self {
            cache: PathCache::new(config.cache_capacity),
            goal_search_radius: config.goal_search_radius,
            max_iterations: config.max_iterations,
            stats: PathStats::default(),
        }
    }

    /// Find a route between two pixel positions.
    ///
    /// Returns `None` when the goal area is unreachable or the search hits
    /// `max_iterations`; no partial path is ever returned.
    pub fn find_path(
        &mut self,
        grid: &TerrainGrid,
        start: Vec2,
        goal: Vec2,
        mobility: MobilityClass,
        max_iterations: usize,
    ) -> Option<Path> {
        self.try_find_path(grid, start, goal, mobility, max_iterations).ok()
    }

    /// `find_path` with the configured iteration cap
    pub fn find_path_default(
        &mut self,
        grid: &TerrainGrid,
        start: Vec2,
        goal: Vec2,
        mobility: MobilityClass,
    ) -> Option<Path> {
        self.find_path(grid, start, goal, mobility, self.max_iterations)
    }

    /// Like `find_path`, but reports which failure occurred
    pub fn try_find_path(
        &mut self,
        grid: &TerrainGrid,
        start: Vec2,
        goal: Vec2,
        mobility: MobilityClass,
        max_iterations: usize,
    ) -> Result<Path> {
        self.stats.requests += 1;
        let tiles = self.plan_tiles(grid, start, goal, mobility, max_iterations)?;
        let smoothed = smooth_path(grid, &tiles, mobility);
        Ok(Path::from_tiles(&smoothed))
    }

    /// Resolve the request to a raw (unsmoothed) tile path, using the cache
    fn plan_tiles(
        &mut self,
        grid: &TerrainGrid,
        start: Vec2,
        goal: Vec2,
        mobility: MobilityClass,
        max_iterations: usize,
    ) -> Result<Vec<TileCoord>> {
        let start_tile = grid.clamp_tile(TerrainGrid::pixel_to_tile(start));
        let mut goal_tile = grid.clamp_tile(TerrainGrid::pixel_to_tile(goal));

        if !grid.is_tile_passable(goal_tile, mobility) {
            let Some(substitute) =
                find_nearest_passable(grid, goal_tile, mobility, self.goal_search_radius)
            else {
                self.stats.unreachable_goals += 1;
                tracing::debug!(
                    "No passable tile within {} of goal {:?} for {}",
                    self.goal_search_radius,
                    goal_tile,
                    mobility.name()
                );
                return Err(NavError::UnreachableGoal {
                    goal: goal_tile,
                    radius: self.goal_search_radius,
                });
            };
            goal_tile = substitute;
        }

        let key = CacheKey {
            start: start_tile,
            goal: goal_tile,
            mobility,
        };

        if let Some(cached) = self.cache.get(&key) {
            self.stats.cache_hits += 1;
            tracing::trace!("Path cache hit {:?} -> {:?}", start_tile, goal_tile);
            return Ok(cached.to_vec());
        }
        self.stats.searches_run += 1;

        let outcome = match astar(grid, start_tile, goal_tile, mobility, max_iterations) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.stats.exhausted_searches += 1;
                tracing::debug!("Search failed {:?} -> {:?}: {}", start_tile, goal_tile, err);
                return Err(err);
            }
        };

        tracing::debug!(
            "Found path {:?} -> {:?}: {} tiles, cost {:.2}, {} iterations",
            start_tile,
            goal_tile,
            outcome.tiles.len(),
            outcome.cost,
            outcome.iterations
        );

        if let Some(evicted) = self.cache.insert(key, outcome.tiles.clone()) {
            self.stats.evictions += 1;
            tracing::debug!("Evicted cached path {:?} -> {:?}", evicted.start, evicted.goal);
        }

        Ok(outcome.tiles)
    }

    /// Drop every cached route. Call after any terrain change.
    pub fn clear_cache(&mut self) {
        if !self.cache.is_empty() {
            tracing::debug!("Clearing {} cached paths", self.cache.len());
        }
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn stats(&self) -> PathStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = PathStats::default();
    }
}
