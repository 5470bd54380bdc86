//! A* search over the terrain grid
//!
//! Step cost is `base / multiplier`, so fast terrain (roads) is cheap and
//! slow terrain (rubble) is expensive. Search nodes live in an arena indexed
//! by flat tile index; parent links are indices into that arena.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use ordered_float::OrderedFloat;

use crate::core::constants::{DIAGONAL_COST, ORTHOGONAL_COST};
use crate::core::error::{NavError, Result};
use crate::core::types::{MobilityClass, TileCoord};
use crate::terrain::{max_movement_multiplier, TerrainGrid};

/// Eight neighbor offsets with base step cost, clockwise from north
pub const DIRECTIONS: [(i32, i32, f32); 8] = [
    (0, -1, ORTHOGONAL_COST), // N
    (1, -1, DIAGONAL_COST),   // NE
    (1, 0, ORTHOGONAL_COST),  // E
    (1, 1, DIAGONAL_COST),    // SE
    (0, 1, ORTHOGONAL_COST),  // S
    (-1, 1, DIAGONAL_COST),   // SW
    (-1, 0, ORTHOGONAL_COST), // W
    (-1, -1, DIAGONAL_COST),  // NW
];

/// Octile distance: `max(dx, dy) + (sqrt(2) - 1) * min(dx, dy)`
pub fn octile_distance(a: TileCoord, b: TileCoord) -> f32 {
    let dx = (a.x - b.x).abs() as f32;
    let dy = (a.y - b.y).abs() as f32;
    dx.max(dy) + (DIAGONAL_COST - 1.0) * dx.min(dy)
}

/// Search heuristic: octile distance priced at the cheapest terrain.
///
/// Roads make a step cheaper than its base cost, so the plain octile
/// distance would overestimate there. Dividing by the largest multiplier
/// keeps the estimate a lower bound on every path.
pub fn heuristic(a: TileCoord, b: TileCoord) -> f32 {
    octile_distance(a, b) / max_movement_multiplier()
}

/// Diagonal moves may not squeeze between two blocked orthogonal tiles
pub fn can_move_diagonal(
    grid: &TerrainGrid,
    from: TileCoord,
    dx: i32,
    dy: i32,
    mobility: MobilityClass,
) -> bool {
    grid.is_tile_passable(from.offset(dx, 0), mobility)
        && grid.is_tile_passable(from.offset(0, dy), mobility)
}

/// Breadth-first search for the passable tile nearest to `origin`.
///
/// Explores 8-connected neighbors in `DIRECTIONS` order, at most `radius`
/// steps out. Returns `origin` itself if it is passable.
pub fn find_nearest_passable(
    grid: &TerrainGrid,
    origin: TileCoord,
    mobility: MobilityClass,
    radius: u32,
) -> Option<TileCoord> {
    let origin_index = grid.index_of(origin)?;
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::new();

    visited[origin_index] = true;
    queue.push_back((origin, 0u32));

    while let Some((tile, dist)) = queue.pop_front() {
        if grid.is_tile_passable(tile, mobility) {
            return Some(tile);
        }
        if dist == radius {
            continue;
        }
        for (dx, dy, _) in DIRECTIONS {
            let next = tile.offset(dx, dy);
            if let Some(i) = grid.index_of(next) {
                if !visited[i] {
                    visited[i] = true;
                    queue.push_back((next, dist + 1));
                }
            }
        }
    }

    None
}

/// Entry in the open set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f_cost: OrderedFloat<f32>,
    /// Push order; breaks `f` ties so equal-cost nodes pop first-in first-out
    seq: u64,
    index: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-tile search state
#[derive(Debug, Clone, Copy)]
struct NodeRecord {
    g_cost: f32,
    parent: Option<usize>,
    closed: bool,
}

impl Default for NodeRecord {
    fn default() -> Self {
        Self {
            g_cost: f32::INFINITY,
            parent: None,
            closed: false,
        }
    }
}

/// Successful search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Tile path from start to goal, both included
    pub tiles: Vec<TileCoord>,
    /// Accumulated movement cost of the path
    pub cost: f32,
    /// Heap pops performed
    pub iterations: usize,
}

/// Find the cheapest 8-connected tile path with A*.
///
/// Each heap pop counts as one iteration; after `max_iterations` pops
/// without reaching `goal` the search fails with `SearchExhausted`, as it
/// does when the frontier runs dry.
pub fn astar(
    grid: &TerrainGrid,
    start: TileCoord,
    goal: TileCoord,
    mobility: MobilityClass,
    max_iterations: usize,
) -> Result<SearchOutcome> {
    let exhausted = |iterations| NavError::SearchExhausted { goal, iterations };
    let Some(start_index) = grid.index_of(start) else {
        return Err(exhausted(0));
    };

    let mut arena = vec![NodeRecord::default(); grid.len()];
    let mut open_set = BinaryHeap::new();
    let mut seq: u64 = 0;

    arena[start_index].g_cost = 0.0;
    open_set.push(OpenEntry {
        f_cost: OrderedFloat(heuristic(start, goal)),
        seq,
        index: start_index,
    });

    let mut iterations = 0;
    while iterations < max_iterations {
        let Some(current) = open_set.pop() else {
            break;
        };
        iterations += 1;

        if arena[current.index].closed {
            continue;
        }

        let tile = grid.coord_of(current.index);
        if tile == goal {
            return Ok(SearchOutcome {
                tiles: reconstruct_path(grid, &arena, current.index),
                cost: arena[current.index].g_cost,
                iterations,
            });
        }

        arena[current.index].closed = true;
        let current_g = arena[current.index].g_cost;

        for (dx, dy, base_cost) in DIRECTIONS {
            let neighbor = tile.offset(dx, dy);
            let Some(ni) = grid.index_of(neighbor) else {
                continue;
            };
            if arena[ni].closed {
                continue;
            }

            let multiplier = grid.effective_cost(neighbor, mobility);
            if multiplier <= 0.0 {
                continue;
            }
            if dx != 0 && dy != 0 && !can_move_diagonal(grid, tile, dx, dy, mobility) {
                continue;
            }

            let tentative_g = current_g + base_cost / multiplier;
            if tentative_g >= arena[ni].g_cost {
                continue;
            }

            arena[ni].g_cost = tentative_g;
            arena[ni].parent = Some(current.index);
            seq += 1;
            open_set.push(OpenEntry {
                f_cost: OrderedFloat(tentative_g + heuristic(neighbor, goal)),
                seq,
                index: ni,
            });
        }
    }

    Err(exhausted(iterations))
}

/// Walk parent links back from `goal_index` and reverse
fn reconstruct_path(grid: &TerrainGrid, arena: &[NodeRecord], goal_index: usize) -> Vec<TileCoord> {
    let mut path = vec![grid.coord_of(goal_index)];
    let mut current = goal_index;
    while let Some(prev) = arena[current].parent {
        path.push(grid.coord_of(prev));
        current = prev;
    }
    path.reverse();
    path
}

/// Movement cost of a tile path under the search's cost model
pub fn path_cost(grid: &TerrainGrid, path: &[TileCoord], mobility: MobilityClass) -> f32 {
    path.windows(2)
        .map(|step| {
            let base = if step[0].x != step[1].x && step[0].y != step[1].y {
                DIAGONAL_COST
            } else {
                ORTHOGONAL_COST
            };
            let multiplier = grid.effective_cost(step[1], mobility);
            if multiplier > 0.0 {
                base / multiplier
            } else {
                f32::INFINITY
            }
        })
        .sum()
}
