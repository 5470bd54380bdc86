//! Property tests for the search, its heuristic and smoothing

use proptest::prelude::*;
use tactical_nav::core::constants::{DIAGONAL_COST, ORTHOGONAL_COST};
use tactical_nav::core::{MobilityClass, TileCoord};
use tactical_nav::pathfinding::search::{can_move_diagonal, DIRECTIONS};
use tactical_nav::pathfinding::{astar, heuristic, smooth_path};
use tactical_nav::terrain::{TerrainCategory, TerrainGrid};

fn build_grid(width: usize, height: usize, cells: &[usize]) -> TerrainGrid {
    let mut grid = TerrainGrid::new(width, height);
    for (i, cell) in cells.iter().enumerate() {
        let tile = TileCoord::new((i % width) as i32, (i / width) as i32);
        grid.set_tile(tile, TerrainCategory::ALL[cell % TerrainCategory::ALL.len()]);
    }
    grid
}

/// Plain Dijkstra over every tile under the same movement rules as the search
fn brute_force_cost(grid: &TerrainGrid, start: TileCoord, goal: TileCoord, mobility: MobilityClass) -> Option<f64> {
    let n = grid.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut done = vec![false; n];
    dist[grid.index_of(start)?] = 0.0;

    loop {
        let current = (0..n)
            .filter(|&i| !done[i] && dist[i].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]))?;
        done[current] = true;

        let tile = grid.coord_of(current);
        if tile == goal {
            return Some(dist[current]);
        }

        for (dx, dy, base) in DIRECTIONS {
            let next = tile.offset(dx, dy);
            let Some(ni) = grid.index_of(next) else {
                continue;
            };
            let multiplier = grid.effective_cost(next, mobility);
            if multiplier <= 0.0 {
                continue;
            }
            if dx != 0 && dy != 0 && !can_move_diagonal(grid, tile, dx, dy, mobility) {
                continue;
            }
            let candidate = dist[current] + base as f64 / multiplier as f64;
            if candidate < dist[ni] {
                dist[ni] = candidate;
            }
        }
    }
}

fn grid_strategy() -> impl Strategy<Value = (usize, usize, Vec<usize>)> {
    (3usize..8, 3usize..8).prop_flat_map(|(w, h)| {
        // Weight toward open ground and roads so routes usually exist
        let cell = prop_oneof![
            4 => Just(0usize),
            2 => Just(5usize),
            1 => 0usize..7,
        ];
        (Just(w), Just(h), prop::collection::vec(cell, w * h))
    })
}

fn mobility_strategy() -> impl Strategy<Value = MobilityClass> {
    prop_oneof![Just(MobilityClass::Foot), Just(MobilityClass::Vehicle)]
}

proptest! {
    #[test]
    fn heuristic_never_overestimates(
        (w, h, cells) in grid_strategy(),
        sx in 0usize..8, sy in 0usize..8, gx in 0usize..8, gy in 0usize..8,
        mobility in mobility_strategy(),
    ) {
        let grid = build_grid(w, h, &cells);
        let start = TileCoord::new((sx % w) as i32, (sy % h) as i32);
        let goal = TileCoord::new((gx % w) as i32, (gy % h) as i32);

        let optimal = brute_force_cost(&grid, start, goal, mobility);
        let found = astar(&grid, start, goal, mobility, 10_000);

        match optimal {
            Some(cost) => {
                prop_assert!(heuristic(start, goal) as f64 <= cost + 1e-4);
                let outcome = found.expect("reachable goal must be found");
                prop_assert!((outcome.cost as f64 - cost).abs() < 1e-3,
                    "search cost {} vs optimal {}", outcome.cost, cost);
            }
            None => prop_assert!(found.is_err()),
        }
    }

    #[test]
    fn raw_paths_never_cut_corners(
        (w, h, cells) in grid_strategy(),
        mobility in mobility_strategy(),
    ) {
        let grid = build_grid(w, h, &cells);
        let start = TileCoord::new(0, 0);
        let goal = TileCoord::new(w as i32 - 1, h as i32 - 1);

        if let Ok(outcome) = astar(&grid, start, goal, mobility, 10_000) {
            for step in outcome.tiles.windows(2) {
                let (dx, dy) = (step[1].x - step[0].x, step[1].y - step[0].y);
                prop_assert!(dx.abs() <= 1 && dy.abs() <= 1);
                prop_assert!(grid.is_tile_passable(step[1], mobility));
                if dx != 0 && dy != 0 {
                    prop_assert!(grid.is_tile_passable(step[0].offset(dx, 0), mobility));
                    prop_assert!(grid.is_tile_passable(step[0].offset(0, dy), mobility));
                }
            }
        }
    }

    #[test]
    fn smoothing_keeps_ends_and_order(
        (w, h, cells) in grid_strategy(),
        mobility in mobility_strategy(),
    ) {
        let grid = build_grid(w, h, &cells);
        let start = TileCoord::new(0, h as i32 - 1);
        let goal = TileCoord::new(w as i32 - 1, 0);

        if let Ok(outcome) = astar(&grid, start, goal, mobility, 10_000) {
            let raw = outcome.tiles;
            let smoothed = smooth_path(&grid, &raw, mobility);

            prop_assert_eq!(smoothed.first(), raw.first());
            prop_assert_eq!(smoothed.last(), raw.last());
            prop_assert!(smoothed.len() <= raw.len());

            // Subsequence of the raw path
            let mut cursor = raw.iter();
            for tile in &smoothed {
                prop_assert!(cursor.any(|t| t == tile), "{:?} not drawn from raw path in order", tile);
            }
        }
    }

    #[test]
    fn zero_cost_iff_impassable(cell in 0usize..7, mobility in mobility_strategy()) {
        let mut grid = TerrainGrid::new(1, 1);
        let tile = TileCoord::new(0, 0);
        grid.set_tile(tile, TerrainCategory::ALL[cell]);
        prop_assert_eq!(grid.effective_cost(tile, mobility) == 0.0, !grid.is_tile_passable(tile, mobility));
    }
}

#[test]
fn test_base_costs() {
    assert_eq!(ORTHOGONAL_COST, 1.0);
    assert!((DIAGONAL_COST - std::f32::consts::SQRT_2).abs() < f32::EPSILON);
}
