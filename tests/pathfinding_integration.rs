//! Route planning integration tests

use tactical_nav::core::{MobilityClass, NavConfig, NavError, TileCoord, Vec2};
use tactical_nav::movement::{advance_along_path, FollowState, PathFollower};
use tactical_nav::pathfinding::{Path, Pathfinder};
use tactical_nav::terrain::{TerrainCategory, TerrainGrid};

fn center(x: i32, y: i32) -> Vec2 {
    TerrainGrid::tile_center(TileCoord::new(x, y))
}

fn assert_waypoints_passable(grid: &TerrainGrid, path: &Path, mobility: MobilityClass) {
    for waypoint in path.waypoints() {
        assert!(
            grid.is_passable(*waypoint, mobility),
            "waypoint {:?} is not passable for {}",
            waypoint,
            mobility.name()
        );
    }
}

#[test]
fn test_open_grid_corner_to_corner() {
    let grid = TerrainGrid::new(30, 24);
    let mut pathfinder = Pathfinder::new();

    let path = pathfinder
        .find_path(&grid, center(0, 0), center(29, 23), MobilityClass::Foot, 1000)
        .expect("open grid must have a route");

    assert!(path.len() <= 30);
    assert_eq!(path.first(), Some(center(0, 0)));
    assert_eq!(path.last(), Some(center(29, 23)));
    assert_waypoints_passable(&grid, &path, MobilityClass::Foot);
}

#[test]
fn test_detours_around_wall() {
    let mut grid = TerrainGrid::new(30, 24);
    grid.fill_rect(15, 4, 1, 16, TerrainCategory::Impassable);
    let mut pathfinder = Pathfinder::new();

    let start = center(5, 12);
    let goal = center(25, 12);
    let path = pathfinder
        .find_path(&grid, start, goal, MobilityClass::Foot, 1000)
        .expect("wall leaves gaps at both ends");

    assert!(path.len() > 2);
    assert!(path.length() > start.distance(goal));
    assert_waypoints_passable(&grid, &path, MobilityClass::Foot);
}

#[test]
fn test_goal_inside_structure_wall() {
    let mut grid = TerrainGrid::new(20, 20);
    // 6x5 building with a single door on its south wall at (8, 10)
    for ty in 6..11 {
        for tx in 5..11 {
            let on_edge = tx == 5 || tx == 10 || ty == 6 || ty == 10;
            let terrain = if on_edge && (tx, ty) != (8, 10) {
                TerrainCategory::Impassable
            } else {
                TerrainCategory::Interior
            };
            grid.set_tile(TileCoord::new(tx, ty), terrain);
        }
    }
    let mut pathfinder = Pathfinder::new();

    // Wall tile just east of the door
    let path = pathfinder
        .find_path(&grid, center(8, 18), center(9, 10), MobilityClass::Foot, 1000)
        .expect("door leads inside");

    let end = TerrainGrid::pixel_to_tile(path.last().unwrap_or_default());
    assert_ne!(grid.tile_at(end), TerrainCategory::Impassable);
    assert!(end.chebyshev_distance(&TileCoord::new(8, 10)) <= 1);
}

#[test]
fn test_unreachable_goal_region() {
    let mut grid = TerrainGrid::with_fill(30, 24, TerrainCategory::Impassable);
    grid.fill_rect(0, 0, 3, 3, TerrainCategory::Open);
    let mut pathfinder = Pathfinder::new();

    assert!(pathfinder
        .find_path(&grid, center(1, 1), center(20, 20), MobilityClass::Foot, 1000)
        .is_none());

    let err = pathfinder
        .try_find_path(&grid, center(1, 1), center(20, 20), MobilityClass::Foot, 1000)
        .unwrap_err();
    assert!(matches!(err, NavError::UnreachableGoal { radius: 10, .. }));
    assert!(err.is_no_path());
}

#[test]
fn test_cache_evicts_first_of_101_requests() {
    let grid = TerrainGrid::new(30, 24);
    let mut pathfinder = Pathfinder::new();
    assert_eq!(pathfinder.cache_capacity(), 100);

    let goals: Vec<Vec2> = (0..101).map(|i| center(i % 30, 1 + i / 30)).collect();
    let first = pathfinder.find_path(&grid, center(0, 0), goals[0], MobilityClass::Foot, 1000);
    for goal in &goals[1..] {
        pathfinder.find_path(&grid, center(0, 0), *goal, MobilityClass::Foot, 1000);
    }
    assert_eq!(pathfinder.stats().searches_run, 101);
    assert_eq!(pathfinder.stats().evictions, 1);
    assert_eq!(pathfinder.cache_len(), 100);

    let again = pathfinder.find_path(&grid, center(0, 0), goals[0], MobilityClass::Foot, 1000);
    assert_eq!(pathfinder.stats().searches_run, 102);
    assert_eq!(first, again);
}

#[test]
fn test_cache_hit_matches_fresh_search() {
    let mut grid = TerrainGrid::new(30, 24);
    grid.fill_rect(8, 0, 2, 18, TerrainCategory::HeavyCover);
    grid.fill_rect(18, 6, 2, 18, TerrainCategory::Water);
    grid.fill_rect(0, 20, 30, 1, TerrainCategory::Road);

    let request = (center(1, 2), center(28, 3));
    for mobility in MobilityClass::ALL {
        let mut warm = Pathfinder::new();
        let miss = warm.find_path(&grid, request.0, request.1, mobility, 2000);
        let hit = warm.find_path(&grid, request.0, request.1, mobility, 2000);
        assert_eq!(warm.stats().cache_hits, 1);

        let fresh = Pathfinder::new().find_path(&grid, request.0, request.1, mobility, 2000);
        assert_eq!(hit, miss);
        assert_eq!(hit, fresh);
    }
}

#[test]
fn test_mobility_classes_cached_separately() {
    let mut grid = TerrainGrid::new(20, 10);
    grid.fill_rect(10, 0, 1, 10, TerrainCategory::HeavyCover);
    let mut pathfinder = Pathfinder::new();

    assert!(pathfinder
        .find_path(&grid, center(0, 5), center(19, 5), MobilityClass::Foot, 1000)
        .is_some());
    assert!(pathfinder
        .find_path(&grid, center(0, 5), center(19, 5), MobilityClass::Vehicle, 1000)
        .is_none());
    assert_eq!(pathfinder.stats().searches_run, 2);
}

#[test]
fn test_config_drives_pathfinder() {
    let config = NavConfig::from_toml_str("cache_capacity = 3\ngoal_search_radius = 2\n").unwrap();
    let mut grid = TerrainGrid::with_fill(10, 10, TerrainCategory::Impassable);
    grid.fill_rect(0, 0, 2, 2, TerrainCategory::Open);
    grid.set_tile(TileCoord::new(5, 2), TerrainCategory::Open);
    grid.fill_rect(2, 0, 4, 1, TerrainCategory::Open);
    grid.set_tile(TileCoord::new(5, 1), TerrainCategory::Open);

    let mut pathfinder = Pathfinder::with_config(&config);
    assert_eq!(pathfinder.cache_capacity(), 3);

    // (5,5) is three steps from the nearest open tile at (5,2)
    assert!(pathfinder
        .find_path_default(&grid, center(0, 0), center(5, 5), MobilityClass::Foot)
        .is_none());
    // (5,4) is two steps away
    let path = pathfinder
        .find_path_default(&grid, center(0, 0), center(5, 4), MobilityClass::Foot)
        .expect("substitute goal within radius");
    assert_eq!(path.last(), Some(center(5, 2)));
}

#[test]
fn test_follower_consumes_path_in_len_plus_one_calls() {
    let mut grid = TerrainGrid::new(30, 24);
    grid.fill_rect(10, 0, 1, 20, TerrainCategory::Impassable);
    grid.fill_rect(20, 4, 1, 20, TerrainCategory::Impassable);
    let mut pathfinder = Pathfinder::new();
    let path = pathfinder
        .find_path(&grid, center(2, 2), center(27, 2), MobilityClass::Foot, 2000)
        .unwrap();
    let n = path.len();
    assert!(n > 2);

    let mut follower = PathFollower::new();
    follower.set_path(path);

    // Start away from the first waypoint, then stand on each target returned
    let mut position = Vec2::new(-100.0, -100.0);
    let mut calls = 0;
    loop {
        calls += 1;
        match follower.update(position) {
            Some(target) => position = target,
            None => break,
        }
        assert!(calls <= n + 1, "follower never finished");
    }

    assert_eq!(calls, n + 1);
    assert_eq!(follower.state(), FollowState::Arrived);
    assert!(!follower.has_path());
}

#[test]
fn test_agent_walks_route_to_goal() {
    let mut grid = TerrainGrid::new(30, 24);
    grid.fill_rect(12, 3, 1, 18, TerrainCategory::Impassable);
    grid.fill_rect(14, 0, 3, 24, TerrainCategory::LightCover);
    let mut pathfinder = Pathfinder::new();

    let start = center(3, 12);
    let goal = center(25, 12);
    let path = pathfinder
        .find_path(&grid, start, goal, MobilityClass::Foot, 2000)
        .unwrap();

    let mut follower = PathFollower::new();
    follower.set_path(path);
    let mut position = start;
    let mut arrived = false;

    for _ in 0..2000 {
        let result = advance_along_path(&grid, &mut follower, position, 30.0, 0.25, MobilityClass::Foot);
        assert!(!result.blocked, "blocked at {:?}", position);
        position = result.position;
        if result.arrived {
            arrived = true;
            break;
        }
    }

    assert!(arrived);
    assert!(position.distance(goal) < 8.0);
    assert_eq!(follower.remaining_distance(position), 0.0);
}

#[test]
fn test_line_of_sight() {
    let mut grid = TerrainGrid::new(20, 20);
    assert!(grid.has_clear_line_of_sight_default(center(2, 10), center(17, 10)));

    grid.set_tile(TileCoord::new(9, 10), TerrainCategory::Impassable);
    assert!(!grid.has_clear_line_of_sight_default(center(2, 10), center(17, 10)));

    // Heavy cover slows movement but does not block sight
    grid.set_tile(TileCoord::new(9, 10), TerrainCategory::HeavyCover);
    assert!(grid.has_clear_line_of_sight_default(center(2, 10), center(17, 10)));
}

#[test]
fn test_terrain_mutation_requires_clear_cache() {
    let mut grid = TerrainGrid::new(20, 10);
    let mut pathfinder = Pathfinder::new();
    let (start, goal) = (center(0, 5), center(19, 5));

    let before = pathfinder.find_path(&grid, start, goal, MobilityClass::Foot, 1000);
    grid.fill_rect(10, 0, 1, 10, TerrainCategory::Impassable);

    // Stale until cleared
    assert_eq!(pathfinder.find_path(&grid, start, goal, MobilityClass::Foot, 1000), before);

    pathfinder.clear_cache();
    assert_eq!(pathfinder.cache_len(), 0);
    assert!(pathfinder
        .find_path(&grid, start, goal, MobilityClass::Foot, 1000)
        .is_none());
}
