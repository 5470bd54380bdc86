//! Per-tick movement along a followed path

use serde::Serialize;

use crate::core::types::{MobilityClass, Vec2};
use crate::movement::follower::{FollowState, PathFollower};
use crate::terrain::TerrainGrid;

/// Result of a movement tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MovementResult {
    /// Position after the tick
    pub position: Vec2,
    pub moved: bool,
    /// The follower has no waypoints left
    pub arrived: bool,
    /// The step would have entered terrain the mover cannot cross
    pub blocked: bool,
}

impl MovementResult {
    fn stationary(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Advance a mover at `position` toward its follower's next waypoint.
///
/// Speed is `base_speed` scaled by the movement multiplier of the terrain
/// under the mover. The step never overshoots the target waypoint. A step
/// that would land on a tile impassable for `mobility` is refused and the
/// mover stays put.
pub fn advance_along_path(
    grid: &TerrainGrid,
    follower: &mut PathFollower,
    position: Vec2,
    base_speed: f32,
    dt: f32,
    mobility: MobilityClass,
) -> MovementResult {
    let mut result = MovementResult::stationary(position);

    let Some(target) = follower.update(position) else {
        result.arrived = follower.state() == FollowState::Arrived;
        return result;
    };

    let to_target = target - position;
    let distance = to_target.length();
    if distance <= f32::EPSILON {
        return result;
    }

    let step = base_speed * grid.movement_cost(position) * dt;
    if step <= 0.0 {
        // Standing on zero-multiplier terrain
        result.blocked = true;
        return result;
    }

    let next = if step >= distance {
        target
    } else {
        position + to_target / distance * step
    };

    if !grid.is_passable(next, mobility) {
        tracing::trace!("Movement blocked at {:?} heading to {:?}", position, target);
        result.blocked = true;
        return result;
    }

    result.position = next;
    result.moved = true;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TileCoord;
    use crate::pathfinding::Path;
    use crate::terrain::TerrainCategory;

    fn center(x: i32, y: i32) -> Vec2 {
        TerrainGrid::tile_center(TileCoord::new(x, y))
    }

    fn follower_to(waypoints: Vec<Vec2>) -> PathFollower {
        let mut follower = PathFollower::new();
        follower.set_path(Path::new(waypoints));
        follower
    }

    #[test]
    fn test_moves_at_base_speed_on_open_ground() {
        let grid = TerrainGrid::new(10, 10);
        let mut follower = follower_to(vec![center(5, 0)]);

        let result = advance_along_path(&grid, &mut follower, center(0, 0), 20.0, 1.0, MobilityClass::Foot);
        assert!(result.moved);
        assert!((result.position.x - (center(0, 0).x + 20.0)).abs() < 1e-4);
        assert_eq!(result.position.y, center(0, 0).y);
    }

    #[test]
    fn test_slow_terrain_scales_speed() {
        let mut grid = TerrainGrid::new(10, 10);
        grid.set_tile(TileCoord::new(0, 0), TerrainCategory::HeavyCover);
        let mut follower = follower_to(vec![center(5, 0)]);

        let result = advance_along_path(&grid, &mut follower, center(0, 0), 20.0, 1.0, MobilityClass::Foot);
        assert!((result.position.x - (center(0, 0).x + 12.0)).abs() < 1e-4);
    }

    #[test]
    fn test_does_not_overshoot() {
        let grid = TerrainGrid::new(10, 10);
        let mut follower = follower_to(vec![center(1, 0)]);

        let result = advance_along_path(&grid, &mut follower, center(0, 0), 500.0, 1.0, MobilityClass::Foot);
        assert_eq!(result.position, center(1, 0));
    }

    #[test]
    fn test_refuses_impassable_step() {
        let mut grid = TerrainGrid::new(10, 10);
        grid.set_tile(TileCoord::new(1, 0), TerrainCategory::HeavyCover);
        let mut follower = follower_to(vec![center(3, 0)]);

        let foot = advance_along_path(&grid, &mut follower, center(0, 0), 32.0, 1.0, MobilityClass::Foot);
        assert!(foot.moved);

        let vehicle = advance_along_path(&grid, &mut follower, center(0, 0), 32.0, 1.0, MobilityClass::Vehicle);
        assert!(vehicle.blocked);
        assert!(!vehicle.moved);
        assert_eq!(vehicle.position, center(0, 0));
    }

    #[test]
    fn test_reports_arrival() {
        let grid = TerrainGrid::new(10, 10);
        let mut follower = follower_to(vec![center(1, 0)]);
        let mut position = center(0, 0);

        let mut arrived = false;
        for _ in 0..10 {
            let result = advance_along_path(&grid, &mut follower, position, 40.0, 0.5, MobilityClass::Foot);
            position = result.position;
            if result.arrived {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert_eq!(position, center(1, 0));
    }

    #[test]
    fn test_idle_follower_stays_put() {
        let grid = TerrainGrid::new(10, 10);
        let mut follower = PathFollower::new();
        let result = advance_along_path(&grid, &mut follower, center(2, 2), 40.0, 1.0, MobilityClass::Foot);
        assert!(!result.moved);
        assert!(!result.arrived);
    }
}
