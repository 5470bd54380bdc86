//! Per-agent cursor over a computed path

use serde::{Deserialize, Serialize};

use crate::core::constants::DEFAULT_ARRIVAL_THRESHOLD;
use crate::core::types::Vec2;
use crate::pathfinding::Path;

/// Progress of a single follow session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowState {
    /// No path assigned
    Idle,
    /// Cursor still points at a waypoint
    Following,
    /// Every waypoint reached; stays here until a new path is set
    Arrived,
}

/// Walks an agent through a path one waypoint at a time.
///
/// Callers must call `update` once per tick: arrival detection and cursor
/// advancement both happen inside it.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: Path,
    current: usize,
    arrival_threshold: f32,
}

impl Default for PathFollower {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_ARRIVAL_THRESHOLD)
    }
}

impl PathFollower {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follower that treats anything closer than `arrival_threshold` pixels
    /// as arrived at a waypoint
    pub fn with_threshold(arrival_threshold: f32) -> Self {
        Self {
            path: Path::default(),
            current: 0,
            arrival_threshold,
        }
    }

    /// Replace the path and restart from its first waypoint
    pub fn set_path(&mut self, path: Path) {
        self.path = path;
        self.current = 0;
    }

    pub fn clear(&mut self) {
        self.set_path(Path::default());
    }

    pub fn has_path(&self) -> bool {
        self.current < self.path.len()
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.path.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn arrival_threshold(&self) -> f32 {
        self.arrival_threshold
    }

    pub fn state(&self) -> FollowState {
        if self.path.is_empty() {
            FollowState::Idle
        } else if self.has_path() {
            FollowState::Following
        } else {
            FollowState::Arrived
        }
    }

    /// Next steering target for an agent at `position`.
    ///
    /// Advances past the current waypoint when the agent is within the
    /// arrival threshold. Returns `None` once the path is exhausted.
    pub fn update(&mut self, position: Vec2) -> Option<Vec2> {
        let waypoint = self.current_waypoint()?;

        if position.distance(waypoint) < self.arrival_threshold {
            self.current += 1;
            return self.current_waypoint();
        }

        Some(waypoint)
    }

    /// Straight-line distance from `position` through every remaining waypoint
    pub fn remaining_distance(&self, position: Vec2) -> f32 {
        let remaining = &self.path.waypoints()[self.current.min(self.path.len())..];

        let mut total = 0.0;
        let mut prev = position;
        for &waypoint in remaining {
            total += prev.distance(waypoint);
            prev = waypoint;
        }
        total
    }
}
