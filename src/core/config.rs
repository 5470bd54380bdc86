//! Navigation configuration with documented constants
//!
//! Every tunable number used by the pathfinder and followers is collected
//! here. Values can be overridden from a TOML file; missing keys fall back
//! to the defaults in `core::constants`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    DEFAULT_ARRIVAL_THRESHOLD, DEFAULT_CACHE_CAPACITY, DEFAULT_GOAL_SEARCH_RADIUS,
    DEFAULT_LOS_STEP, DEFAULT_MAX_ITERATIONS,
};
use crate::core::error::{NavError, Result};

/// Configuration for the navigation systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    // === PATHFINDER ===
    /// Maximum number of raw tile paths held by one pathfinder
    ///
    /// Entries are evicted oldest-inserted first.
    pub cache_capacity: usize,

    /// Heap pops allowed per request before giving up
    ///
    /// Bounds a single tick's work when no route exists. A 30x24 map has
    /// 720 tiles, so 1000 covers a full flood of the default battlefield.
    pub max_iterations: usize,

    /// Radius (8-connected steps) searched for a passable substitute goal
    pub goal_search_radius: u32,

    // === FOLLOWER ===
    /// Distance in pixels under which a waypoint counts as reached
    ///
    /// Should stay well below the tile size, or agents will start turning
    /// before they clear a doorway.
    pub arrival_threshold: f32,

    // === LINE OF SIGHT ===
    /// Sampling interval in pixels for line-of-sight checks
    pub los_step: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            goal_search_radius: DEFAULT_GOAL_SEARCH_RADIUS,
            arrival_threshold: DEFAULT_ARRIVAL_THRESHOLD,
            los_step: DEFAULT_LOS_STEP,
        }
    }
}

impl NavConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(NavError::InvalidConfig(
                "cache_capacity must be at least 1".into(),
            ));
        }

        if self.max_iterations == 0 {
            return Err(NavError::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }

        if self.arrival_threshold.is_nan() || self.arrival_threshold <= 0.0 {
            return Err(NavError::InvalidConfig(format!(
                "arrival_threshold ({}) must be positive",
                self.arrival_threshold
            )));
        }

        if self.los_step.is_nan() || self.los_step <= 0.0 {
            return Err(NavError::InvalidConfig(format!(
                "los_step ({}) must be positive",
                self.los_step
            )));
        }

        Ok(())
    }
}
