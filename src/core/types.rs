//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Pixel-space point
pub use glam::Vec2;

/// Integer tile coordinate on the terrain grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// King-move distance (number of 8-connected steps on an open grid)
    pub fn chebyshev_distance(&self, other: &Self) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

impl From<(i32, i32)> for TileCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Category of mover; each class has its own passability rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobilityClass {
    #[default]
    Foot,
    Vehicle,
}

impl MobilityClass {
    pub const COUNT: usize = 2;
    pub const ALL: [MobilityClass; Self::COUNT] = [MobilityClass::Foot, MobilityClass::Vehicle];

    /// Index into per-class property arrays
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            MobilityClass::Foot => 0,
            MobilityClass::Vehicle => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MobilityClass::Foot => "foot",
            MobilityClass::Vehicle => "vehicle",
        }
    }
}

impl std::str::FromStr for MobilityClass {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "foot" | "infantry" => Ok(MobilityClass::Foot),
            "vehicle" => Ok(MobilityClass::Vehicle),
            other => Err(format!("unknown mobility class '{}'", other)),
        }
    }
}
