//! Terrain categories and their static property table
//!
//! Each category maps to a fixed row of properties. The table is read-only
//! and queryable by category so UI and combat can display the same numbers
//! the pathfinder uses.

use serde::{Deserialize, Serialize};

use crate::core::types::MobilityClass;

/// Terrain classification of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TerrainCategory {
    #[default]
    Open,       // No modifiers
    LightCover, // Sandbags, cars, debris
    HeavyCover, // Dense rubble, slow and closed to vehicles
    Water,      // Impassable to both classes, doesn't block sight
    Impassable, // Walls and solid obstacles
    Road,       // Faster than open ground
    Interior,   // Inside a structure
}

/// Properties shared by every tile of a category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainProperties {
    pub name: &'static str,
    /// Damage reduction fraction (0.0 = none, 1.0 = full)
    pub cover: f32,
    /// Movement speed multiplier; higher is faster, 0.0 is impassable
    pub movement_multiplier: f32,
    /// Passability indexed by `MobilityClass::index()`
    pub passable: [bool; MobilityClass::COUNT],
    pub blocks_los: bool,
}

impl TerrainProperties {
    #[inline]
    pub fn is_passable_for(&self, mobility: MobilityClass) -> bool {
        self.passable[mobility.index()]
    }
}

const OPEN: TerrainProperties = TerrainProperties {
    name: "Open Ground",
    cover: 0.0,
    movement_multiplier: 1.0,
    passable: [true, true],
    blocks_los: false,
};

const LIGHT_COVER: TerrainProperties = TerrainProperties {
    name: "Light Cover",
    cover: 0.3,
    movement_multiplier: 0.85,
    passable: [true, true],
    blocks_los: false,
};

const HEAVY_COVER: TerrainProperties = TerrainProperties {
    name: "Heavy Cover",
    cover: 0.5,
    movement_multiplier: 0.6,
    passable: [true, false],
    blocks_los: false,
};

const WATER: TerrainProperties = TerrainProperties {
    name: "Water",
    cover: 0.0,
    movement_multiplier: 0.3,
    passable: [false, false],
    blocks_los: false,
};

const IMPASSABLE: TerrainProperties = TerrainProperties {
    name: "Impassable",
    cover: 1.0,
    movement_multiplier: 0.0,
    passable: [false, false],
    blocks_los: true,
};

const ROAD: TerrainProperties = TerrainProperties {
    name: "Road",
    cover: 0.0,
    movement_multiplier: 1.3,
    passable: [true, true],
    blocks_los: false,
};

const INTERIOR: TerrainProperties = TerrainProperties {
    name: "Building Interior",
    cover: 0.4,
    movement_multiplier: 0.8,
    passable: [true, false],
    blocks_los: false,
};

impl TerrainCategory {
    pub const ALL: [TerrainCategory; 7] = [
        TerrainCategory::Open,
        TerrainCategory::LightCover,
        TerrainCategory::HeavyCover,
        TerrainCategory::Water,
        TerrainCategory::Impassable,
        TerrainCategory::Road,
        TerrainCategory::Interior,
    ];

    /// Row of the property table for this category
    pub fn properties(&self) -> &'static TerrainProperties {
        match self {
            TerrainCategory::Open => &OPEN,
            TerrainCategory::LightCover => &LIGHT_COVER,
            TerrainCategory::HeavyCover => &HEAVY_COVER,
            TerrainCategory::Water => &WATER,
            TerrainCategory::Impassable => &IMPASSABLE,
            TerrainCategory::Road => &ROAD,
            TerrainCategory::Interior => &INTERIOR,
        }
    }

    pub fn name(&self) -> &'static str {
        self.properties().name
    }

    /// Movement speed multiplier (1.0 = normal, 0.0 = impassable)
    pub fn movement_multiplier(&self) -> f32 {
        self.properties().movement_multiplier
    }

    /// Cover value (0.0 = none, 1.0 = full)
    pub fn cover(&self) -> f32 {
        self.properties().cover
    }

    pub fn blocks_los(&self) -> bool {
        self.properties().blocks_los
    }

    pub fn is_passable_for(&self, mobility: MobilityClass) -> bool {
        self.properties().is_passable_for(mobility)
    }

    /// Multiplier as seen by a mover of the given class; 0.0 where it can't go
    pub fn effective_multiplier(&self, mobility: MobilityClass) -> f32 {
        if self.is_passable_for(mobility) {
            self.movement_multiplier()
        } else {
            0.0
        }
    }
}

/// Largest movement multiplier among passable categories.
///
/// The cheapest possible orthogonal step costs `1.0 / max_movement_multiplier()`,
/// which is what keeps the search heuristic admissible on roads.
pub fn max_movement_multiplier() -> f32 {
    TerrainCategory::ALL
        .iter()
        .map(|c| c.movement_multiplier())
        .fold(0.0, f32::max)
}
