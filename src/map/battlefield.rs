//! Battlefield: terrain grid plus its structure overlay and zone registry

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::constants::{MAP_TILES_X, MAP_TILES_Y};
use crate::core::error::{NavError, Result};
use crate::core::types::Vec2;
use crate::map::structure::Structure;
use crate::map::zone::{Zone, ZoneRegistry};
use crate::terrain::TerrainGrid;

/// A named map. Owns the grid that pathfinders search.
///
/// Inserting a structure rewrites grid tiles; whoever does so must clear
/// any pathfinder cache built over this battlefield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battlefield {
    pub name: String,
    grid: TerrainGrid,
    #[serde(default)]
    structures: Vec<Structure>,
    #[serde(default)]
    zones: ZoneRegistry,
}

impl Battlefield {
    pub fn new(name: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            grid: TerrainGrid::new(width, height),
            structures: Vec::new(),
            zones: ZoneRegistry::new(),
        }
    }

    /// Open battlefield of the default 30x24 size
    pub fn with_default_size(name: impl Into<String>) -> Self {
        Self::new(name, MAP_TILES_X, MAP_TILES_Y)
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    /// Mutable grid access; invalidates pathfinder caches
    pub fn grid_mut(&mut self) -> &mut TerrainGrid {
        &mut self.grid
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn structure(&self, id: &str) -> Option<&Structure> {
        self.structures.iter().find(|s| s.id == id)
    }

    /// Add a structure and stamp its walls and interior into the grid
    pub fn add_structure(&mut self, structure: Structure) -> Result<()> {
        if !structure.fits_within(&self.grid) {
            return Err(NavError::StructureOutOfBounds(format!(
                "'{}' at ({}, {}) size {}x{} on a {}x{} grid",
                structure.id,
                structure.x,
                structure.y,
                structure.width,
                structure.height,
                self.grid.width(),
                self.grid.height()
            )));
        }
        if self.structure(&structure.id).is_some() {
            return Err(NavError::MalformedMap(format!(
                "duplicate structure id '{}'",
                structure.id
            )));
        }

        structure.apply_to(&mut self.grid);
        tracing::debug!("Added structure '{}' to {}", structure.id, self.name);
        self.structures.push(structure);
        Ok(())
    }

    /// Structure whose footprint covers a pixel, if any
    pub fn structure_at_pixel(&self, pos: Vec2) -> Option<&Structure> {
        let tile = TerrainGrid::pixel_to_tile(pos);
        self.structures.iter().find(|s| s.contains_tile(tile))
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    /// Register a zone; its rectangle must be non-empty and inside the grid
    pub fn add_zone(&mut self, id: impl Into<String>, zone: Zone) -> Result<()> {
        let id = id.into();
        check_zone(&self.grid, &id, &zone)?;
        self.zones.insert(id, zone);
        Ok(())
    }

    // === PERSISTENCE ===

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a saved battlefield. Tiles are restored as saved; structures
    /// are not re-stamped. Structures and zones get the same checks as
    /// `add_structure` and `add_zone`.
    pub fn from_json(json: &str) -> Result<Self> {
        let battlefield: Battlefield = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for structure in &battlefield.structures {
            if !structure.fits_within(&battlefield.grid) {
                return Err(NavError::MalformedMap(format!(
                    "structure '{}' lies outside the grid",
                    structure.id
                )));
            }
            if !seen.insert(structure.id.as_str()) {
                return Err(NavError::MalformedMap(format!(
                    "duplicate structure id '{}'",
                    structure.id
                )));
            }
        }
        for (id, zone) in battlefield.zones.iter() {
            check_zone(&battlefield.grid, id, zone)?;
        }

        Ok(battlefield)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

fn check_zone(grid: &TerrainGrid, id: &str, zone: &Zone) -> Result<()> {
    if zone.fits_within(grid) {
        return Ok(());
    }
    Err(NavError::InvalidZone(format!(
        "'{}' at ({}, {}) size {}x{}",
        id, zone.x, zone.y, zone.width, zone.height
    )))
}
