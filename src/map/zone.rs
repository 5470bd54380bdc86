//! Named rectangular zones (spawns, objectives, extraction, control points)
//!
//! Zones are purely descriptive: they never touch the terrain grid.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::constants::TILE_SIZE;
use crate::core::types::{TileCoord, Vec2};
use crate::terrain::TerrainGrid;

/// Purpose of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Spawn,
    #[serde(alias = "capture")]
    Objective,
    Extraction,
    Control,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Free-form properties such as `team`, `name` or `max_units`
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

impl Zone {
    pub fn new(kind: ZoneKind, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// String property; `None` when missing or not a string
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Non-empty and entirely inside the grid
    pub fn fits_within(&self, grid: &TerrainGrid) -> bool {
        self.is_valid()
            && self.x >= 0
            && self.y >= 0
            && self.x as i64 + self.width as i64 <= grid.width() as i64
            && self.y as i64 + self.height as i64 <= grid.height() as i64
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn contains_tile(&self, tile: TileCoord) -> bool {
        tile.x >= self.x
            && tile.x < self.x + self.width
            && tile.y >= self.y
            && tile.y < self.y + self.height
    }

    pub fn center_pixel(&self) -> Vec2 {
        Vec2::new(
            (self.x as f32 + self.width as f32 / 2.0) * TILE_SIZE,
            (self.y as f32 + self.height as f32 / 2.0) * TILE_SIZE,
        )
    }
}

/// Zones keyed by identifier, iterated in id order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneRegistry {
    zones: BTreeMap<String, Zone>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a zone, returning the previous one under that id
    pub fn insert(&mut self, id: impl Into<String>, zone: Zone) -> Option<Zone> {
        self.zones.insert(id.into(), zone)
    }

    pub fn get(&self, id: &str) -> Option<&Zone> {
        self.zones.get(id)
    }

    pub fn by_kind(&self, kind: ZoneKind) -> impl Iterator<Item = (&str, &Zone)> + '_ {
        self.iter().filter(move |(_, z)| z.kind == kind)
    }

    /// Zones covering a tile (zones may overlap)
    pub fn zones_at_tile(&self, tile: TileCoord) -> impl Iterator<Item = (&str, &Zone)> + '_ {
        self.iter().filter(move |(_, z)| z.contains_tile(tile))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Zone)> + '_ {
        self.zones.iter().map(|(id, z)| (id.as_str(), z))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
