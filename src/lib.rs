//! Tactical Nav - terrain-aware pathfinding for tile battlefields

pub mod core;
pub mod map;
pub mod movement;
pub mod pathfinding;
pub mod terrain;
