use thiserror::Error;

use crate::core::types::TileCoord;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("No passable tile within {radius} tiles of goal {goal:?}")]
    UnreachableGoal { goal: TileCoord, radius: u32 },

    #[error("Search exhausted after {iterations} iterations without reaching {goal:?}")]
    SearchExhausted { goal: TileCoord, iterations: usize },

    #[error("Unknown map: {name}. Available: {available}")]
    UnknownMap { name: String, available: String },

    #[error("Structure out of bounds: {0}")]
    StructureOutOfBounds(String),

    #[error("Invalid zone: {0}")]
    InvalidZone(String),

    #[error("Malformed map data: {0}")]
    MalformedMap(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl NavError {
    /// True for the two failure modes callers treat as "no path"
    pub fn is_no_path(&self) -> bool {
        matches!(
            self,
            NavError::UnreachableGoal { .. } | NavError::SearchExhausted { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
