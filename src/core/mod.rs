pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::NavConfig;
pub use error::{NavError, Result};
pub use types::{MobilityClass, TileCoord, Vec2};
