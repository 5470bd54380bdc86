//! Battlefields - terrain plus the structure overlay and zone registry

pub mod battlefield;
pub mod layouts;
pub mod structure;
pub mod zone;

pub use battlefield::Battlefield;
pub use layouts::{available_maps, build_map, MapLayout};
pub use structure::Structure;
pub use zone::{Zone, ZoneKind, ZoneRegistry};
