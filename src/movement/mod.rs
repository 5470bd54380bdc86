//! Path following and per-tick steering

pub mod follower;
pub mod steering;

pub use follower::{FollowState, PathFollower};
pub use steering::{advance_along_path, MovementResult};
