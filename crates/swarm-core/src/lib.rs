//! Swarm Core - Foundational types for the Swarm particle engine
//!
//! This crate provides the types that all other Swarm crates depend on:
//! - `Vec3` - Spatial vector used for particle state
//! - Error types and Result alias

mod error;
mod types;

pub use error::{Result, SwarmError};
pub use types::Vec3;
