//! Core types and utilities

pub mod error;
pub mod particle;
pub mod units;

pub use error::{DensityBound, TransportError, TransportResult};
pub use particle::Particle;
pub use units::*;
