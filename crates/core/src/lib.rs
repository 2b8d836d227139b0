//! Tephra Transport Core Library
//!
//! Simulates how far volcanic ash particles drift downwind while settling
//! through the atmosphere. A particle is released at a height, falls at its
//! local terminal velocity through the ICAO standard atmosphere, and is
//! carried by a constant horizontal wind until it lands.
//!
//! ## Layout
//!
//! - [`core_types`]: units, particles and errors
//! - [`atmosphere`]: standard atmosphere profile (temperature, pressure,
//!   density, viscosity)
//! - [`physics`]: terminal fall velocity laws and size-dependent density
//! - [`simulation`]: stepwise trajectory integration, singly or in parallel

pub mod atmosphere;
pub mod core_types;
pub mod physics;
pub mod simulation;

pub use atmosphere::{AirProperties, StandardAtmosphere};
pub use core_types::{Particle, TransportError, TransportResult};
pub use physics::{FallVelocitySolver, SizeDensityRule, SolidityScale, VelocityAlgorithm};
pub use simulation::{SimulationConfig, Trajectory, TrajectorySimulator};
