//! Particle settling physics

pub mod density;
pub mod fall_velocity;

pub use density::{phi_from_diameter, SizeDensityRule, SolidityScale};
pub use fall_velocity::{
    reynolds_number, FallVelocitySolver, ShapeFactors, SolverConfig, VelocityAlgorithm,
};
