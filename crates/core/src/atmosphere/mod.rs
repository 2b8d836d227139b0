//! Vertical structure of the atmosphere a particle falls through.
//!
//! The ICAO standard atmosphere gives temperature and pressure from the
//! ground to 32 km in three layers: a troposphere cooling at 6.5 K/km, an
//! isothermal tropopause from 11 km, and a stratosphere warming at 1 K/km
//! from 20 km. Density follows from the ideal gas law and dynamic viscosity
//! from temperature.

mod standard;

pub use standard::{AirProperties, AtmosphereLayer, AtmosphereState, StandardAtmosphere};
