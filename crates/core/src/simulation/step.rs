//! Per-step movement of a falling particle
//!
//! The integrator asks a [`StepModel`] how long a particle takes to fall one
//! step and how far the wind carries it meanwhile. [`AtmosphericDescent`] is
//! the physical model; tests substitute their own.

use crate::atmosphere::StandardAtmosphere;
use crate::core_types::error::{TransportError, TransportResult};
use crate::core_types::units::{Meters, MetersPerSecond, Seconds};
use crate::core_types::Particle;
use crate::physics::fall_velocity::{FallVelocitySolver, VelocityAlgorithm};
use tracing::trace;

/// Time and horizontal drift of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMovement {
    pub fall_time: Seconds,
    pub horizontal_distance: Meters,
}

impl StepMovement {
    /// Movement for one step at constant terminal velocity.
    ///
    /// The step is clipped to `current_altitude` so the last step lands the
    /// particle exactly on the ground.
    ///
    /// ```text
    /// Δh = min(fall_step, altitude)
    /// t  = Δh / w
    /// x  = u · t
    /// ```
    pub fn over(
        current_altitude: Meters,
        fall_step: Meters,
        terminal_velocity: MetersPerSecond,
        wind_speed: MetersPerSecond,
    ) -> Self {
        let applied_step = fall_step.min(current_altitude);
        let fall_time = applied_step / terminal_velocity;
        Self {
            fall_time,
            horizontal_distance: wind_speed * fall_time,
        }
    }
}

/// Backend-agnostic interface for the movement of one integration step
///
/// Implementations must be pure with respect to the particle: the same
/// inputs give the same movement, from any thread.
pub trait StepModel: Send + Sync {
    /// Movement of `particle` falling `fall_step` from `altitude`.
    ///
    /// `fall_step` is the configured step; implementations clip it to the
    /// remaining altitude.
    ///
    /// # Errors
    ///
    /// Any [`TransportError`] from the underlying physics aborts the run.
    fn step_movement(
        &self,
        particle: &Particle,
        altitude: Meters,
        algorithm: VelocityAlgorithm,
        fall_step: Meters,
        wind_speed: MetersPerSecond,
    ) -> TransportResult<StepMovement>;
}

/// Fall through the standard atmosphere at the local terminal velocity
///
/// Each step samples the atmosphere at the step's starting altitude and
/// holds the resulting terminal velocity for the whole step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtmosphericDescent {
    atmosphere: StandardAtmosphere,
    solver: FallVelocitySolver,
}

impl AtmosphericDescent {
    /// Create a descent model from an atmosphere and a velocity solver
    pub fn new(atmosphere: StandardAtmosphere, solver: FallVelocitySolver) -> Self {
        Self { atmosphere, solver }
    }

    /// Atmosphere profile
    pub fn atmosphere(&self) -> &StandardAtmosphere {
        &self.atmosphere
    }

    /// Fall velocity solver
    pub fn solver(&self) -> &FallVelocitySolver {
        &self.solver
    }

    /// Terminal velocity of `particle` at `altitude`.
    ///
    /// # Errors
    ///
    /// See [`FallVelocitySolver::terminal_velocity`].
    pub fn terminal_velocity_at(
        &self,
        particle: &Particle,
        altitude: Meters,
        algorithm: VelocityAlgorithm,
    ) -> TransportResult<MetersPerSecond> {
        let air = self.atmosphere.air_at(altitude);
        self.solver.terminal_velocity(algorithm, particle, air)
    }
}

impl StepModel for AtmosphericDescent {
    fn step_movement(
        &self,
        particle: &Particle,
        altitude: Meters,
        algorithm: VelocityAlgorithm,
        fall_step: Meters,
        wind_speed: MetersPerSecond,
    ) -> TransportResult<StepMovement> {
        let velocity = self.terminal_velocity_at(particle, altitude, algorithm)?;
        if *velocity <= 0.0 {
            return Err(TransportError::invalid_parameter(
                "terminal_velocity",
                *velocity,
                "must be positive",
            ));
        }

        let movement = StepMovement::over(altitude, fall_step, velocity, wind_speed);
        trace!(
            "Step at {}: w={}, t={}, x={}",
            altitude,
            velocity,
            movement.fall_time,
            movement.horizontal_distance
        );
        Ok(movement)
    }
}
