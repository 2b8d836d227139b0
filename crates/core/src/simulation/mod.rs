//! Stepwise descent of ash particles from release to the ground
//!
//! [`TrajectorySimulator`] walks a particle down from its release height in
//! fixed vertical steps. At each step it asks a [`StepModel`] for the fall
//! time and wind drift, records the particle's state, and advances:
//!
//! ```text
//! while altitude > 0:
//!     record (altitude, time, distance)
//!     (t, x) = step_model(particle, altitude, algorithm, fall_step, wind)
//!     altitude -= min(fall_step, altitude); time += t; distance += x
//! record landing
//! ```
//!
//! The loop always terminates: configuration validation guarantees every
//! step lowers the altitude, and the last step is clipped to land exactly at
//! zero. A failed step aborts the whole run;
//! there is no partial result.
//!
//! Particles are independent, so populations are simulated in parallel with
//! rayon (see [`TrajectorySimulator::simulate_population`]).

mod batch;
pub mod config;
pub mod step;
pub mod trajectory;

pub use batch::TransportDistance;
pub use config::SimulationConfig;
pub use step::{AtmosphericDescent, StepModel, StepMovement};
pub use trajectory::{Trajectory, TrajectorySample};

use crate::core_types::error::TransportResult;
use crate::core_types::units::Kilometers;
use crate::core_types::Particle;
use tracing::info;

/// Integrates particle trajectories under one configuration
///
/// Holds no per-particle state; `simulate` takes `&self` and may run on many
/// threads at once.
///
/// # Example
///
/// ```
/// use tephra_sim_core::core_types::{Meters, Particle};
/// use tephra_sim_core::simulation::{SimulationConfig, TrajectorySimulator};
///
/// let config = SimulationConfig::default().with_release_height(Meters::new(1000.0));
/// let simulator = TrajectorySimulator::new(config).unwrap();
/// let particle = Particle::with_diameter(Meters::from_microns(100.0)).unwrap();
///
/// let trajectory = simulator.simulate(&particle).unwrap();
/// assert_eq!(trajectory.history().len(), 101);
/// assert!(*trajectory.distance_km() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct TrajectorySimulator<M: StepModel = AtmosphericDescent> {
    config: SimulationConfig,
    step_model: M,
}

impl TrajectorySimulator<AtmosphericDescent> {
    /// Simulator over the ICAO standard atmosphere with default solver
    /// constants.
    ///
    /// # Errors
    ///
    /// See [`SimulationConfig::validate`].
    pub fn new(config: SimulationConfig) -> TransportResult<Self> {
        Self::with_step_model(config, AtmosphericDescent::default())
    }
}

impl<M: StepModel> TrajectorySimulator<M> {
    /// Simulator with a custom step model.
    ///
    /// # Errors
    ///
    /// See [`SimulationConfig::validate`].
    pub fn with_step_model(config: SimulationConfig, step_model: M) -> TransportResult<Self> {
        config.validate()?;
        Ok(Self { config, step_model })
    }

    /// Run configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Step model
    pub fn step_model(&self) -> &M {
        &self.step_model
    }

    /// Integrate `particle` from the release height to the ground.
    ///
    /// # Errors
    ///
    /// The first error any step reports; the partial trajectory is dropped.
    pub fn simulate(&self, particle: &Particle) -> TransportResult<Trajectory> {
        self.resume(particle, Trajectory::default())
    }

    /// Integrate `particle` again on top of an existing trajectory.
    ///
    /// The particle is re-released at the configured height; elapsed time,
    /// distance and history carry over and new samples are appended.
    ///
    /// # Errors
    ///
    /// The first error any step reports.
    pub fn resume(
        &self,
        particle: &Particle,
        mut trajectory: Trajectory,
    ) -> TransportResult<Trajectory> {
        let config = &self.config;
        info!(
            "Releasing {:.1} µm particle at {} ({} algorithm, wind {}, step {})",
            *particle.diameter() * 1e6,
            config.release_height,
            config.algorithm,
            config.wind_speed,
            config.fall_step
        );

        trajectory.rerelease(config.release_height);
        while trajectory.is_airborne() {
            trajectory.record();

            let altitude = trajectory.current().altitude;
            let movement = self.step_model.step_movement(
                particle,
                altitude,
                config.algorithm,
                config.fall_step,
                config.wind_speed,
            )?;
            trajectory.advance(config.fall_step, movement.fall_time, movement.horizontal_distance);
        }
        trajectory.record();

        info!(
            "Landed after {} steps: t={}, distance={}",
            trajectory.step_count(),
            trajectory.elapsed_time(),
            trajectory.distance()
        );
        Ok(trajectory)
    }

    /// Horizontal transport distance of `particle`.
    ///
    /// # Errors
    ///
    /// See [`TrajectorySimulator::simulate`].
    pub fn distance(&self, particle: &Particle) -> TransportResult<Kilometers> {
        Ok(self.simulate(particle)?.distance_km())
    }
}
