//! Parallel simulation of particle populations

use super::{StepModel, Trajectory, TrajectorySimulator};
use crate::core_types::error::TransportResult;
use crate::core_types::units::{Kilometers, Meters};
use crate::core_types::Particle;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Landing distance of one particle size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportDistance {
    pub diameter: Meters,
    pub distance: Kilometers,
}

impl<M: StepModel> TrajectorySimulator<M> {
    /// Simulate every particle independently, in parallel.
    ///
    /// Results are in input order. A failed particle does not stop the
    /// others.
    pub fn simulate_population(&self, particles: &[Particle]) -> Vec<TransportResult<Trajectory>> {
        info!("Simulating {} particles", particles.len());

        let results: Vec<_> = particles
            .par_iter()
            .map(|particle| self.simulate(particle))
            .collect();

        let failures = results.iter().filter(|result| result.is_err()).count();
        if failures > 0 {
            warn!("{} of {} particles failed to land", failures, particles.len());
        }
        results
    }

    /// Transport distance for each particle, in input order.
    ///
    /// # Errors
    ///
    /// The first failure in input order.
    pub fn transport_distances(
        &self,
        particles: &[Particle],
    ) -> TransportResult<Vec<TransportDistance>> {
        self.simulate_population(particles)
            .into_iter()
            .zip(particles)
            .map(|(result, particle)| {
                Ok(TransportDistance {
                    diameter: particle.diameter(),
                    distance: result?.distance_km(),
                })
            })
            .collect()
    }
}
