//! Recorded descent of one particle

use crate::core_types::units::{Kilometers, Meters, Seconds};
use serde::{Deserialize, Serialize};

/// Particle state at the start of a step, or at landing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub altitude: Meters,
    pub elapsed_time: Seconds,
    pub distance: Meters,
}

/// Integration state and history of one particle
///
/// Owned by the caller of a simulation run. The history is append-only:
/// one sample per integration step plus one at landing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trajectory {
    current: TrajectorySample,
    history: Vec<TrajectorySample>,
}

impl Trajectory {
    /// Start a trajectory at `release_height` with no elapsed time or drift
    pub fn released_at(release_height: Meters) -> Self {
        Self {
            current: TrajectorySample {
                altitude: release_height,
                ..TrajectorySample::default()
            },
            history: Vec::new(),
        }
    }

    /// Restart the descent from `release_height`, keeping time, distance
    /// and history
    pub(crate) fn rerelease(&mut self, release_height: Meters) {
        self.current.altitude = release_height;
    }

    /// Append the current state to the history
    pub(crate) fn record(&mut self) {
        self.history.push(self.current);
    }

    /// Advance by one step. The altitude never goes below zero.
    pub(crate) fn advance(&mut self, fall_step: Meters, fall_time: Seconds, distance: Meters) {
        let applied_step = fall_step.min(self.current.altitude);
        self.current.altitude -= applied_step;
        self.current.elapsed_time += fall_time;
        self.current.distance += distance;
    }

    /// Whether the particle is still above the ground
    pub fn is_airborne(&self) -> bool {
        *self.current.altitude > 0.0
    }

    /// Current state
    pub fn current(&self) -> TrajectorySample {
        self.current
    }

    /// Every recorded sample, oldest first
    pub fn history(&self) -> &[TrajectorySample] {
        &self.history
    }

    /// Number of integration steps recorded (landing sample excluded)
    pub fn step_count(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Total horizontal drift
    pub fn distance(&self) -> Meters {
        self.current.distance
    }

    /// Total horizontal drift in kilometers
    pub fn distance_km(&self) -> Kilometers {
        self.current.distance.to_kilometers()
    }

    /// Total fall time
    pub fn elapsed_time(&self) -> Seconds {
        self.current.elapsed_time
    }

    /// Recorded altitudes
    pub fn altitudes(&self) -> Vec<Meters> {
        self.history.iter().map(|s| s.altitude).collect()
    }

    /// Recorded elapsed times
    pub fn elapsed_times(&self) -> Vec<Seconds> {
        self.history.iter().map(|s| s.elapsed_time).collect()
    }

    /// Recorded distances
    pub fn distances(&self) -> Vec<Meters> {
        self.history.iter().map(|s| s.distance).collect()
    }
}
