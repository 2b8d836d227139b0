//! Trajectory run configuration

use crate::core_types::error::{
    ensure_non_negative, ensure_positive, TransportError, TransportResult,
};
use crate::core_types::units::{Meters, MetersPerSecond};
use crate::physics::fall_velocity::VelocityAlgorithm;
use serde::{Deserialize, Serialize};

/// Release and transport conditions for one trajectory run
///
/// Wind is a single constant horizontal speed; a negative speed drifts the
/// particle the other way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Altitude the particle is released at
    pub release_height: Meters,
    /// Horizontal wind speed
    pub wind_speed: MetersPerSecond,
    /// Vertical distance fallen per integration step
    pub fall_step: Meters,
    /// Terminal velocity law
    pub algorithm: VelocityAlgorithm,
}

impl Default for SimulationConfig {
    /// 10 km release, 10 m/s wind, 10 m steps, Ganser drag
    fn default() -> Self {
        Self {
            release_height: Meters::new(10000.0),
            wind_speed: MetersPerSecond::new(10.0),
            fall_step: Meters::new(10.0),
            algorithm: VelocityAlgorithm::Ganser,
        }
    }
}

impl SimulationConfig {
    /// Set the release altitude
    pub fn with_release_height(mut self, release_height: Meters) -> Self {
        self.release_height = release_height;
        self
    }

    /// Set the wind speed
    pub fn with_wind_speed(mut self, wind_speed: MetersPerSecond) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    /// Set the integration step
    pub fn with_fall_step(mut self, fall_step: Meters) -> Self {
        self.fall_step = fall_step;
        self
    }

    /// Set the terminal velocity law
    pub fn with_algorithm(mut self, algorithm: VelocityAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the terminal velocity law from its text name.
    ///
    /// # Errors
    ///
    /// [`TransportError::UnknownVelocityAlgorithm`] for an unrecognized name.
    pub fn with_algorithm_name(self, name: &str) -> TransportResult<Self> {
        Ok(self.with_algorithm(name.parse()?))
    }

    /// Number of integration steps a run will take
    pub fn step_count(&self) -> usize {
        if *self.release_height <= 0.0 {
            0
        } else {
            (*self.release_height / *self.fall_step).ceil() as usize
        }
    }

    /// Check the configuration describes a terminating run.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidParameter`] for a negative or non-finite
    /// release height, a non-positive fall step, a fall step too small to
    /// lower the release height in f64, or a non-finite wind speed.
    pub fn validate(&self) -> TransportResult<()> {
        ensure_non_negative("release_height", *self.release_height)?;
        ensure_positive("fall_step", *self.fall_step)?;
        // Altitudes only shrink from here, so one resolvable step at the
        // release height means every later step lowers the altitude too
        if *self.release_height > 0.0
            && *self.release_height - *self.fall_step >= *self.release_height
        {
            return Err(TransportError::invalid_parameter(
                "fall_step",
                *self.fall_step,
                "must lower the release height",
            ));
        }
        if !self.wind_speed.is_finite() {
            return Err(TransportError::invalid_parameter(
                "wind_speed",
                *self.wind_speed,
                "must be finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(*config.release_height, 10000.0);
        assert_eq!(*config.wind_speed, 10.0);
        assert_eq!(*config.fall_step, 10.0);
        assert_eq!(config.algorithm, VelocityAlgorithm::Ganser);
        assert!(config.validate().is_ok());
        assert_eq!(config.step_count(), 1000);
    }

    #[test]
    fn test_step_count_includes_partial_step() {
        let config = SimulationConfig::default().with_release_height(Meters::new(25.0));
        assert_eq!(config.step_count(), 3);

        let grounded = SimulationConfig::default().with_release_height(Meters::new(0.0));
        assert_eq!(grounded.step_count(), 0);
    }

    #[test]
    fn test_validate_rejects_degenerate_step() {
        let config = SimulationConfig::default().with_fall_step(Meters::new(0.0));
        assert!(matches!(
            config.validate(),
            Err(TransportError::InvalidParameter {
                name: "fall_step",
                ..
            })
        ));

        let config = SimulationConfig::default().with_release_height(Meters::new(-5.0));
        assert!(config.validate().is_err());

        let config = SimulationConfig::default().with_wind_speed(MetersPerSecond::new(f64::NAN));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_step_lost_in_rounding() {
        let config = SimulationConfig::default()
            .with_release_height(Meters::new(1e17))
            .with_fall_step(Meters::new(1.0));
        assert!(matches!(
            config.validate(),
            Err(TransportError::InvalidParameter {
                name: "fall_step",
                ..
            })
        ));

        // Same height with a step coarser than the f64 spacing is fine
        let config = config.with_fall_step(Meters::new(1e3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_algorithm_by_name() {
        let config = SimulationConfig::default().with_algorithm_name("white").unwrap();
        assert_eq!(config.algorithm, VelocityAlgorithm::White);

        let err = SimulationConfig::default()
            .with_algorithm_name("newton")
            .unwrap_err();
        assert_eq!(err, TransportError::unknown_algorithm("newton"));
    }
}
