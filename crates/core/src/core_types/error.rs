//! Error types for the ash transport model
//!
//! Every failure is local and synchronous: it is reported to the immediate
//! caller and never retried. A fixed-point solve that failed once fails again
//! with the same inputs.

use crate::physics::fall_velocity::VelocityAlgorithm;
use std::fmt;
use thiserror::Error;

/// Result alias used by every fallible operation in the crate
pub type TransportResult<T> = Result<T, TransportError>;

/// Which end-member bound a non-physical density violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityBound {
    /// Denser than non-vesicular glass
    AboveGlass,
    /// Lighter than the surrounding air
    BelowAtmosphere,
}

impl fmt::Display for DensityBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AboveGlass => write!(f, "more than glass density"),
            Self::BelowAtmosphere => write!(f, "less than atmosphere density"),
        }
    }
}

/// Errors raised by atmosphere, fall velocity, density and trajectory code
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// Algorithm selector text did not name a known velocity algorithm.
    #[error(
        "Velocity function must be ganser, stokes, stokes_sea_level or white. '{name}' given."
    )]
    UnknownVelocityAlgorithm { name: String },

    /// Bulk density outside the air..glass range, so no solidity exists.
    #[error("Particle density ({density}) is {bound} ({limit})")]
    NonPhysicalDensity {
        density: f64,
        limit: f64,
        bound: DensityBound,
    },

    /// Fixed-point fall velocity iteration hit its iteration cap.
    #[error(
        "{algorithm} fall velocity did not converge within {iterations} iterations \
         (last change {last_change:e} m/s)"
    )]
    ConvergenceFailure {
        algorithm: VelocityAlgorithm,
        iterations: usize,
        last_change: f64,
    },

    /// Input outside the physical domain of the model.
    #[error("Parameter '{name}' {constraint}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },
}

impl TransportError {
    /// Create error for an unrecognized velocity algorithm name.
    ///
    /// # Arguments
    /// * `name` - The offending selector text
    pub fn unknown_algorithm(name: &str) -> Self {
        Self::UnknownVelocityAlgorithm {
            name: name.to_owned(),
        }
    }

    /// Create error for a parameter outside its valid domain.
    ///
    /// # Arguments
    /// * `name` - Parameter name (e.g., `"diameter"`, `"sphericity"`)
    /// * `value` - The invalid value
    /// * `constraint` - Description of the constraint (e.g., `"must be positive"`)
    pub fn invalid_parameter(name: &'static str, value: f64, constraint: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            constraint,
        }
    }

    /// Create error for a density denser than the glass end-member.
    pub fn above_glass(density: f64, glass: f64) -> Self {
        Self::NonPhysicalDensity {
            density,
            limit: glass,
            bound: DensityBound::AboveGlass,
        }
    }

    /// Create error for a density lighter than the atmosphere end-member.
    pub fn below_atmosphere(density: f64, atmosphere: f64) -> Self {
        Self::NonPhysicalDensity {
            density,
            limit: atmosphere,
            bound: DensityBound::BelowAtmosphere,
        }
    }
}

/// Check that `value` is finite and strictly positive.
///
/// # Errors
///
/// [`TransportError::InvalidParameter`] naming `name` otherwise.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> TransportResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TransportError::invalid_parameter(
            name,
            value,
            "must be finite and positive",
        ))
    }
}

/// Check that `value` is finite and not negative.
///
/// # Errors
///
/// [`TransportError::InvalidParameter`] naming `name` otherwise.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> TransportResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TransportError::invalid_parameter(
            name,
            value,
            "must be finite and non-negative",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_algorithm_names_value() {
        let err = TransportError::unknown_algorithm("stoke");
        assert!(err.to_string().contains("'stoke'"));
    }

    #[test]
    fn test_non_physical_density_message() {
        let err = TransportError::above_glass(9999.0, 2300.0);
        assert_eq!(
            err.to_string(),
            "Particle density (9999) is more than glass density (2300)"
        );

        let err = TransportError::below_atmosphere(0.1, 1.225);
        assert!(err.to_string().contains("less than atmosphere density"));
    }

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("diameter", 1e-4), Ok(1e-4));
        assert!(ensure_positive("diameter", 0.0).is_err());
        assert!(ensure_positive("diameter", f64::NAN).is_err());
        assert!(ensure_non_negative("release_height", 0.0).is_ok());
        assert!(ensure_non_negative("release_height", -1.0).is_err());
    }
}
