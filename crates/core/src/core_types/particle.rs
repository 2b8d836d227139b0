//! Volcanic ash particle parameters
//!
//! A [`Particle`] only carries the grain's physical properties. Trajectory
//! state lives in the [`Trajectory`](crate::simulation::Trajectory) value a
//! simulation run returns, so a particle can be shared between threads and
//! simulated any number of times.

use crate::core_types::error::{ensure_positive, TransportError, TransportResult};
use crate::core_types::units::{KgPerCubicMeter, Meters};
use crate::physics::density::SizeDensityRule;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An ash grain falling through the atmosphere
///
/// # Physics Properties
///
/// - **Diameter**: volume-equivalent sphere diameter, > 0
/// - **Sphericity**: surface area of the volume-equivalent sphere over the
///   actual surface area, 0 < ψ ≤ 1 (0.7 is typical for ash)
/// - **Density**: bulk density including vesicles (2300 kg/m³ for andesite
///   glass by default)
///
/// # Example
///
/// ```
/// use tephra_sim_core::core_types::{Meters, Particle};
///
/// let particle = Particle::with_diameter(Meters::from_microns(100.0)).unwrap();
/// assert_eq!(particle.sphericity(), 0.7);
/// assert_eq!(*particle.density(), 2300.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    diameter: Meters,
    sphericity: f64,
    density: KgPerCubicMeter,
}

impl Particle {
    /// Default sphericity for volcanic ash
    pub const DEFAULT_SPHERICITY: f64 = 0.7;

    /// Default bulk density (kg/m³)
    pub const DEFAULT_DENSITY: KgPerCubicMeter = KgPerCubicMeter::new(2300.0);

    /// Create a particle with explicit shape and density.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidParameter`] when the diameter or density is
    /// not positive, or the sphericity lies outside (0, 1].
    pub fn new(
        diameter: Meters,
        sphericity: f64,
        density: KgPerCubicMeter,
    ) -> TransportResult<Self> {
        ensure_positive("diameter", *diameter)?;
        ensure_positive("density", *density)?;
        if sphericity.is_nan() || sphericity <= 0.0 || sphericity > 1.0 {
            return Err(TransportError::invalid_parameter(
                "sphericity",
                sphericity,
                "must lie in (0, 1]",
            ));
        }

        Ok(Self {
            diameter,
            sphericity,
            density,
        })
    }

    /// Create a particle with the default sphericity and density.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidParameter`] when the diameter is not positive.
    pub fn with_diameter(diameter: Meters) -> TransportResult<Self> {
        Self::new(diameter, Self::DEFAULT_SPHERICITY, Self::DEFAULT_DENSITY)
    }

    /// Replace the bulk density with the size-dependent value of `rule`.
    ///
    /// Done once, before any trajectory is integrated.
    ///
    /// # Errors
    ///
    /// Propagates [`TransportError::InvalidParameter`] from the rule when its
    /// end-member densities are not positive.
    pub fn set_size_dependent_density(&mut self, rule: &SizeDensityRule) -> TransportResult<()> {
        let density = rule.density_for(self.diameter)?;
        debug!(
            "Size-dependent density for {:.1} µm particle: {} -> {}",
            *self.diameter * 1e6,
            self.density,
            density
        );
        self.density = density;
        Ok(())
    }

    /// Builder form of [`Particle::set_size_dependent_density`].
    ///
    /// # Errors
    ///
    /// See [`Particle::set_size_dependent_density`].
    pub fn with_size_dependent_density(mut self, rule: &SizeDensityRule) -> TransportResult<Self> {
        self.set_size_dependent_density(rule)?;
        Ok(self)
    }

    /// Particle diameter
    pub fn diameter(&self) -> Meters {
        self.diameter
    }

    /// Particle sphericity (dimensionless)
    pub fn sphericity(&self) -> f64 {
        self.sphericity
    }

    /// Particle bulk density
    pub fn density(&self) -> KgPerCubicMeter {
        self.density
    }
}
