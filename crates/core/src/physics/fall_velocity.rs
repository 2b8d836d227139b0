//! Terminal fall velocity of ash particles
//!
//! Converts particle and air properties into the speed at which gravity,
//! buoyancy and drag balance. Three laws are provided:
//!
//! 1. **Stokes** - closed-form creeping-flow law, valid for Re ≪ 1
//! 2. **Ganser** - shape-corrected drag correlation, iterated to a fixed point
//! 3. **White** - two-constant empirical drag law, iterated to a fixed point
//!
//! Both iterative laws seed from the Stokes velocity and repeat
//! Reynolds number → drag coefficient → force balance until the velocity
//! changes by no more than the solver tolerance (1e-6 m/s). The loop is
//! capped; hitting the cap is a [`TransportError::ConvergenceFailure`].
//!
//! # Force Balance
//!
//! ```text
//! w = sqrt(4·d·g·(ρp - ρa) / (3·Cd·ρa))
//! ```
//!
//! # Scientific References
//!
//! - Stokes, G.G. (1851). "On the effect of the internal friction of fluids on
//!   the motion of pendulums." Trans. Cambridge Phil. Soc. 9, 8-106.
//! - Ganser, G.H. (1993). "A rational approach to drag prediction of spherical
//!   and nonspherical particles." Powder Technology 77(2), 143-152.
//! - White, F.M. (1974). "Viscous Fluid Flow." McGraw-Hill.
//! - Stevenson, J.A. et al. (2015). "Big grains go far: understanding the
//!   discrepancy between tephrochronology and satellite infrared measurements
//!   of volcanic ash." Atmos. Meas. Tech. 8, 2069-2091.

use crate::atmosphere::AirProperties;
use crate::core_types::error::{ensure_positive, TransportError, TransportResult};
use crate::core_types::units::{KgPerCubicMeter, Meters, MetersPerSecond};
use crate::core_types::Particle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// Terminal velocity law selector
///
/// Parsed from its `snake_case` name when it arrives as text; anything else is
/// a [`TransportError::UnknownVelocityAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityAlgorithm {
    /// Ganser (1993) drag with sphericity shape factors
    #[default]
    Ganser,
    /// Stokes' law with the local air properties
    Stokes,
    /// Stokes' law with sea-level reference air at every altitude
    StokesSeaLevel,
    /// White (1974) two-constant drag law
    White,
}

impl VelocityAlgorithm {
    /// Every variant, in declaration order
    pub const ALL: [VelocityAlgorithm; 4] = [
        VelocityAlgorithm::Ganser,
        VelocityAlgorithm::Stokes,
        VelocityAlgorithm::StokesSeaLevel,
        VelocityAlgorithm::White,
    ];

    /// Selector name as accepted by `FromStr`
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ganser => "ganser",
            Self::Stokes => "stokes",
            Self::StokesSeaLevel => "stokes_sea_level",
            Self::White => "white",
        }
    }
}

impl FromStr for VelocityAlgorithm {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| TransportError::unknown_algorithm(s))
    }
}

impl fmt::Display for VelocityAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Solver constants
///
/// Gravity and the reference atmosphere are configuration rather than
/// globals, so a solver can be evaluated against any atmosphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Air used by `StokesSeaLevel` and as the default surrounding air
    pub reference_air: AirProperties,
    /// Convergence threshold on the velocity change between iterations (m/s)
    pub tolerance: f64,
    /// Iteration cap for the fixed-point laws
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gravity: 9.80665,
            reference_air: AirProperties::sea_level(),
            tolerance: 1e-6,
            max_iterations: 1000,
        }
    }
}

impl SolverConfig {
    /// Set the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance (m/s)
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidParameter`] for a non-positive gravity,
    /// tolerance, iteration cap or reference air property.
    pub fn validate(&self) -> TransportResult<()> {
        ensure_positive("gravity", self.gravity)?;
        ensure_positive("tolerance", self.tolerance)?;
        ensure_positive("reference_air.density", *self.reference_air.density)?;
        ensure_positive("reference_air.viscosity", *self.reference_air.viscosity)?;
        if self.max_iterations == 0 {
            return Err(TransportError::invalid_parameter(
                "max_iterations",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Ganser (1993) shape correction constants
///
/// ```text
/// K1 = 3 / (1 + 2·ψ^-0.5)                  (Stokes regime)
/// K2 = 10^(1.8148·(-log10 ψ)^0.5743)        (Newton regime)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFactors {
    pub k1: f64,
    pub k2: f64,
}

impl ShapeFactors {
    /// Shape factors for a sphericity in (0, 1]
    pub fn from_sphericity(sphericity: f64) -> Self {
        let k1 = 3.0 / (1.0 + 2.0 * sphericity.powf(-0.5));
        // log10(1/ψ) rather than -log10(ψ) keeps ψ = 1 at +0.0
        let k2 = 10f64.powf(1.8148 * sphericity.recip().log10().powf(0.5743));
        Self { k1, k2 }
    }

    /// Ganser drag coefficient at Reynolds number `reynolds`
    pub fn drag_coefficient(&self, reynolds: f64) -> f64 {
        let re_k = reynolds * self.k1 * self.k2;
        (24.0 / re_k * (1.0 + 0.1118 * re_k.powf(0.6567)) + 0.4345 / (1.0 + 3305.0 / re_k))
            * self.k2
    }
}

/// White (1974) drag coefficient, Cd = 0.25 + 24/Re + 6/(1 + √Re)
pub fn white_drag_coefficient(reynolds: f64) -> f64 {
    const C1: f64 = 0.25;
    const C2: f64 = 6.0;
    C1 + 24.0 / reynolds + C2 / (1.0 + reynolds.sqrt())
}

/// Particle Reynolds number, Re = d·w·ρa / μ
pub fn reynolds_number(diameter: Meters, velocity: MetersPerSecond, air: AirProperties) -> f64 {
    *diameter * *velocity * *air.density / *air.viscosity
}

/// Terminal fall velocity calculator
///
/// Stateless apart from its [`SolverConfig`]; every method is a pure function
/// of its arguments and can be called from many threads at once.
///
/// # Example
///
/// ```
/// use tephra_sim_core::atmosphere::AirProperties;
/// use tephra_sim_core::core_types::{KgPerCubicMeter, Meters, PascalSeconds};
/// use tephra_sim_core::physics::fall_velocity::FallVelocitySolver;
///
/// let solver = FallVelocitySolver::default();
/// let air = AirProperties::new(KgPerCubicMeter::new(1.2), PascalSeconds::new(1.82e-5));
/// let w = solver
///     .ganser(Meters::from_microns(100.0), 0.7, KgPerCubicMeter::new(2300.0), air)
///     .unwrap();
/// assert!((*w - 0.4035).abs() < 0.002);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FallVelocitySolver {
    config: SolverConfig,
}

impl FallVelocitySolver {
    /// Create a solver with explicit constants.
    ///
    /// # Errors
    ///
    /// See [`SolverConfig::validate`].
    pub fn new(config: SolverConfig) -> TransportResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Solver constants
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Terminal velocity of `particle` in `air` using `algorithm`.
    ///
    /// `StokesSeaLevel` ignores `air` and uses the configured reference air.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidParameter`] for non-physical inputs and
    /// [`TransportError::ConvergenceFailure`] when an iterative law hits the
    /// iteration cap.
    pub fn terminal_velocity(
        &self,
        algorithm: VelocityAlgorithm,
        particle: &Particle,
        air: AirProperties,
    ) -> TransportResult<MetersPerSecond> {
        let diameter = particle.diameter();
        let density = particle.density();
        match algorithm {
            VelocityAlgorithm::Ganser => self.ganser(diameter, particle.sphericity(), density, air),
            VelocityAlgorithm::Stokes => self.stokes(diameter, density, air),
            VelocityAlgorithm::StokesSeaLevel => {
                self.stokes(diameter, density, self.config.reference_air)
            }
            VelocityAlgorithm::White => self.white(diameter, density, air),
        }
    }

    /// Stokes' law terminal velocity
    ///
    /// ```text
    /// w = (1/18) · (ρp - ρa) / μ · g · d²
    /// ```
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidParameter`] for a non-positive diameter or air
    /// property, or a particle no denser than the air.
    pub fn stokes(
        &self,
        diameter: Meters,
        density: KgPerCubicMeter,
        air: AirProperties,
    ) -> TransportResult<MetersPerSecond> {
        validate_inputs(diameter, density, air)?;
        Ok(self.stokes_velocity(diameter, density, air))
    }

    /// Ganser (1993) terminal velocity for a particle of given sphericity.
    ///
    /// # Errors
    ///
    /// As [`FallVelocitySolver::stokes`], plus a sphericity outside (0, 1]
    /// and [`TransportError::ConvergenceFailure`].
    pub fn ganser(
        &self,
        diameter: Meters,
        sphericity: f64,
        density: KgPerCubicMeter,
        air: AirProperties,
    ) -> TransportResult<MetersPerSecond> {
        validate_inputs(diameter, density, air)?;
        if sphericity.is_nan() || sphericity <= 0.0 || sphericity > 1.0 {
            return Err(TransportError::invalid_parameter(
                "sphericity",
                sphericity,
                "must lie in (0, 1]",
            ));
        }

        let shape = ShapeFactors::from_sphericity(sphericity);
        self.iterate(VelocityAlgorithm::Ganser, diameter, density, air, |re| {
            shape.drag_coefficient(re)
        })
    }

    /// White (1974) terminal velocity.
    ///
    /// # Errors
    ///
    /// As [`FallVelocitySolver::stokes`], plus
    /// [`TransportError::ConvergenceFailure`].
    pub fn white(
        &self,
        diameter: Meters,
        density: KgPerCubicMeter,
        air: AirProperties,
    ) -> TransportResult<MetersPerSecond> {
        validate_inputs(diameter, density, air)?;
        self.iterate(
            VelocityAlgorithm::White,
            diameter,
            density,
            air,
            white_drag_coefficient,
        )
    }

    fn stokes_velocity(
        &self,
        diameter: Meters,
        density: KgPerCubicMeter,
        air: AirProperties,
    ) -> MetersPerSecond {
        let d = *diameter;
        MetersPerSecond::new(
            (1.0 / 18.0) * (*density - *air.density) / *air.viscosity * self.config.gravity * d * d,
        )
    }

    /// Fixed-point iteration shared by the drag-correlation laws
    fn iterate(
        &self,
        algorithm: VelocityAlgorithm,
        diameter: Meters,
        density: KgPerCubicMeter,
        air: AirProperties,
        drag_coefficient: impl Fn(f64) -> f64,
    ) -> TransportResult<MetersPerSecond> {
        let buoyant_weight = 4.0 * *diameter * self.config.gravity * (*density - *air.density);

        // First guess is Stokes'
        let mut velocity = self.stokes_velocity(diameter, density, air);
        let mut change = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            let reynolds = reynolds_number(diameter, velocity, air);
            if !(reynolds.is_finite() && reynolds > 0.0) {
                return Err(TransportError::invalid_parameter(
                    "reynolds_number",
                    reynolds,
                    "must be finite and positive",
                ));
            }

            let drag = drag_coefficient(reynolds);
            let new_velocity =
                MetersPerSecond::new((buoyant_weight / (3.0 * drag * *air.density)).sqrt());
            change = *velocity - *new_velocity;
            velocity = new_velocity;

            trace!(
                "{} iteration {}: Re={:.4e}, Cd={:.4}, w={}",
                algorithm,
                iteration,
                reynolds,
                drag,
                velocity
            );

            if change.abs() <= self.config.tolerance {
                debug!("{} converged after {} iterations: w={}", algorithm, iteration, velocity);
                return Ok(velocity);
            }
        }

        warn!(
            "{} fall velocity for d={} did not converge after {} iterations (last change {:e} m/s)",
            algorithm, diameter, self.config.max_iterations, change
        );
        Err(TransportError::ConvergenceFailure {
            algorithm,
            iterations: self.config.max_iterations,
            last_change: change,
        })
    }
}

/// Domain checks shared by every law
fn validate_inputs(
    diameter: Meters,
    density: KgPerCubicMeter,
    air: AirProperties,
) -> TransportResult<()> {
    ensure_positive("diameter", *diameter)?;
    ensure_positive("density", *density)?;
    ensure_positive("atm_density", *air.density)?;
    ensure_positive("atm_viscosity", *air.viscosity)?;
    if density <= air.density {
        return Err(TransportError::invalid_parameter(
            "density",
            *density,
            "must exceed the surrounding air density",
        ));
    }
    Ok(())
}
