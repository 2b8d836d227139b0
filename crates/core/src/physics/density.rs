//! Grain-size dependent bulk density and solidity
//!
//! Coarse pumiceous clasts are full of vesicles; fine ash is mostly broken
//! bubble walls and approaches the density of solid glass. Bonadonna &
//! Phillips (2003) model this as a linear change on the phi scale between a
//! pumice end-member above 2 mm (phi = -1) and a glass end-member below 8 µm
//! (phi = 7):
//!
//! ```text
//! phi = -log2(d / 1 mm)
//! ρ(phi) = ρ_glass                                           phi > 7
//!        = ρ_glass + (phi - 7) / (-1 - 7) · (ρ_pumice - ρ_glass)   -1 ≤ phi ≤ 7
//!        = ρ_pumice                                          phi < -1
//! ```
//!
//! Solidity is the volume fraction of solid material, from a linear mix of
//! glass and air: `X = (ρ - ρ_air) / (ρ_glass - ρ_air)`.
//!
//! # Example Densities
//!
//! | Composition | Eruption      | Pumice (kg/m³) | Glass (kg/m³) |
//! |-------------|---------------|----------------|---------------|
//! | Rhyolite    | Askja 1875    | 440            | 2300          |
//! | Dacite      | Quizapú 1932  | 655            | 2400          |
//! | Andesite    | Hudson 1991   | 1000           | 2600          |
//!
//! # Scientific References
//!
//! - Bonadonna, C. & Phillips, J.C. (2003). "Sedimentation from strong
//!   volcanic plumes." J. Geophys. Res. 108(B7), 2340.

use crate::core_types::error::{ensure_positive, TransportError, TransportResult};
use crate::core_types::units::{KgPerCubicMeter, Meters};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Phi of the glass end-member (8 µm)
const PHI_GLASS: f64 = 7.0;
/// Phi of the pumice end-member (2 mm)
const PHI_PUMICE: f64 = -1.0;

/// Grain size on the phi scale, phi = -log2(d in mm)
///
/// # Errors
///
/// [`TransportError::InvalidParameter`] when the diameter is not positive.
pub fn phi_from_diameter(diameter: Meters) -> TransportResult<f64> {
    ensure_positive("diameter", *diameter)?;
    Ok(-diameter.to_millimeters().log2())
}

/// Bonadonna & Phillips (2003) size-dependent density rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeDensityRule {
    /// Density of coarse pumice (phi < -1)
    pub pumice_density: KgPerCubicMeter,
    /// Density of fine glassy ash (phi > 7)
    pub glass_density: KgPerCubicMeter,
}

impl Default for SizeDensityRule {
    /// Askja 1875 rhyolite
    fn default() -> Self {
        Self::rhyolite()
    }
}

impl SizeDensityRule {
    /// Create a rule from explicit end-member densities
    pub const fn new(pumice_density: KgPerCubicMeter, glass_density: KgPerCubicMeter) -> Self {
        Self {
            pumice_density,
            glass_density,
        }
    }

    /// Askja 1875 rhyolite: 440 / 2300 kg/m³
    pub const fn rhyolite() -> Self {
        Self::new(KgPerCubicMeter::new(440.0), KgPerCubicMeter::new(2300.0))
    }

    /// Quizapú 1932 dacite: 655 / 2400 kg/m³
    pub const fn dacite() -> Self {
        Self::new(KgPerCubicMeter::new(655.0), KgPerCubicMeter::new(2400.0))
    }

    /// Hudson 1991 andesite: 1000 / 2600 kg/m³
    pub const fn andesite() -> Self {
        Self::new(KgPerCubicMeter::new(1000.0), KgPerCubicMeter::new(2600.0))
    }

    /// Bulk density of a grain of `diameter`.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidParameter`] when the diameter or either
    /// end-member density is not positive.
    pub fn density_for(&self, diameter: Meters) -> TransportResult<KgPerCubicMeter> {
        ensure_positive("pumice_density", *self.pumice_density)?;
        ensure_positive("glass_density", *self.glass_density)?;
        let phi = phi_from_diameter(diameter)?;

        let density = if phi > PHI_GLASS {
            self.glass_density
        } else if phi < PHI_PUMICE {
            self.pumice_density
        } else {
            let fraction = (phi - PHI_GLASS) / (PHI_PUMICE - PHI_GLASS);
            KgPerCubicMeter::new(
                *self.glass_density + fraction * (*self.pumice_density - *self.glass_density),
            )
        };
        Ok(density)
    }
}

/// Linear glass-air mixing scale for solidity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolidityScale {
    /// Density of solid glass (solidity 1)
    pub glass_density: KgPerCubicMeter,
    /// Density of the atmosphere (solidity 0)
    pub atmosphere_density: KgPerCubicMeter,
}

impl Default for SolidityScale {
    /// Askja rhyolite glass in sea-level air
    fn default() -> Self {
        Self::new(KgPerCubicMeter::new(2300.0), KgPerCubicMeter::new(1.225))
    }
}

impl SolidityScale {
    /// Create a scale from explicit end-members
    pub const fn new(glass_density: KgPerCubicMeter, atmosphere_density: KgPerCubicMeter) -> Self {
        Self {
            glass_density,
            atmosphere_density,
        }
    }

    /// Solidity of a particle of bulk `density`.
    ///
    /// # Errors
    ///
    /// [`TransportError::NonPhysicalDensity`] when `density` lies above the
    /// glass end-member or below the atmosphere end-member, and
    /// [`TransportError::InvalidParameter`] when the end-members coincide.
    pub fn solidity(&self, density: KgPerCubicMeter) -> TransportResult<f64> {
        if density > self.glass_density {
            warn!("Density {} exceeds glass end-member {}", density, self.glass_density);
            return Err(TransportError::above_glass(*density, *self.glass_density));
        }
        if density < self.atmosphere_density {
            warn!(
                "Density {} is below atmosphere end-member {}",
                density, self.atmosphere_density
            );
            return Err(TransportError::below_atmosphere(
                *density,
                *self.atmosphere_density,
            ));
        }

        let span = *self.glass_density - *self.atmosphere_density;
        ensure_positive("glass_density - atmosphere_density", span)?;
        Ok((*density - *self.atmosphere_density) / span)
    }

    /// Solidity of every density in `densities`, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first density [`SolidityScale::solidity`] rejects.
    pub fn convert(&self, densities: &[KgPerCubicMeter]) -> TransportResult<Vec<f64>> {
        densities
            .iter()
            .map(|&density| self.solidity(density))
            .collect()
    }
}
