//! ICAO standard atmosphere
//!
//! Temperature, pressure, density and dynamic viscosity as functions of
//! altitude, from the piecewise closed-form ICAO profile. Three layers are
//! modelled: the troposphere (0-11 km, linear lapse), the tropopause
//! (11-20 km, isothermal) and the lower stratosphere (above 20 km, inversion).
//! Above ~32 km the stratosphere formula is extrapolated.
//!
//! # Scientific References
//!
//! - ICAO (1993). "Manual of the ICAO Standard Atmosphere", Doc 7488/3.
//! - Viscosity law from the UK Met Office NAME dispersion model (Physics.f90).

use crate::core_types::units::{Kelvin, KgPerCubicMeter, Meters, PascalSeconds, Pascals};
use serde::{Deserialize, Serialize};

/// Viscosity at the freezing point (×1e-5 Pa·s)
const VISCOSITY_BASE: f64 = 1.718;
/// Linear temperature coefficient (×1e-5 Pa·s per K)
const VISCOSITY_LINEAR: f64 = 0.0049;
/// Quadratic correction below freezing (×1e-5 Pa·s per K²)
const VISCOSITY_QUADRATIC: f64 = 1.2e-5;
const VISCOSITY_SCALE: f64 = 1e-5;

/// Layer of the three-layer profile an altitude falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtmosphereLayer {
    /// 0 to 11 km: temperature falls linearly with height
    Troposphere,
    /// 11 to 20 km: isothermal
    Tropopause,
    /// Above 20 km: temperature rises with height
    Stratosphere,
}

/// Density and viscosity of the air surrounding a particle
///
/// The two atmosphere quantities the fall velocity solvers need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirProperties {
    pub density: KgPerCubicMeter,
    pub viscosity: PascalSeconds,
}

impl AirProperties {
    /// Create air properties from explicit values
    pub const fn new(density: KgPerCubicMeter, viscosity: PascalSeconds) -> Self {
        Self { density, viscosity }
    }

    /// Sea-level reference air: 1.225 kg/m³, 1.7915e-5 Pa·s
    pub const fn sea_level() -> Self {
        Self {
            density: KgPerCubicMeter::new(1.2250),
            viscosity: PascalSeconds::new(1.7915e-5),
        }
    }
}

impl Default for AirProperties {
    fn default() -> Self {
        Self::sea_level()
    }
}

/// Snapshot of the atmosphere at one altitude
///
/// Derived on demand, never stored by the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereState {
    pub altitude: Meters,
    pub temperature: Kelvin,
    pub pressure: Pascals,
    pub density: KgPerCubicMeter,
    pub viscosity: PascalSeconds,
}

impl AtmosphereState {
    /// Air properties at this altitude
    pub fn air(&self) -> AirProperties {
        AirProperties::new(self.density, self.viscosity)
    }
}

/// Parameters of the standard atmosphere profile
///
/// `Default` gives the ICAO values. The profile is a pure function of
/// altitude; the struct only carries its constants so that tests and callers
/// can evaluate the same formulas under a different gravity or gas constant.
///
/// # Example
///
/// ```
/// use tephra_sim_core::atmosphere::StandardAtmosphere;
/// use tephra_sim_core::core_types::Meters;
///
/// let atmosphere = StandardAtmosphere::icao();
/// let state = atmosphere.state_at(Meters::new(0.0));
/// assert!((*state.density - 1.225).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardAtmosphere {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Specific gas constant for dry air (J/(kg·K))
    pub gas_constant: f64,
    /// Temperature at mean sea level (K)
    pub sea_level_temperature: f64,
    /// Pressure at mean sea level (Pa)
    pub sea_level_pressure: f64,
    /// Temperature of the isothermal tropopause layer (K)
    pub tropopause_temperature: f64,
    /// Troposphere lapse rate (K/m, positive = cooling with height)
    pub troposphere_lapse_rate: f64,
    /// Stratosphere lapse rate (K/m, negative = warming with height)
    pub stratosphere_lapse_rate: f64,
    /// Base of the tropopause layer (m)
    pub tropopause_base: f64,
    /// Base of the stratosphere layer (m)
    pub stratosphere_base: f64,
}

impl Default for StandardAtmosphere {
    fn default() -> Self {
        Self {
            gravity: 9.80665,
            gas_constant: 287.05,
            sea_level_temperature: 288.15,
            sea_level_pressure: 101325.0,
            tropopause_temperature: 216.65,
            troposphere_lapse_rate: 0.0065,
            stratosphere_lapse_rate: -0.001,
            tropopause_base: 11000.0,
            stratosphere_base: 20000.0,
        }
    }
}

impl StandardAtmosphere {
    /// The ICAO standard atmosphere
    pub fn icao() -> Self {
        Self::default()
    }

    /// Layer containing `altitude`. Boundaries belong to the upper layer.
    pub fn layer_at(&self, altitude: Meters) -> AtmosphereLayer {
        if *altitude < self.tropopause_base {
            AtmosphereLayer::Troposphere
        } else if *altitude < self.stratosphere_base {
            AtmosphereLayer::Tropopause
        } else {
            AtmosphereLayer::Stratosphere
        }
    }

    /// Temperature and pressure at `altitude`
    ///
    /// ```text
    /// Troposphere:  T = T0 - L·h           P = P0 · (1 - L·h / T0)^(g / (R·L))
    /// Tropopause:   T = T11                 P = P11 · exp(-g·(h - h11) / (R·T11))
    /// Stratosphere: T = T11 - L'·(h - h20)  P = P20 · (1 - L'·(h - h20) / T11)^(g / (R·L'))
    /// ```
    ///
    /// The anchor pressures P11 and P20 come from evaluating the layer below
    /// at its top boundary, so pressure is continuous across layers.
    pub fn temperature_and_pressure(&self, altitude: Meters) -> (Kelvin, Pascals) {
        let h = *altitude;
        let (temperature, pressure) = match self.layer_at(altitude) {
            AtmosphereLayer::Troposphere => self.troposphere(h),
            AtmosphereLayer::Tropopause => self.tropopause(h),
            AtmosphereLayer::Stratosphere => self.stratosphere(h),
        };
        (Kelvin::new(temperature), Pascals::new(pressure))
    }

    /// Temperature at `altitude`
    pub fn temperature(&self, altitude: Meters) -> Kelvin {
        self.temperature_and_pressure(altitude).0
    }

    /// Pressure at `altitude`
    pub fn pressure(&self, altitude: Meters) -> Pascals {
        self.temperature_and_pressure(altitude).1
    }

    /// Air density at `altitude` from the ideal gas law, ρ = P / (R·T)
    pub fn density(&self, altitude: Meters) -> KgPerCubicMeter {
        let (temperature, pressure) = self.temperature_and_pressure(altitude);
        KgPerCubicMeter::new(*pressure / (self.gas_constant * *temperature))
    }

    /// Dynamic viscosity of air at `altitude`
    pub fn viscosity(&self, altitude: Meters) -> PascalSeconds {
        Self::viscosity_at_temperature(self.temperature(altitude))
    }

    /// Dynamic viscosity of air at `temperature`
    ///
    /// Piecewise in temperature about the freezing point:
    ///
    /// ```text
    /// T > 273.15 K:  μ = (1.718 + 0.0049·ΔT) × 1e-5
    /// T ≤ 273.15 K:  μ = (1.718 + 0.0049·ΔT - 1.2e-5·ΔT²) × 1e-5
    /// ```
    /// where ΔT = T - 273.15.
    pub fn viscosity_at_temperature(temperature: Kelvin) -> PascalSeconds {
        let delta = *temperature - *Kelvin::FREEZING_POINT;
        let coefficient = if temperature > Kelvin::FREEZING_POINT {
            VISCOSITY_BASE + VISCOSITY_LINEAR * delta
        } else {
            VISCOSITY_BASE + VISCOSITY_LINEAR * delta - VISCOSITY_QUADRATIC * delta * delta
        };
        PascalSeconds::new(coefficient * VISCOSITY_SCALE)
    }

    /// Everything the model knows about the atmosphere at `altitude`
    pub fn state_at(&self, altitude: Meters) -> AtmosphereState {
        let (temperature, pressure) = self.temperature_and_pressure(altitude);
        AtmosphereState {
            altitude,
            temperature,
            pressure,
            density: KgPerCubicMeter::new(*pressure / (self.gas_constant * *temperature)),
            viscosity: Self::viscosity_at_temperature(temperature),
        }
    }

    /// Air density and viscosity at `altitude`
    pub fn air_at(&self, altitude: Meters) -> AirProperties {
        self.state_at(altitude).air()
    }

    /// Pressure at the base of the tropopause layer
    pub fn tropopause_base_pressure(&self) -> Pascals {
        Pascals::new(self.troposphere(self.tropopause_base).1)
    }

    /// Pressure at the base of the stratosphere layer
    pub fn stratosphere_base_pressure(&self) -> Pascals {
        Pascals::new(self.tropopause(self.stratosphere_base).1)
    }

    fn troposphere(&self, h: f64) -> (f64, f64) {
        let lapse = self.troposphere_lapse_rate;
        let exponent = self.gravity / (self.gas_constant * lapse);
        let temperature = self.sea_level_temperature - lapse * h;
        let pressure =
            self.sea_level_pressure * (1.0 - lapse * h / self.sea_level_temperature).powf(exponent);
        (temperature, pressure)
    }

    fn tropopause(&self, h: f64) -> (f64, f64) {
        let base_pressure = self.troposphere(self.tropopause_base).1;
        let pressure = base_pressure
            * (-self.gravity * (h - self.tropopause_base)
                / (self.gas_constant * self.tropopause_temperature))
                .exp();
        (self.tropopause_temperature, pressure)
    }

    fn stratosphere(&self, h: f64) -> (f64, f64) {
        let lapse = self.stratosphere_lapse_rate;
        let exponent = self.gravity / (self.gas_constant * lapse);
        let base_pressure = self.tropopause(self.stratosphere_base).1;
        let dh = h - self.stratosphere_base;
        let temperature = self.tropopause_temperature - lapse * dh;
        let pressure =
            base_pressure * (1.0 - lapse * dh / self.tropopause_temperature).powf(exponent);
        (temperature, pressure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sea_level_state() {
        let state = StandardAtmosphere::icao().state_at(Meters::new(0.0));
        assert_eq!(*state.temperature, 288.15);
        assert_eq!(*state.pressure, 101325.0);
        assert!((*state.density - 1.2250).abs() < 1e-3);
    }

    #[test]
    fn test_layer_selection() {
        let atm = StandardAtmosphere::icao();
        assert_eq!(atm.layer_at(Meters::new(10999.0)), AtmosphereLayer::Troposphere);
        assert_eq!(atm.layer_at(Meters::new(11000.0)), AtmosphereLayer::Tropopause);
        assert_eq!(atm.layer_at(Meters::new(19999.0)), AtmosphereLayer::Tropopause);
        assert_eq!(atm.layer_at(Meters::new(20000.0)), AtmosphereLayer::Stratosphere);
    }

    #[test]
    fn test_anchor_pressures_match_closed_form() {
        let atm = StandardAtmosphere::icao();
        let exponent = 9.80665 / (287.05 * 0.0065);
        let p11 = 101325.0 * (1.0 - 0.0065 * 11000.0 / 288.15_f64).powf(exponent);
        let p20 = p11 * (-9.80665 * 9000.0 / (287.05 * 216.65_f64)).exp();

        assert_relative_eq!(*atm.tropopause_base_pressure(), p11, max_relative = 1e-12);
        assert_relative_eq!(*atm.stratosphere_base_pressure(), p20, max_relative = 1e-12);
    }

    #[test]
    fn test_viscosity_above_freezing() {
        let mu = StandardAtmosphere::viscosity_at_temperature(Kelvin::new(274.15));
        assert_relative_eq!(*mu, (1.718 + 0.0049) * 1e-5, max_relative = 1e-9);
    }

    #[test]
    fn test_viscosity_below_freezing() {
        let mu = StandardAtmosphere::viscosity_at_temperature(Kelvin::new(272.15));
        assert_relative_eq!(*mu, (1.718 - 0.0049 - 1.2e-5) * 1e-5, max_relative = 1e-9);
    }

    #[test]
    fn test_viscosity_at_freezing_uses_lower_branch() {
        // ΔT = 0 so both branches agree; no jump at the pivot
        let mu = StandardAtmosphere::viscosity_at_temperature(Kelvin::FREEZING_POINT);
        assert_relative_eq!(*mu, 1.718e-5, max_relative = 1e-12);
    }

    #[test]
    fn test_density_decreases_with_altitude() {
        let atm = StandardAtmosphere::icao();
        let mut previous = atm.density(Meters::new(0.0));
        for km in 1..=32 {
            let density = atm.density(Meters::new(f64::from(km) * 1000.0));
            assert!(density < previous, "density not decreasing at {km} km");
            previous = density;
        }
    }

    #[test]
    fn test_air_at_matches_state() {
        let atm = StandardAtmosphere::icao();
        let altitude = Meters::new(5000.0);
        let air = atm.air_at(altitude);
        assert_eq!(air.density, atm.density(altitude));
        assert_eq!(air.viscosity, atm.viscosity(altitude));
    }
}
