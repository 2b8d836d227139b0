//! ICAO Standard Atmosphere Validation
//!
//! Checks the three-layer profile against the published ICAO tables and the
//! NAME viscosity law.
//!
//! # Scientific References Validated
//!
//! - **ICAO Doc 7488/3 (1993)**: Manual of the ICAO Standard Atmosphere
//!
//! Run tests with: cargo test --test `atmosphere_validation`

mod common;

use approx::assert_abs_diff_eq;
use tephra_sim_core::atmosphere::{AtmosphereLayer, StandardAtmosphere};
use tephra_sim_core::core_types::{Kelvin, Meters};

/// (altitude m, temperature °C, pressure hPa, density kg/m³)
const ICAO_TABLE: [(f64, f64, f64, f64); 5] = [
    (0.0, 15.0, 1013.25, 1.2250),
    (5000.0, -17.5, 540.20, 0.7361),
    (11000.0, -56.5, 226.32, 0.3639),
    (20000.0, -56.5, 54.75, 0.0880),
    (32000.0, -44.5, 8.68, 0.0132),
];

#[test]
fn test_icao_reference_table() {
    let atmosphere = StandardAtmosphere::icao();

    for (altitude, celsius, hectopascals, density) in ICAO_TABLE {
        let state = atmosphere.state_at(Meters::new(altitude));
        assert_abs_diff_eq!(*state.temperature.to_celsius(), celsius, epsilon = 0.05);
        assert_abs_diff_eq!(state.pressure.to_hectopascals(), hectopascals, epsilon = 0.5);
        assert_abs_diff_eq!(*state.density, density, epsilon = 0.005);
    }
}

#[test]
fn test_continuity_at_layer_boundaries() {
    let atmosphere = StandardAtmosphere::icao();

    for boundary in [11000.0, 20000.0] {
        let below = atmosphere.state_at(Meters::new(boundary - 1e-6));
        let at = atmosphere.state_at(Meters::new(boundary));
        assert_ne!(
            atmosphere.layer_at(Meters::new(boundary - 1e-6)),
            atmosphere.layer_at(Meters::new(boundary))
        );

        assert_abs_diff_eq!(*below.temperature, *at.temperature, epsilon = 1e-6);
        assert_abs_diff_eq!(*below.pressure, *at.pressure, epsilon = 1e-3);
        assert_abs_diff_eq!(*below.density, *at.density, epsilon = 1e-8);
    }
}

#[test]
fn test_anchor_pressures_match_layer_formulas() {
    let atmosphere = StandardAtmosphere::icao();

    assert_abs_diff_eq!(
        *atmosphere.tropopause_base_pressure(),
        *atmosphere.pressure(Meters::new(11000.0)),
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        *atmosphere.stratosphere_base_pressure(),
        *atmosphere.pressure(Meters::new(20000.0)),
        epsilon = 1e-9
    );
    // Published anchors: 226.32 hPa and 54.75 hPa
    assert_abs_diff_eq!(
        atmosphere.tropopause_base_pressure().to_hectopascals(),
        226.32,
        epsilon = 0.05
    );
    assert_abs_diff_eq!(
        atmosphere.stratosphere_base_pressure().to_hectopascals(),
        54.75,
        epsilon = 0.05
    );
}

#[test]
fn test_isothermal_tropopause() {
    let atmosphere = StandardAtmosphere::icao();
    for altitude in [11000.0, 14000.0, 17500.0, 19999.0] {
        let altitude = Meters::new(altitude);
        assert_eq!(atmosphere.layer_at(altitude), AtmosphereLayer::Tropopause);
        assert_abs_diff_eq!(*atmosphere.temperature(altitude), 216.65, epsilon = 1e-9);
    }
}

#[test]
fn test_viscosity_either_side_of_freezing() {
    let warm = StandardAtmosphere::viscosity_at_temperature(Kelvin::new(274.15));
    let cold = StandardAtmosphere::viscosity_at_temperature(Kelvin::new(272.15));

    assert_abs_diff_eq!(*warm, (1.718 + 0.0049) * 1e-5, epsilon = 1e-15);
    assert_abs_diff_eq!(*cold, (1.718 - 0.0049 - 1.2e-5) * 1e-5, epsilon = 1e-15);
}

#[test]
fn test_air_is_thinner_and_less_viscous_aloft() {
    let atmosphere = StandardAtmosphere::icao();
    let ground = atmosphere.air_at(Meters::new(0.0));
    let cruise = atmosphere.air_at(Meters::new(10000.0));

    assert!(cruise.density < ground.density);
    assert!(cruise.viscosity < ground.viscosity);
    // Ground viscosity matches the sea-level reference air
    assert_abs_diff_eq!(*ground.viscosity, 1.7915e-5, epsilon = 1e-12);
}
