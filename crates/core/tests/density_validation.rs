//! Size-Dependent Density and Solidity Validation
//!
//! # Scientific References Validated
//!
//! - **Bonadonna & Phillips (2003)**: linear density change on the phi scale
//!
//! Run tests with: cargo test --test `density_validation`

mod common;

use approx::assert_abs_diff_eq;
use tephra_sim_core::core_types::{DensityBound, KgPerCubicMeter, Meters, Particle, TransportError};
use tephra_sim_core::physics::{SizeDensityRule, SolidityScale};

#[test]
fn test_bonadonna_phillips_reference_points() {
    let rule = SizeDensityRule::new(KgPerCubicMeter::new(500.0), KgPerCubicMeter::new(2500.0));

    for (microns, expected) in [(4.0, 2500.0), (125.0, 1500.0), (2000.0, 500.0), (16000.0, 500.0)] {
        let density = rule.density_for(Meters::from_microns(microns)).unwrap();
        assert_abs_diff_eq!(*density, expected, epsilon = 1e-5);
    }
}

#[test]
fn test_particle_adopts_size_dependent_density() {
    let rule = SizeDensityRule::dacite();
    let fine = Particle::with_diameter(Meters::from_microns(4.0))
        .unwrap()
        .with_size_dependent_density(&rule)
        .unwrap();
    let coarse = Particle::with_diameter(Meters::from_microns(4000.0))
        .unwrap()
        .with_size_dependent_density(&rule)
        .unwrap();

    assert_eq!(*fine.density(), 2400.0);
    assert_eq!(*coarse.density(), 655.0);
}

#[test]
fn test_solidity_end_members_and_midpoint() {
    let scale = SolidityScale::new(KgPerCubicMeter::new(2001.0), KgPerCubicMeter::new(1.0));

    let solidity = scale
        .convert(&[
            KgPerCubicMeter::new(2001.0),
            KgPerCubicMeter::new(1.0),
            KgPerCubicMeter::new(1001.0),
        ])
        .unwrap();
    assert_eq!(solidity, vec![1.0, 0.0, 0.5]);
}

#[test]
fn test_non_physical_densities_rejected() {
    let scale = SolidityScale::default();

    let above = scale.solidity(KgPerCubicMeter::new(9999.0)).unwrap_err();
    assert!(matches!(
        above,
        TransportError::NonPhysicalDensity {
            bound: DensityBound::AboveGlass,
            ..
        }
    ));

    let below = scale.solidity(KgPerCubicMeter::new(0.1)).unwrap_err();
    assert!(matches!(
        below,
        TransportError::NonPhysicalDensity {
            bound: DensityBound::BelowAtmosphere,
            ..
        }
    ));
}
