//! Physical constants and default policy values for spectrum synthesis.
//!
//! Every literal the pipeline depends on lives here so that configuration
//! defaults and tests share one source.

pub const PI: f64 = std::f64::consts::PI;
pub const SQRT_TWO_PI: f64 = 2.506_628_274_631_000_5_f64;

/// Photon energy to wavelength conversion, `lambda[nm] = HC_EV_NM / E[eV]`.
pub const HC_EV_NM: f64 = 1239.8;

pub const DEFAULT_GRID_START_NM: f64 = 100.0;
pub const DEFAULT_GRID_END_NM: f64 = 700.0;
pub const DEFAULT_GRID_STEP_NM: f64 = 0.5;

/// Transitions at or below this wavelength are left out of the broadened spectrum.
pub const DEFAULT_MIN_WAVELENGTH_NM: f64 = 200.0;

pub const REGION_START_MARKER: &str = "TDDFT Excitation Energies";
pub const REGION_END_MARKER: &str = "SETman timing";
pub const ENERGY_RECORD_MARKER: &str = "Excited state";
pub const STRENGTH_RECORD_MARKER: &str = "Strength";

pub const OUTPUT_SUFFIX: &str = "_spectrum.txt";
/// Number of trailing input-path characters replaced by [`OUTPUT_SUFFIX`].
pub const REPLACED_EXTENSION_CHARS: usize = 4;

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_GRID_END_NM, DEFAULT_GRID_START_NM, DEFAULT_GRID_STEP_NM,
        DEFAULT_MIN_WAVELENGTH_NM, HC_EV_NM, PI, SQRT_TWO_PI,
    };

    #[test]
    fn constants_match_expected_relationships() {
        assert!((SQRT_TWO_PI - (2.0 * PI).sqrt()).abs() <= 1.0e-15);
        assert_eq!(HC_EV_NM, 1239.8);
    }

    #[test]
    fn default_grid_covers_the_filter_threshold() {
        assert!(DEFAULT_GRID_STEP_NM > 0.0);
        assert!(DEFAULT_GRID_END_NM > DEFAULT_GRID_START_NM);
        assert!(DEFAULT_MIN_WAVELENGTH_NM > DEFAULT_GRID_START_NM);
        assert!(DEFAULT_MIN_WAVELENGTH_NM < DEFAULT_GRID_END_NM);
    }
}
