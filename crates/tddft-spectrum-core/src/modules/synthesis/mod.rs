//! Gaussian broadening of stick transitions onto a uniform wavelength grid.

mod lineshape;

use crate::common::config::{GridSettings, SynthesisSettings, validate_hwhm};
use crate::domain::{Spectrum, SpectrumError, SpectrumResult, Transition};
use lineshape::gaussian_profile;

pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Fixed 100.0..700.0 nm grid with 0.5 nm spacing (1200 points).
pub fn default_wavelength_grid() -> Vec<f64> {
    grid_points(&GridSettings::default())
}

/// `start + k * step` for `k = 0, 1, ...` while below `end`.
pub fn build_wavelength_grid(settings: &GridSettings) -> SpectrumResult<Vec<f64>> {
    settings.validate()?;
    let estimated = ((settings.end_nm - settings.start_nm) / settings.step_nm).ceil();
    if estimated > MAX_GRID_POINTS as f64 {
        return Err(SpectrumError::invalid_parameter(
            "grid",
            format!(
                "{} nm step over {}..{} nm exceeds {} points",
                settings.step_nm, settings.start_nm, settings.end_nm, MAX_GRID_POINTS
            ),
        ));
    }
    Ok(grid_points(settings))
}

fn grid_points(settings: &GridSettings) -> Vec<f64> {
    (0_u32..)
        .map(|k| settings.start_nm + settings.step_nm * f64::from(k))
        .take_while(|wavelength| *wavelength < settings.end_nm)
        .collect()
}

/// Whether a transition is broadened into the spectrum at all.
///
/// Sticks at or below `min_wavelength_nm` (200 nm by default) are dropped;
/// the threshold is a tunable policy rather than part of the lineshape.
pub fn passes_wavelength_filter(transition: &Transition, min_wavelength_nm: f64) -> bool {
    transition.wavelength_nm > min_wavelength_nm
}

/// Absorbance at each grid point as a sum of Gaussians, one per retained transition.
pub fn gaussian_sum(
    grid: &[f64],
    transitions: &[Transition],
    hwhm: f64,
    min_wavelength_nm: f64,
) -> SpectrumResult<Vec<f64>> {
    validate_hwhm(hwhm)?;
    let retained: Vec<&Transition> = transitions
        .iter()
        .filter(|transition| passes_wavelength_filter(transition, min_wavelength_nm))
        .collect();

    Ok(grid
        .iter()
        .map(|&x| {
            retained
                .iter()
                .fold(0.0, |total, transition| {
                    total
                        + gaussian_profile(
                            x,
                            transition.wavelength_nm,
                            hwhm,
                            transition.oscillator_strength,
                        )
                })
        })
        .collect())
}

pub fn synthesize(
    transitions: &[Transition],
    settings: &SynthesisSettings,
) -> SpectrumResult<Spectrum> {
    settings.validate()?;
    let grid = build_wavelength_grid(&settings.grid)?;
    let absorbance = gaussian_sum(
        &grid,
        transitions,
        settings.hwhm,
        settings.min_wavelength_nm,
    )?;
    Ok(Spectrum::from_columns(&grid, &absorbance))
}
