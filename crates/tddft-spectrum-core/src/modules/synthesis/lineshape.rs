use crate::common::constants::SQRT_TWO_PI;

/// Gaussian of total area `area` centred on `center_nm` with standard deviation `width_nm`.
///
/// The configured half width is used directly as the standard deviation, so
/// the area under each broadened stick equals its oscillator strength.
pub(super) fn gaussian_profile(x_nm: f64, center_nm: f64, width_nm: f64, area: f64) -> f64 {
    let reduced = (x_nm - center_nm) / width_nm;
    area * (-0.5 * reduced * reduced).exp() / (width_nm * SQRT_TWO_PI)
}
