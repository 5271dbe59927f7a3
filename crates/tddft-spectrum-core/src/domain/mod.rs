pub mod errors;

pub use errors::{SpectrumError, SpectrumErrorCategory, SpectrumResult};

use crate::common::constants::HC_EV_NM;
use serde::{Deserialize, Serialize};

/// Ordered, immutable lines of a loaded output file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDocument {
    lines: Vec<String>,
}

impl TextDocument {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Splits in-memory text the same way the file loader does.
    pub fn from_text(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect(),
        )
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TextDocument {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Half-open line range `[start, end)` holding the excited-state records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataRegion {
    pub start: usize,
    pub end: usize,
}

impl DataRegion {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// 1-based excited state ordinal in document order.
    pub state: usize,
    pub energy_ev: f64,
    pub wavelength_nm: f64,
    pub oscillator_strength: f64,
    pub energy_line: usize,
    pub strength_line: usize,
}

impl Transition {
    pub fn new(
        state: usize,
        energy_ev: f64,
        oscillator_strength: f64,
        energy_line: usize,
        strength_line: usize,
    ) -> Self {
        Self {
            state,
            energy_ev,
            wavelength_nm: energy_to_wavelength_nm(energy_ev),
            oscillator_strength,
            energy_line,
            strength_line,
        }
    }
}

pub fn energy_to_wavelength_nm(energy_ev: f64) -> f64 {
    HC_EV_NM / energy_ev
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumPoint {
    pub wavelength_nm: f64,
    pub absorbance: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Spectrum {
    points: Vec<SpectrumPoint>,
}

impl Spectrum {
    /// Pairs grid wavelengths with absorbances; extra values on either side are dropped.
    pub fn from_columns(wavelengths: &[f64], absorbances: &[f64]) -> Self {
        Self {
            points: wavelengths
                .iter()
                .zip(absorbances)
                .map(|(&wavelength_nm, &absorbance)| SpectrumPoint {
                    wavelength_nm,
                    absorbance,
                })
                .collect(),
        }
    }

    pub fn from_points(points: Vec<SpectrumPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SpectrumPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn wavelengths(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.wavelength_nm).collect()
    }

    pub fn absorbances(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.absorbance).collect()
    }

    /// Point of maximal absorbance; the earliest wins on ties.
    pub fn peak(&self) -> Option<SpectrumPoint> {
        self.points.iter().copied().fold(None, |best, point| match best {
            Some(current) if current.absorbance >= point.absorbance => Some(current),
            _ => Some(point),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Spectrum, TextDocument, Transition, energy_to_wavelength_nm};

    #[test]
    fn text_document_strips_line_endings() {
        let document = TextDocument::from_text("first\r\nsecond\nthird");
        assert_eq!(document.len(), 3);
        assert_eq!(document.line(0), Some("first"));
        assert_eq!(document.line(2), Some("third"));
        assert_eq!(document.line(3), None);
    }

    #[test]
    fn transition_wavelength_uses_exact_division() {
        let transition = Transition::new(1, 2.5, 0.1, 1, 2);
        assert_eq!(transition.wavelength_nm, 1239.8 / 2.5);
        assert_eq!(energy_to_wavelength_nm(3.9562), 1239.8 / 3.9562);
    }

    #[test]
    fn spectrum_peak_prefers_first_maximum() {
        let spectrum = Spectrum::from_columns(&[100.0, 100.5, 101.0], &[0.1, 0.3, 0.3]);
        let peak = spectrum.peak().expect("non-empty spectrum has a peak");
        assert_eq!(peak.wavelength_nm, 100.5);
        assert!(Spectrum::default().peak().is_none());
    }
}
