use super::SpectrumExecutor;
use super::extract::extract_transitions;
use super::loader::read_document;
use super::serialization::{derive_output_path, write_spectrum};
use super::synthesis::{passes_wavelength_filter, synthesize};
use crate::common::config::{RegionMarkers, SpectrumConfig, SynthesisSettings};
use crate::domain::{Spectrum, SpectrumPoint, SpectrumResult, Transition};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Validated run parameters.
///
/// The output location is only derived from the input path once the input
/// has been loaded, so an unreadable input always reports as a load failure.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumRequest {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub synthesis: SynthesisSettings,
    pub markers: RegionMarkers,
}

impl SpectrumRequest {
    pub fn from_config(config: SpectrumConfig) -> SpectrumResult<Self> {
        config.validate()?;
        Ok(Self {
            input_path: config.input_path,
            output_path: config.output_path,
            synthesis: config.synthesis,
            markers: config.markers,
        })
    }

    pub fn resolve_output_path(&self) -> SpectrumResult<PathBuf> {
        match &self.output_path {
            Some(path) => Ok(path.clone()),
            None => derive_output_path(&self.input_path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub hwhm: f64,
    pub min_wavelength_nm: f64,
    pub transitions: Vec<Transition>,
    pub contributing_transitions: usize,
    pub grid_points: usize,
    pub peak: Option<SpectrumPoint>,
    #[serde(skip)]
    pub spectrum: Spectrum,
}

pub struct TddftSpectrumPipeline;

impl SpectrumExecutor for TddftSpectrumPipeline {
    fn execute(&self, request: &SpectrumRequest) -> SpectrumResult<SpectrumReport> {
        request.synthesis.validate()?;

        tracing::info!("reading {}", request.input_path.display());
        let transitions = extract_sticks(&request.input_path, &request.markers)?;

        let contributing_transitions = transitions
            .iter()
            .filter(|transition| {
                passes_wavelength_filter(transition, request.synthesis.min_wavelength_nm)
            })
            .count();
        if contributing_transitions == 0 {
            tracing::warn!(
                "none of the {} transitions lies above {} nm; the spectrum will be flat",
                transitions.len(),
                request.synthesis.min_wavelength_nm
            );
        }

        let spectrum = synthesize(&transitions, &request.synthesis)?;
        tracing::info!(
            "broadened {} of {} transitions onto {} grid points",
            contributing_transitions,
            transitions.len(),
            spectrum.len()
        );

        let output_path = request.resolve_output_path()?;
        write_spectrum(&output_path, &spectrum)?;
        tracing::info!("spectrum written to {}", output_path.display());

        Ok(SpectrumReport {
            input_path: request.input_path.clone(),
            output_path,
            hwhm: request.synthesis.hwhm,
            min_wavelength_nm: request.synthesis.min_wavelength_nm,
            contributing_transitions,
            grid_points: spectrum.len(),
            peak: spectrum.peak(),
            transitions,
            spectrum,
        })
    }
}

/// Loads `path` and extracts its transitions without broadening them.
pub fn extract_sticks(path: &Path, markers: &RegionMarkers) -> SpectrumResult<Vec<Transition>> {
    let document = read_document(path)?;
    let transitions = extract_transitions(&document, markers)?;
    tracing::debug!("extracted {} transitions", transitions.len());
    Ok(transitions)
}

pub fn run_spectrum(config: SpectrumConfig) -> SpectrumResult<SpectrumReport> {
    let request = SpectrumRequest::from_config(config)?;
    TddftSpectrumPipeline.execute(&request)
}
