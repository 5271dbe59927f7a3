//! Run configuration gathered before the pipeline starts.
//!
//! [`SpectrumConfigFile`] is the camelCase JSON schema read from disk; every
//! field is optional there. [`SpectrumConfig`] is the complete, validated
//! form the pipeline runs on, with defaults taken from [`super::constants`].

use super::constants::{
    DEFAULT_GRID_END_NM, DEFAULT_GRID_START_NM, DEFAULT_GRID_STEP_NM, DEFAULT_MIN_WAVELENGTH_NM,
    ENERGY_RECORD_MARKER, REGION_END_MARKER, REGION_START_MARKER, STRENGTH_RECORD_MARKER,
};
use crate::domain::{SpectrumError, SpectrumResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridSettings {
    pub start_nm: f64,
    pub end_nm: f64,
    pub step_nm: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            start_nm: DEFAULT_GRID_START_NM,
            end_nm: DEFAULT_GRID_END_NM,
            step_nm: DEFAULT_GRID_STEP_NM,
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> SpectrumResult<()> {
        if !self.start_nm.is_finite() || !self.end_nm.is_finite() {
            return Err(SpectrumError::invalid_parameter(
                "grid",
                format!(
                    "bounds must be finite (start={}, end={})",
                    self.start_nm, self.end_nm
                ),
            ));
        }
        if !(self.step_nm.is_finite() && self.step_nm > 0.0) {
            return Err(SpectrumError::invalid_parameter(
                "grid",
                format!("step must be positive, got {}", self.step_nm),
            ));
        }
        if self.end_nm <= self.start_nm {
            return Err(SpectrumError::invalid_parameter(
                "grid",
                format!(
                    "end ({}) must be greater than start ({})",
                    self.end_nm, self.start_nm
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionMarkers {
    pub region_start: String,
    pub region_end: String,
    pub energy: String,
    pub strength: String,
}

impl Default for RegionMarkers {
    fn default() -> Self {
        Self {
            region_start: REGION_START_MARKER.to_string(),
            region_end: REGION_END_MARKER.to_string(),
            energy: ENERGY_RECORD_MARKER.to_string(),
            strength: STRENGTH_RECORD_MARKER.to_string(),
        }
    }
}

impl RegionMarkers {
    pub fn validate(&self) -> SpectrumResult<()> {
        for (name, marker) in [
            ("regionStart", &self.region_start),
            ("regionEnd", &self.region_end),
            ("energy", &self.energy),
            ("strength", &self.strength),
        ] {
            if marker.trim().is_empty() {
                return Err(SpectrumError::invalid_parameter(
                    "markers",
                    format!("marker '{name}' must not be empty"),
                ));
            }
        }
        Ok(())
    }
}

/// Parameters of the broadening step alone, independent of any file paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisSettings {
    pub hwhm: f64,
    pub grid: GridSettings,
    pub min_wavelength_nm: f64,
}

impl SynthesisSettings {
    pub fn new(hwhm: f64) -> Self {
        Self {
            hwhm,
            grid: GridSettings::default(),
            min_wavelength_nm: DEFAULT_MIN_WAVELENGTH_NM,
        }
    }

    pub fn validate(&self) -> SpectrumResult<()> {
        validate_hwhm(self.hwhm)?;
        self.grid.validate()?;
        if self.min_wavelength_nm.is_nan() {
            return Err(SpectrumError::invalid_parameter(
                "minWavelengthNm",
                "wavelength filter threshold must be a number",
            ));
        }
        Ok(())
    }
}

pub fn validate_hwhm(hwhm: f64) -> SpectrumResult<()> {
    if hwhm.is_finite() && hwhm > 0.0 {
        Ok(())
    } else {
        Err(SpectrumError::invalid_parameter(
            "hwhm",
            format!("half width must be a positive number of nm, got {hwhm}"),
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumConfig {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub synthesis: SynthesisSettings,
    pub markers: RegionMarkers,
}

impl SpectrumConfig {
    pub fn new(input_path: impl Into<PathBuf>, hwhm: f64) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            synthesis: SynthesisSettings::new(hwhm),
            markers: RegionMarkers::default(),
        }
    }

    pub fn validate(&self) -> SpectrumResult<()> {
        self.synthesis.validate()?;
        self.markers.validate()?;
        if self.input_path.as_os_str().is_empty() {
            return Err(SpectrumError::invalid_parameter(
                "inputPath",
                "input path must not be empty",
            ));
        }
        Ok(())
    }
}

/// Run configuration as written in a `--config` JSON file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpectrumConfigFile {
    pub input_path: Option<PathBuf>,
    pub hwhm: Option<f64>,
    pub output_path: Option<PathBuf>,
    pub grid: Option<GridSettings>,
    pub min_wavelength_nm: Option<f64>,
    pub markers: Option<RegionMarkers>,
}

impl SpectrumConfigFile {
    /// Rebases relative input and output paths onto `base`, the directory of the file.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.input_path = self.input_path.map(|input| resolve_relative(base, input));
        self.output_path = self.output_path.map(|output| resolve_relative(base, output));
        self
    }

    /// Builds a complete configuration once the input path and half width are known.
    pub fn to_config(&self, input_path: PathBuf, hwhm: f64) -> SpectrumConfig {
        let mut config = SpectrumConfig::new(input_path, hwhm);
        config.output_path = self.output_path.clone();
        if let Some(grid) = self.grid {
            config.synthesis.grid = grid;
        }
        if let Some(threshold) = self.min_wavelength_nm {
            config.synthesis.min_wavelength_nm = threshold;
        }
        if let Some(markers) = &self.markers {
            config.markers = markers.clone();
        }
        config
    }
}

fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{GridSettings, RegionMarkers, SpectrumConfigFile, SynthesisSettings};
    use crate::domain::SpectrumError;
    use std::path::Path;

    #[test]
    fn defaults_match_the_fixed_grid_and_filter() {
        let settings = SynthesisSettings::new(20.0);
        assert_eq!(settings.grid.start_nm, 100.0);
        assert_eq!(settings.grid.end_nm, 700.0);
        assert_eq!(settings.grid.step_nm, 0.5);
        assert_eq!(settings.min_wavelength_nm, 200.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn non_positive_hwhm_is_rejected() {
        for hwhm in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let error = SynthesisSettings::new(hwhm)
                .validate()
                .expect_err("hwhm should be rejected");
            assert!(matches!(
                error,
                SpectrumError::InvalidParameter { name: "hwhm", .. }
            ));
        }
    }

    #[test]
    fn inverted_or_flat_grids_are_rejected() {
        let inverted = GridSettings {
            start_nm: 700.0,
            end_nm: 100.0,
            step_nm: 0.5,
        };
        let flat_step = GridSettings {
            step_nm: 0.0,
            ..GridSettings::default()
        };
        assert!(inverted.validate().is_err());
        assert!(flat_step.validate().is_err());
    }

    #[test]
    fn empty_markers_are_rejected() {
        let markers = RegionMarkers {
            energy: "  ".to_string(),
            ..RegionMarkers::default()
        };
        assert!(markers.validate().is_err());
    }

    #[test]
    fn config_file_fills_defaults_for_missing_fields() {
        let file: SpectrumConfigFile = serde_json::from_str(
            r#"
            {
              "inputPath": "water.out",
              "hwhm": 15.0,
              "grid": { "stepNm": 1.0 },
              "markers": { "regionStart": "TDDFT/TDA Excitation Energies" }
            }
            "#,
        )
        .expect("config should parse");

        assert_eq!(file.input_path.as_deref(), Some(Path::new("water.out")));
        assert_eq!(file.hwhm, Some(15.0));
        let config = file.to_config("water.out".into(), 15.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.synthesis.grid.step_nm, 1.0);
        assert_eq!(config.synthesis.grid.start_nm, 100.0);
        assert_eq!(config.synthesis.min_wavelength_nm, 200.0);
        assert_eq!(config.markers.region_start, "TDDFT/TDA Excitation Energies");
        assert_eq!(config.markers.region_end, "SETman timing");
        assert!(config.output_path.is_none());
    }

    #[test]
    fn partial_config_file_keeps_unset_fields_at_defaults() {
        let file: SpectrumConfigFile =
            serde_json::from_str(r#"{ "minWavelengthNm": 150.0 }"#).expect("config should parse");
        assert!(file.input_path.is_none());
        assert!(file.hwhm.is_none());

        let config = file.to_config("dye.out".into(), 12.0);
        assert_eq!(config.synthesis.min_wavelength_nm, 150.0);
        assert_eq!(config.synthesis.grid, GridSettings::default());
        assert_eq!(config.markers, RegionMarkers::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn relative_paths_rebase_onto_the_config_directory() {
        let absolute = std::env::temp_dir().join("dye.out");
        let file = SpectrumConfigFile {
            input_path: Some("calc/dye.out".into()),
            output_path: Some(absolute.clone()),
            ..SpectrumConfigFile::default()
        }
        .resolve_paths(Path::new("runs"));
        assert_eq!(file.input_path.as_deref(), Some(Path::new("runs/calc/dye.out")));
        assert_eq!(file.output_path, Some(absolute));
    }
}
