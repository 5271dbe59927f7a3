use crate::common::constants::{OUTPUT_SUFFIX, REPLACED_EXTENSION_CHARS};
use crate::domain::{Spectrum, SpectrumError, SpectrumPoint, SpectrumResult, Transition};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const SPECTRUM_HEADER: &str = "wavelength\tabsorbance";
pub const TRANSITION_HEADER: &str = "state\tenergy_ev\twavelength_nm\tstrength";

/// Replaces the last four characters of `input` (normally `.out`) with `_spectrum.txt`.
pub fn derive_output_path(input: &Path) -> SpectrumResult<PathBuf> {
    let text = input.to_string_lossy();
    let char_count = text.chars().count();
    if char_count < REPLACED_EXTENSION_CHARS {
        return Err(SpectrumError::invalid_parameter(
            "inputPath",
            format!(
                "'{}' is shorter than {} characters; cannot derive an output path",
                text, REPLACED_EXTENSION_CHARS
            ),
        ));
    }

    let stem: String = text
        .chars()
        .take(char_count - REPLACED_EXTENSION_CHARS)
        .collect();
    Ok(PathBuf::from(format!("{stem}{OUTPUT_SUFFIX}")))
}

pub fn render_spectrum_table(spectrum: &Spectrum) -> String {
    let mut table = String::with_capacity(24 * (spectrum.len() + 1));
    table.push_str(SPECTRUM_HEADER);
    table.push('\n');
    for point in spectrum.points() {
        let _ = writeln!(table, "{}\t{}", point.wavelength_nm, point.absorbance);
    }
    table
}

pub fn render_transition_table(transitions: &[Transition]) -> String {
    let mut table = String::from(TRANSITION_HEADER);
    table.push('\n');
    for transition in transitions {
        let _ = writeln!(
            table,
            "{}\t{}\t{}\t{}",
            transition.state,
            transition.energy_ev,
            transition.wavelength_nm,
            transition.oscillator_strength
        );
    }
    table
}

/// Writes the table with `\n` line endings, replacing any existing file.
pub fn write_spectrum(path: &Path, spectrum: &Spectrum) -> SpectrumResult<()> {
    fs::write(path, render_spectrum_table(spectrum))
        .map_err(|source| SpectrumError::output_write(path, source.to_string()))
}

/// Parses a table produced by [`render_spectrum_table`].
pub fn parse_spectrum_table(content: &str) -> SpectrumResult<Spectrum> {
    let mut lines = content.lines().enumerate();
    match lines.next() {
        Some((_, header)) if header.trim_end() == SPECTRUM_HEADER => {}
        Some((_, header)) => {
            return Err(SpectrumError::invalid_parameter(
                "spectrum table",
                format!("unexpected header '{header}'"),
            ));
        }
        None => return Ok(Spectrum::default()),
    }

    let mut points = Vec::new();
    for (line_index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let mut columns = line.split('\t');
        let wavelength = columns.next().and_then(|value| value.trim().parse::<f64>().ok());
        let absorbance = columns.next().and_then(|value| value.trim().parse::<f64>().ok());
        match (wavelength, absorbance, columns.next()) {
            (Some(wavelength_nm), Some(absorbance), None) => points.push(SpectrumPoint {
                wavelength_nm,
                absorbance,
            }),
            _ => {
                return Err(SpectrumError::NoNumericToken {
                    line_index,
                    line: line.to_string(),
                });
            }
        }
    }
    Ok(Spectrum::from_points(points))
}

pub fn read_spectrum(path: &Path) -> SpectrumResult<Spectrum> {
    let content = fs::read_to_string(path)
        .map_err(|source| SpectrumError::file_load(path, source.to_string()))?;
    parse_spectrum_table(&content)
}
