//! Excited-state record extraction from Q-Chem style TDDFT output.
//!
//! The data region starts at the first line containing the region start
//! marker and ends at the first end marker at or after it. Inside that
//! region every energy record line is paired positionally with a strength
//! record line; the pairing is only accepted when both counts agree.

mod parser;

pub use parser::{
    find_first, find_indices, literal_pattern, parse_first_decimal, parse_first_decimal_at,
};

use crate::common::config::RegionMarkers;
use crate::domain::{DataRegion, SpectrumError, SpectrumResult, TextDocument, Transition};

pub fn locate_data_region<S: AsRef<str>>(
    lines: &[S],
    markers: &RegionMarkers,
) -> SpectrumResult<DataRegion> {
    let start = find_first(lines, &literal_pattern(&markers.region_start), 0, lines.len())
        .ok_or_else(|| SpectrumError::MalformedInput {
            marker: markers.region_start.clone(),
            search_start: 0,
        })?;
    let end = find_first(lines, &literal_pattern(&markers.region_end), start, lines.len())
        .ok_or_else(|| SpectrumError::MalformedInput {
            marker: markers.region_end.clone(),
            search_start: start,
        })?;

    let region = DataRegion { start, end };
    tracing::debug!(
        "data region spans lines {}..{} ({} lines)",
        start,
        end,
        region.len()
    );
    Ok(region)
}

pub fn extract_energy_indices<S: AsRef<str>>(
    lines: &[S],
    region: DataRegion,
    markers: &RegionMarkers,
) -> Vec<usize> {
    find_indices(
        lines,
        &literal_pattern(&markers.energy),
        region.start,
        region.end,
    )
}

pub fn extract_strength_indices<S: AsRef<str>>(
    lines: &[S],
    region: DataRegion,
    markers: &RegionMarkers,
) -> Vec<usize> {
    find_indices(
        lines,
        &literal_pattern(&markers.strength),
        region.start,
        region.end,
    )
}

pub fn build_transitions<S: AsRef<str>>(
    lines: &[S],
    energy_indices: &[usize],
    strength_indices: &[usize],
) -> SpectrumResult<Vec<Transition>> {
    if energy_indices.len() != strength_indices.len() {
        return Err(SpectrumError::InconsistentRecordCount {
            energy_records: energy_indices.len(),
            strength_records: strength_indices.len(),
        });
    }

    energy_indices
        .iter()
        .zip(strength_indices)
        .enumerate()
        .map(|(position, (&energy_line, &strength_line))| {
            let energy_ev = parse_first_decimal_at(lines, energy_line)?;
            if energy_ev <= 0.0 {
                return Err(SpectrumError::invalid_parameter(
                    "excitation energy",
                    format!("line {energy_line} has non-positive energy {energy_ev} eV"),
                ));
            }
            let strength = parse_first_decimal_at(lines, strength_line)?;
            Ok(Transition::new(
                position + 1,
                energy_ev,
                strength,
                energy_line,
                strength_line,
            ))
        })
        .collect()
}

pub fn extract_transitions(
    document: &TextDocument,
    markers: &RegionMarkers,
) -> SpectrumResult<Vec<Transition>> {
    let lines = document.lines();
    let region = locate_data_region(lines, markers)?;
    let energy_indices = extract_energy_indices(lines, region, markers);
    let strength_indices = extract_strength_indices(lines, region, markers);
    tracing::debug!(
        "found {} energy and {} strength records",
        energy_indices.len(),
        strength_indices.len()
    );
    build_transitions(lines, &energy_indices, &strength_indices)
}
