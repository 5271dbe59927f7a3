//! Absorption spectra from Q-Chem TDDFT excited-state output.
//!
//! The pipeline loads an output file, pairs each `Excited state` energy with
//! its oscillator `Strength`, broadens every stick into a Gaussian on a
//! wavelength grid and writes the summed curve as a tab-separated table.

pub mod common;
pub mod domain;
pub mod modules;
