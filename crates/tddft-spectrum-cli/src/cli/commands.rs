use super::CliError;
use super::helpers::*;
use anyhow::Context;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tddft_spectrum_core::common::config::{RegionMarkers, SpectrumConfig, SpectrumConfigFile};
use tddft_spectrum_core::modules::serialization::render_transition_table;
use tddft_spectrum_core::modules::{
    SpectrumExecutor, SpectrumRequest, TddftSpectrumPipeline, extract_sticks,
};

#[derive(clap::Args)]
pub(super) struct SpectrumArgs {
    /// Q-Chem TDDFT output file (prompted for when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Gaussian half width in nm (prompted for when omitted)
    #[arg(long, allow_negative_numbers = true)]
    hwhm: Option<f64>,

    /// JSON run configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spectrum output path [default: input path with its last 4 characters replaced by _spectrum.txt]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// First grid wavelength in nm
    #[arg(long, allow_negative_numbers = true)]
    grid_start: Option<f64>,

    /// Grid end in nm (exclusive)
    #[arg(long, allow_negative_numbers = true)]
    grid_end: Option<f64>,

    /// Grid spacing in nm
    #[arg(long, allow_negative_numbers = true)]
    grid_step: Option<f64>,

    /// Only transitions above this wavelength (nm) are broadened
    #[arg(long, allow_negative_numbers = true)]
    min_wavelength: Option<f64>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Fail instead of prompting for missing values
    #[arg(long)]
    no_prompt: bool,
}

#[derive(clap::Args)]
pub(super) struct SticksArgs {
    /// Q-Chem TDDFT output file
    #[arg(short, long)]
    input: PathBuf,

    /// JSON run configuration providing custom region markers
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print transitions as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl SpectrumArgs {
    fn into_config<R: BufRead, W: Write>(
        self,
        reader: &mut R,
        writer: &mut W,
    ) -> Result<SpectrumConfig, CliError> {
        let file = match &self.config {
            Some(path) => load_config_file(path)?,
            None => SpectrumConfigFile::default(),
        };

        let input_path = match self.input.or_else(|| file.input_path.clone()) {
            Some(path) => PathBuf::from(strip_quotes(&path.to_string_lossy())),
            None if self.no_prompt => {
                return Err(CliError::Usage(
                    "missing --input and no inputPath in the run configuration".to_string(),
                ));
            }
            None => {
                let answer = prompt_line(reader, writer, PATH_PROMPT)?;
                let path = strip_quotes(&answer);
                writeln!(writer, "Read input path as {}", path).context("failed to echo path")?;
                PathBuf::from(path)
            }
        };

        let hwhm = match self.hwhm.or(file.hwhm) {
            Some(hwhm) => hwhm,
            None if self.no_prompt => {
                return Err(CliError::Usage(
                    "missing --hwhm and no hwhm in the run configuration".to_string(),
                ));
            }
            None => parse_hwhm(&prompt_line(reader, writer, HWHM_PROMPT)?)?,
        };

        let mut config = file.to_config(input_path, hwhm);
        if let Some(output) = self.output {
            config.output_path = Some(output);
        }
        if let Some(start) = self.grid_start {
            config.synthesis.grid.start_nm = start;
        }
        if let Some(end) = self.grid_end {
            config.synthesis.grid.end_nm = end;
        }
        if let Some(step) = self.grid_step {
            config.synthesis.grid.step_nm = step;
        }
        if let Some(threshold) = self.min_wavelength {
            config.synthesis.min_wavelength_nm = threshold;
        }
        Ok(config)
    }
}

pub(super) fn run_spectrum_command(args: SpectrumArgs) -> Result<i32, CliError> {
    let report_path = args.report.clone();
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    let config = args.into_config(&mut reader, &mut writer)?;

    let request = SpectrumRequest::from_config(config)?;
    let report = TddftSpectrumPipeline.execute(&request)?;
    println!("Data exported to {}", report.output_path.display());

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report).context("failed to encode run report")?;
        fs::write(&path, json + "\n")
            .with_context(|| format!("failed to write run report '{}'", path.display()))?;
        println!("JSON report: {}", path.display());
    }
    Ok(0)
}

pub(super) fn run_sticks_command(args: SticksArgs) -> Result<i32, CliError> {
    let markers = match &args.config {
        Some(path) => load_config_file(path)?.markers.unwrap_or_default(),
        None => RegionMarkers::default(),
    };
    let input = PathBuf::from(strip_quotes(&args.input.to_string_lossy()));
    let transitions = extract_sticks(&input, &markers)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&transitions).context("failed to encode transitions")?;
        println!("{}", json);
    } else {
        print!("{}", render_transition_table(&transitions));
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::SpectrumArgs;
    use crate::cli::CliError;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    fn args() -> SpectrumArgs {
        SpectrumArgs {
            input: None,
            hwhm: None,
            config: None,
            output: None,
            grid_start: None,
            grid_end: None,
            grid_step: None,
            min_wavelength: None,
            report: None,
            no_prompt: false,
        }
    }

    #[test]
    fn missing_values_are_prompted_for() {
        let mut input = Cursor::new("\"runs/dye.out\"\n12.5\n");
        let mut output = Vec::new();

        let config = args()
            .into_config(&mut input, &mut output)
            .expect("prompted config should build");
        assert_eq!(config.input_path, Path::new("runs/dye.out"));
        assert_eq!(config.synthesis.hwhm, 12.5);

        let transcript = String::from_utf8(output).expect("utf8 transcript");
        assert!(transcript.contains("What is the path for the TDDFT file?"));
        assert!(transcript.contains("Read input path as runs/dye.out"));
        assert!(transcript.contains("Enter the hwhm of your peaks in nm:"));
    }

    #[test]
    fn flags_override_defaults_without_prompting() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let flags = SpectrumArgs {
            input: Some(PathBuf::from("dye.out")),
            hwhm: Some(8.0),
            grid_step: Some(1.0),
            min_wavelength: Some(180.0),
            ..args()
        };

        let config = flags
            .into_config(&mut input, &mut output)
            .expect("config should build");
        assert_eq!(config.synthesis.grid.step_nm, 1.0);
        assert_eq!(config.synthesis.grid.start_nm, 100.0);
        assert_eq!(config.synthesis.min_wavelength_nm, 180.0);
        assert!(output.is_empty());
    }

    #[test]
    fn flags_override_the_config_file() {
        let temp = tempfile::TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("run.json");
        std::fs::write(
            &path,
            r#"{
              "inputPath": "dye.out",
              "hwhm": 10.0,
              "outputPath": "uv.tsv",
              "minWavelengthNm": 150.0,
              "grid": { "startNm": 300.0 },
              "markers": { "regionStart": "TDDFT/TDA Excitation Energies" }
            }"#,
        )
        .expect("config should be written");

        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let flags = SpectrumArgs {
            config: Some(path),
            hwhm: Some(25.0),
            grid_start: Some(250.0),
            no_prompt: true,
            ..args()
        };

        let config = flags
            .into_config(&mut input, &mut output)
            .expect("config should build");
        assert_eq!(config.input_path, temp.path().join("dye.out"));
        assert_eq!(config.output_path, Some(temp.path().join("uv.tsv")));
        assert_eq!(config.synthesis.hwhm, 25.0);
        assert_eq!(config.synthesis.grid.start_nm, 250.0);
        assert_eq!(config.synthesis.min_wavelength_nm, 150.0);
        assert_eq!(config.markers.region_start, "TDDFT/TDA Excitation Energies");
    }

    #[test]
    fn no_prompt_mode_rejects_missing_values() {
        let mut input = Cursor::new("dye.out\n20\n");
        let mut output = Vec::new();
        let flags = SpectrumArgs {
            no_prompt: true,
            input: Some(PathBuf::from("dye.out")),
            ..args()
        };

        let error = flags
            .into_config(&mut input, &mut output)
            .expect_err("hwhm is missing");
        assert!(matches!(error, CliError::Usage(_)));
    }
}
