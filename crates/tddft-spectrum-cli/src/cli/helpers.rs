use super::CliError;
use anyhow::Context;
use std::fs;
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;
use tddft_spectrum_core::common::config::SpectrumConfigFile;
use tddft_spectrum_core::domain::SpectrumError;
use tracing_subscriber::EnvFilter;

pub(super) const PATH_PROMPT: &str = "What is the path for the TDDFT file?";
pub(super) const HWHM_PROMPT: &str = "Enter the hwhm of your peaks in nm:";

pub(super) fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,tddft_spectrum_core={default_level},tddft_spectrum_cli={default_level}"
        ))
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

/// Reads a run configuration; its relative paths resolve next to the file itself.
pub(super) fn load_config_file(path: &Path) -> Result<SpectrumConfigFile, CliError> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read run configuration '{}'", path.display()))?;
    let config = serde_json::from_str::<SpectrumConfigFile>(&content)
        .with_context(|| format!("failed to parse run configuration '{}'", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base))
}

/// Drops every double quote, as left behind by drag-and-drop or "copy as path".
pub(super) fn strip_quotes(raw: &str) -> String {
    raw.trim().replace('"', "")
}

pub(super) fn prompt_line<R, W>(reader: &mut R, writer: &mut W, question: &str) -> Result<String, CliError>
where
    R: BufRead,
    W: Write,
{
    writeln!(writer, "{}", question)
        .and_then(|_| writer.flush())
        .context("failed to write prompt")?;

    let mut answer = String::new();
    let read = reader
        .read_line(&mut answer)
        .context("failed to read answer from standard input")?;
    if read == 0 {
        return Err(CliError::Usage(format!(
            "no answer given for '{}' (standard input closed)",
            question
        )));
    }
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

pub(super) fn parse_hwhm(raw: &str) -> Result<f64, CliError> {
    raw.trim().parse::<f64>().map_err(|_| {
        CliError::Spectrum(SpectrumError::invalid_parameter(
            "hwhm",
            format!("'{}' is not a number of nm", raw.trim()),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::{load_config_file, parse_hwhm, prompt_line, strip_quotes};
    use crate::cli::CliError;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn quotes_are_removed_from_pasted_paths() {
        assert_eq!(strip_quotes("\"C:\\runs\\dye.out\"\n"), "C:\\runs\\dye.out");
        assert_eq!(strip_quotes("  plain.out "), "plain.out");
    }

    #[test]
    fn prompt_reads_one_trimmed_line() {
        let mut input = Cursor::new("  dye.out  \r\n20\n");
        let mut output = Vec::new();

        let answer = prompt_line(&mut input, &mut output, "Path?").expect("answer should be read");
        assert_eq!(answer, "  dye.out  ");
        assert_eq!(String::from_utf8(output).expect("utf8 prompt"), "Path?\n");

        let mut sink = Vec::new();
        let second = prompt_line(&mut input, &mut sink, "Width?").expect("second answer");
        assert_eq!(second, "20");
    }

    #[test]
    fn closed_stdin_is_a_usage_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let error = prompt_line(&mut input, &mut output, "Path?").expect_err("no input");
        assert!(matches!(error, CliError::Usage(_)));
    }

    #[test]
    fn non_numeric_hwhm_is_invalid_parameter() {
        assert_eq!(parse_hwhm(" 12.5 ").expect("numeric"), 12.5);
        let error = parse_hwhm("wide").expect_err("not a number");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn config_file_paths_resolve_next_to_the_file() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("run.json");
        fs::write(
            &path,
            r#"{ "inputPath": "calc/dye.out", "hwhm": 18.0, "minWavelengthNm": 150.0 }"#,
        )
        .expect("config should be written");

        let config = load_config_file(&path).expect("config should load");
        assert_eq!(config.input_path, Some(temp.path().join("calc/dye.out")));
        assert_eq!(config.hwhm, Some(18.0));
        assert_eq!(config.min_wavelength_nm, Some(150.0));
        assert!(config.grid.is_none());
    }

    #[test]
    fn broken_config_file_is_an_internal_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("run.json");
        fs::write(&path, "{ not json").expect("config should be written");
        let error = load_config_file(&path).expect_err("invalid json");
        assert!(matches!(error, CliError::Internal(_)));
    }
}
