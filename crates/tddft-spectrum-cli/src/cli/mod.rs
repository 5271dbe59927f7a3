mod commands;
mod helpers;

use clap::Parser;
use tddft_spectrum_core::domain::SpectrumError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error.diagnostic_line());
            if let Some(summary_line) = error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("tddft-spectrum".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "tddft-spectrum",
    version,
    about = "Gaussian-broadened UV-Vis spectra from Q-Chem TDDFT output"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Broaden excited-state sticks into an absorption spectrum
    Spectrum(commands::SpectrumArgs),
    /// List the excited-state transitions found in an output file
    Sticks(commands::SticksArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Spectrum(args) => commands::run_spectrum_command(args),
        CliCommand::Sticks(args) => commands::run_sticks_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Spectrum(#[from] SpectrumError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn placeholder(&self) -> &'static str {
        match self {
            Self::Usage(_) => "INPUT.CLI_USAGE",
            Self::Spectrum(error) => error.placeholder(),
            Self::Internal(_) => "IO.CLI",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Spectrum(error) => error.exit_code(),
            Self::Internal(_) => 3,
        }
    }

    pub fn diagnostic_line(&self) -> String {
        match self {
            Self::Spectrum(error) => error.diagnostic_line(),
            Self::Usage(message) => format!("ERROR: [{}] {}", self.placeholder(), message.trim_end()),
            Self::Internal(error) => format!("ERROR: [{}] {:#}", self.placeholder(), error),
        }
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        Some(format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}
