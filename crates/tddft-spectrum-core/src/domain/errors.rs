use std::path::PathBuf;

pub type SpectrumResult<T> = Result<T, SpectrumError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectrumErrorCategory {
    Success,
    LoadError,
    InputValidationError,
    IoSystemError,
}

impl SpectrumErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::LoadError => 1,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::LoadError => "LoadError",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpectrumError {
    #[error("unable to load file '{}': {message}", path.display())]
    FileLoad { path: PathBuf, message: String },

    #[error("region marker '{marker}' was not found at or after line {search_start}")]
    MalformedInput { marker: String, search_start: usize },

    #[error("line {line_index} has no decimal token: '{line}'")]
    NoNumericToken { line_index: usize, line: String },

    #[error(
        "found {energy_records} excitation energy records but {strength_records} oscillator strength records"
    )]
    InconsistentRecordCount {
        energy_records: usize,
        strength_records: usize,
    },

    #[error("invalid {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("unable to write '{}': {message}", path.display())]
    OutputWrite { path: PathBuf, message: String },
}

impl SpectrumError {
    pub fn file_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FileLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    pub fn output_write(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::OutputWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    pub const fn category(&self) -> SpectrumErrorCategory {
        match self {
            Self::FileLoad { .. } => SpectrumErrorCategory::LoadError,
            Self::MalformedInput { .. }
            | Self::NoNumericToken { .. }
            | Self::InconsistentRecordCount { .. }
            | Self::InvalidParameter { .. } => SpectrumErrorCategory::InputValidationError,
            Self::OutputWrite { .. } => SpectrumErrorCategory::IoSystemError,
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::FileLoad { .. } => "IO.FILE_LOAD",
            Self::MalformedInput { .. } => "INPUT.MALFORMED_REGION",
            Self::NoNumericToken { .. } => "INPUT.NO_NUMERIC_TOKEN",
            Self::InconsistentRecordCount { .. } => "INPUT.RECORD_COUNT",
            Self::InvalidParameter { .. } => "INPUT.INVALID_PARAMETER",
            Self::OutputWrite { .. } => "IO.OUTPUT_WRITE",
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category().is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder(), self)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category()
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}
