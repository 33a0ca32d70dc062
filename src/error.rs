use std::fmt;
use std::process::ExitCode;

use planar_electrical::{CreepageError, ResistanceError};
use planar_spiral::SpiralError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad command line: unknown subcommand or flag, or a winding parameter
    /// given neither in the config file nor as a flag.
    Usage = 1,
    /// Input error (missing file, invalid YAML/JSON, out-of-range parameter).
    Input = 2,
    /// Processing error (infeasible winding, degenerate conductor, output write).
    Processing = 3,
}

#[derive(Debug)]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Usage,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Input,
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Processing,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code as u8)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<SpiralError> for CliError {
    fn from(err: SpiralError) -> Self {
        match err {
            SpiralError::InvalidArgument { .. } => Self::input(err.to_string()),
            SpiralError::Infeasible { .. } | SpiralError::Geometry(_) => {
                Self::processing(err.to_string())
            }
        }
    }
}

impl From<ResistanceError> for CliError {
    fn from(err: ResistanceError) -> Self {
        match err {
            ResistanceError::InvalidArgument { .. } | ResistanceError::Material(_) => {
                Self::input(err.to_string())
            }
            ResistanceError::InvalidSection { .. } => Self::processing(err.to_string()),
        }
    }
}

impl From<CreepageError> for CliError {
    fn from(err: CreepageError) -> Self {
        Self::input(err.to_string())
    }
}
