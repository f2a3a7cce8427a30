//! Error Types
//!
//! Crate-wide error taxonomy for the provisioning workflow. Every fallible
//! path surfaces one of these variants; `main` maps them to exit codes.
//!
//! The operator declining a prompt is modeled as [`SetupError::Aborted`]:
//! it still exits nonzero but is reported as a notice, not a failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by argument resolution, precondition checks, and the
/// provisioning workflow itself.
#[derive(Debug, Error)]
pub enum SetupError {
    /// An argument that is not a recognized flag.
    #[error("unknown option: {0}")]
    UnknownFlag(String),

    /// A flag was given without its value.
    #[error("{0} requires a value")]
    MissingValue(String),

    /// A name or path flag was given an empty value.
    #[error("{0} requires a non-empty value")]
    EmptyValue(String),

    /// `--fordev` was given something other than Y or N.
    #[error("invalid value for {flag}: '{value}' (expected Y or N)")]
    InvalidDevMode { flag: String, value: String },

    /// The home directory could not be determined for the default
    /// install root.
    #[error("HOME is not set; pass --condadir explicitly")]
    HomeNotSet,

    /// The conda install root does not contain an activation script.
    #[error("conda activation script not found: {}", .0.display())]
    CondaNotFound(PathBuf),

    /// The operator declined a confirmation or chose to abort.
    #[error("setup aborted by operator")]
    Aborted,

    /// An external provisioning stage exited with a failure status.
    /// The external tool's own diagnostics have already been printed.
    #[error("{} failed{}", .stage, exit_suffix(.code))]
    StageFailed { stage: String, code: Option<i32> },

    /// A manifest override file could not be parsed.
    #[error("failed to parse manifest file {}: {}", .path.display(), .source)]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" with exit code {}", c),
        None => " (terminated by signal)".to_string(),
    }
}

impl SetupError {
    /// True for the operator-abort control path, which is reported as a
    /// notice rather than a failure.
    pub fn is_abort(&self) -> bool {
        matches!(self, SetupError::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_flag_message_names_token() {
        let err = SetupError::UnknownFlag("--bogus".to_string());
        assert!(err.to_string().contains("--bogus"));
    }

    #[test]
    fn test_stage_failed_with_code() {
        let err = SetupError::StageFailed {
            stage: "provision".to_string(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "provision failed with exit code 2");
    }

    #[test]
    fn test_stage_failed_signal() {
        let err = SetupError::StageFailed {
            stage: "backup".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_is_abort() {
        assert!(SetupError::Aborted.is_abort());
        assert!(!SetupError::HomeNotSet.is_abort());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
    }
}
