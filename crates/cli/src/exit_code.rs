//! Exit codes for the loader CLI.
//!
//! Distinct codes let scripts tell a bad GraphQL file apart from a bad
//! config or an unreadable file.

use graphql_config::ConfigError;
use graphql_loader::{ImportError, LoadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// Invalid GraphQL, an unknown fragment or a failed transform
    GenerationError = 1,
    /// Configuration error (missing or invalid config file)
    ConfigError = 2,
    /// I/O error (file read/write failure)
    IoError = 4,
}

impl ExitCode {
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Classify a command failure by the first recognizable cause in its chain.
    #[must_use]
    pub fn from_error(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if cause.is::<ConfigError>() {
                return Self::ConfigError;
            }
            if let Some(load) = cause.downcast_ref::<LoadError>() {
                return match load {
                    LoadError::Import(ImportError::FileNotFound { .. } | ImportError::Io { .. }) => {
                        Self::IoError
                    }
                    LoadError::Import(_) | LoadError::Document(_) => Self::GenerationError,
                };
            }
            if cause.is::<std::io::Error>() {
                return Self::IoError;
            }
        }
        Self::GenerationError
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::GenerationError => write!(f, "generation error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
