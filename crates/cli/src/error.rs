//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: recoloring error (bad SVG document)
//! - 11: I/O error (file read/write)
//! - 12: input error (bad color string, refused overwrite)
//! - 13: serialization error

use icon_tint_core::TintError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A core recoloring error (invalid SVG document).
    Tint(TintError),
    /// An I/O error (file read or write).
    Io(String),
    /// A user input error (bad color string, refused overwrite).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Tint(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Tint(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<TintError> for CliError {
    fn from(e: TintError) -> Self {
        match e {
            // Bad colors are user input, not document failures.
            TintError::InvalidColor(_) => CliError::Input(e.to_string()),
            other => CliError::Tint(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
