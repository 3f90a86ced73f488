//! Error types for the command router
//!
//! Router validation failures (missing or unknown commands) are not errors:
//! they are reported on the output streams and turned into an exit code.
//! These variants cover everything that can actually go wrong underneath.

use thiserror::Error;

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// An external program could not be started
    #[error("Process error: failed to launch {command}")]
    Process {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A registry was assembled with a bad command name
    #[error("Registry error: '{name}' {message}")]
    Registry { name: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Writing to an output stream failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create a new process launch error
    pub fn process(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Process {
            command: command.into(),
            source,
        }
    }

    /// Create a new registry error
    pub fn registry(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registry {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CliError>;
