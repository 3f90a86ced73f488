//! Process execution utilities
//!
//! Runs external programs synchronously. Only a failure to launch is an
//! error; a non-zero exit status is reported back to the caller as data.

use crate::error::{CliError, Result};
use std::process::{Command, Stdio};
use tracing::{debug, info, instrument};

/// Utility for running external processes
#[derive(Debug)]
pub struct ProcessRunner {
    debug: bool,
}

impl ProcessRunner {
    /// Create a new process runner
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Run a command, inheriting stdout and discarding stderr.
    ///
    /// Returns the exit code, or `None` if the process was killed by a signal.
    #[instrument(skip(self))]
    pub fn run_command(&self, command: &str, args: &[&str]) -> Result<Option<i32>> {
        let cmd_str = format!("{} {}", command, args.join(" "));

        if self.debug {
            debug!("Running command: {}", cmd_str);
        } else {
            info!("+ {}", cmd_str);
        }

        let status = Command::new(command)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| CliError::process(cmd_str.clone(), e))?;

        let exit_code = status.code();
        debug!("Command finished: success={}, exit_code={:?}", status.success(), exit_code);
        Ok(exit_code)
    }

    /// Run multiple commands in sequence, stopping at the first launch failure
    #[instrument(skip(self, commands))]
    pub fn run_sequence(&self, commands: &[(&str, &[&str])]) -> Result<Vec<Option<i32>>> {
        let mut exit_codes = Vec::with_capacity(commands.len());

        for (i, (command, args)) in commands.iter().enumerate() {
            debug!(
                "Running command {} of {}: {}",
                i + 1,
                commands.len(),
                command
            );
            exit_codes.push(self.run_command(command, args)?);
        }

        debug!("All {} commands ran", commands.len());
        Ok(exit_codes)
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(false)
    }
}
