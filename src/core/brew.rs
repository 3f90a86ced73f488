//! Homebrew update/upgrade sequence
//!
//! Runs `brew update`, `brew upgrade` and `brew cask upgrade` one after the
//! other. Step exit codes are logged but never acted upon.

use crate::{config::Config, error::Result, utils::process::ProcessRunner};
use tracing::{debug, info, instrument};

/// Drives the three Homebrew steps
#[derive(Debug)]
pub struct BrewUpgrader {
    program: String,
    process_runner: ProcessRunner,
}

impl BrewUpgrader {
    /// Create a new upgrader with the given configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.package_manager.program.clone(),
            process_runner: ProcessRunner::new(config.debug),
        }
    }

    /// Arguments for each step, in execution order
    #[must_use]
    pub fn steps(dry_run: bool) -> Vec<Vec<&'static str>> {
        let mut upgrade = vec!["upgrade"];
        let mut cask_upgrade = vec!["cask", "upgrade"];

        if dry_run {
            upgrade.push("--dry-run");
            cask_upgrade.push("--dry-run");
        }

        vec![vec!["update"], upgrade, cask_upgrade]
    }

    /// Run update, upgrade and cask upgrade.
    ///
    /// Fails only when `brew` itself cannot be launched.
    #[instrument(skip(self))]
    pub fn upgrade(&self, dry_run: bool) -> Result<Vec<Option<i32>>> {
        info!("Running {} update/upgrade (dry_run={})", self.program, dry_run);

        let steps = Self::steps(dry_run);
        let commands: Vec<(&str, &[&str])> = steps
            .iter()
            .map(|args| (self.program.as_str(), args.as_slice()))
            .collect();

        let exit_codes = self.process_runner.run_sequence(&commands)?;
        debug!("Step exit codes: {:?}", exit_codes);

        Ok(exit_codes)
    }
}
