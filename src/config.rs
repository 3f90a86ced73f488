//! Configuration management for the CLI
//!
//! Settings come from the environment rather than from flags: the routed
//! argument list belongs entirely to the command router.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable enabling debug logging
pub const DEBUG_ENV: &str = "MULTI_LEVEL_ARGPARSE_DEBUG";

/// Environment variable overriding the Homebrew executable
pub const BREW_ENV: &str = "MULTI_LEVEL_ARGPARSE_BREW";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Package manager configuration
    pub package_manager: PackageManagerConfig,
}

/// Package manager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManagerConfig {
    /// Homebrew executable used by `brewups`
    pub program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            package_manager: PackageManagerConfig::default(),
        }
    }
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            program: "brew".to_string(),
        }
    }
}

impl Config {
    /// Create configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(DEBUG_ENV) {
            config.debug = parse_flag(DEBUG_ENV, &value)?;
        }

        if let Some(program) = lookup(BREW_ENV) {
            config.package_manager.program = program;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.package_manager.program.trim().is_empty() {
            return Err(CliError::config(format!("{BREW_ENV} must not be empty")));
        }

        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CliError::config(format!(
            "{key} expects a boolean, got '{other}'"
        ))),
    }
}
