//! Core functionality behind the example commands
//!
//! Contains the Homebrew upgrade sequence used by `brewups`.

pub mod brew;

pub use brew::BrewUpgrader;
