//! Command-line interface module
//!
//! Provides the command router, per-command argument parsing and the
//! application's command implementations.

pub mod args;
pub mod commands;
pub mod router;

pub use commands::build_router;
pub use router::{CommandPath, ExitStatus, Handler, Registry, Router, Streams};
