//! Utility modules for common functionality
//!
//! Provides process execution for handlers that shell out.

pub mod process;

pub use process::ProcessRunner;
