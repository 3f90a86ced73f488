//! # Multi-level argparse
//!
//! Subcommand dispatch for command-line tools: a [`cli::Router`] consumes one
//! token per level, validates it against a registry and forwards the rest of
//! the argument list to the bound handler, which may be another router.
//!
//! ## Features
//!
//! - Explicit, ordered command registries with generated usage output
//! - Nested routers with scoped usage and error messages
//! - Per-command flag parsing with clap
//! - A Homebrew update/upgrade helper (`brewups`)
//!
//! ## Example
//!
//! ```no_run
//! use multi_level_argparse::cli::{Registry, Router, Streams};
//! use std::io::Write;
//!
//! let registry = Registry::new().register_fn("hello", "Say hello", |path, _tail, io| {
//!     writeln!(io.out, "Running {path}")?;
//!     Ok(0)
//! })?;
//! let router = Router::new(registry);
//!
//! let argv: Vec<String> = std::env::args().collect();
//! let (mut out, mut err) = (std::io::stdout(), std::io::stderr());
//! let code = router.route(&argv, &mut Streams::new(&mut out, &mut err))?;
//! std::process::exit(i32::from(code));
//! # Ok::<(), multi_level_argparse::error::CliError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
///
/// Logs go to stderr so they never interleave with command output.
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
