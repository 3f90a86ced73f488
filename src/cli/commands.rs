//! Command implementations for the CLI

use crate::{
    cli::{
        args::{BrewupsArgs, CommandAArgs, CommandBArgs, LeafArgs, parse_tail},
        router::{CommandPath, ExitStatus, Handler, Registry, Router, SUCCESS, Streams},
    },
    config::Config,
    core::brew::BrewUpgrader,
    error::{CliError, Result},
};
use std::{io::Write, ops::ControlFlow};
use tracing::{debug, info, instrument};

/// Build the top-level router with every application command registered
pub fn build_router(config: &Config) -> Result<Router> {
    let registry = Registry::new()
        .register(
            "command_a",
            "Example command with optional arguments (flags)",
            CommandA,
        )?
        .register(
            "command_b",
            "Example command positional/required arguments and flags",
            CommandB,
        )?
        .register(
            "command_c",
            "Example command with another layer of subcommands",
            command_c()?,
        )?
        .register(
            "brewups",
            "Runs brew update, brew upgrade, and brew cask upgrade",
            Brewups::new(config),
        )?;

    Ok(Router::new(registry)
        .with_description("Multi-level argparse in Rust")
        .with_epilog(
            "Based on Chase Seibert Blog post, \
             https://chase-seibert.github.io/blog/2014/03/21/python-multilevel-argparse.html",
        ))
}

/// Example command with optional arguments (flags)
#[derive(Debug)]
pub struct CommandA;

impl Handler for CommandA {
    #[instrument(skip(self, io))]
    fn run(
        &self,
        path: &CommandPath,
        tail: &[String],
        io: &mut Streams<'_>,
    ) -> Result<ExitStatus> {
        let args = match parse_tail::<CommandAArgs>(path, tail, io)? {
            ControlFlow::Continue(args) => args,
            ControlFlow::Break(code) => return Ok(code),
        };

        writeln!(io.out, "Running {path}, foo={}, bar={}", args.foo, args.bar)?;
        Ok(SUCCESS)
    }
}

/// Example command with a required positional argument
#[derive(Debug)]
pub struct CommandB;

impl Handler for CommandB {
    #[instrument(skip(self, io))]
    fn run(
        &self,
        path: &CommandPath,
        tail: &[String],
        io: &mut Streams<'_>,
    ) -> Result<ExitStatus> {
        let args = match parse_tail::<CommandBArgs>(path, tail, io)? {
            ControlFlow::Continue(args) => args,
            ControlFlow::Break(code) => return Ok(code),
        };

        writeln!(
            io.out,
            "Running {path}, subcommand={}, verbose={}",
            args.subcommand, args.verbose
        )?;
        Ok(SUCCESS)
    }
}

/// Nested router for `command_c`
fn command_c() -> Result<Router> {
    let registry = Registry::new()
        .register_fn("one", "First nested example command", run_leaf)?
        .register_fn("two", "Second nested example command", run_leaf)?;

    Ok(Router::new(registry).with_description("Example command with another layer of subcommands"))
}

/// Nested leaf: accepts no arguments and confirms what ran
fn run_leaf(path: &CommandPath, tail: &[String], io: &mut Streams<'_>) -> Result<ExitStatus> {
    if let ControlFlow::Break(code) = parse_tail::<LeafArgs>(path, tail, io)? {
        return Ok(code);
    }

    writeln!(io.out, "Running {path}")?;
    Ok(SUCCESS)
}

/// Homebrew update/upgrade wrapper
#[derive(Debug)]
pub struct Brewups {
    upgrader: BrewUpgrader,
}

impl Brewups {
    /// Create the handler with the configured Homebrew executable
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            upgrader: BrewUpgrader::new(config),
        }
    }
}

impl Handler for Brewups {
    #[instrument(skip(self, io))]
    fn run(
        &self,
        path: &CommandPath,
        tail: &[String],
        io: &mut Streams<'_>,
    ) -> Result<ExitStatus> {
        let args = match parse_tail::<BrewupsArgs>(path, tail, io)? {
            ControlFlow::Continue(args) => args,
            ControlFlow::Break(code) => return Ok(code),
        };

        // Stdout is shared with the child processes
        io.out.flush()?;

        match self.upgrader.upgrade(args.dry_run) {
            Ok(_) => info!("Homebrew update/upgrade finished"),
            Err(CliError::Process { command, source }) => {
                debug!("Could not launch {}: {}", command, source);
                writeln!(
                    io.out,
                    "{}: Error when trying to use homebrew-Cask (brew). \
                     Check if homebrew is installed and working correctly.",
                    path.program()
                )?;
            }
            Err(e) => return Err(e),
        }

        Ok(SUCCESS)
    }
}
