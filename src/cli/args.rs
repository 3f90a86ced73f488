//! Per-command argument parsing
//!
//! Each leaf command owns a clap parser for its own tail. The router never
//! sees these flags, so siblings cannot collide.

use crate::{
    cli::router::{CommandPath, ExitStatus, FAILURE, Streams},
    error::Result,
};
use clap::Parser;
use std::{io::Write, ops::ControlFlow};

/// Example command with optional arguments (flags)
#[derive(Parser, Debug)]
pub struct CommandAArgs {
    /// Turn on foo
    #[arg(short, long)]
    pub foo: bool,

    /// Turn on bar
    #[arg(short, long)]
    pub bar: bool,
}

/// Example command positional/required arguments and flags
#[derive(Parser, Debug)]
pub struct CommandBArgs {
    /// Subcommand to run
    pub subcommand: String,

    /// Report more detail
    #[arg(short, long)]
    pub verbose: bool,
}

/// Nested command that takes no arguments
#[derive(Parser, Debug)]
pub struct LeafArgs {}

/// Runs brew update, brew upgrade, and brew cask upgrade
#[derive(Parser, Debug)]
pub struct BrewupsArgs {
    /// Show what would be upgraded, but do not actually upgrade anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Parse a command's tail, with `path` as the program name in clap output.
///
/// Parse failures and `--help` are rendered to the matching stream and
/// returned as `Break` with clap's exit code.
pub fn parse_tail<P: Parser>(
    path: &CommandPath,
    tail: &[String],
    io: &mut Streams<'_>,
) -> Result<ControlFlow<ExitStatus, P>> {
    let argv = std::iter::once(path.to_string()).chain(tail.iter().cloned());

    match P::try_parse_from(argv) {
        Ok(args) => Ok(ControlFlow::Continue(args)),
        Err(e) => {
            let rendered = e.render().to_string();
            if e.use_stderr() {
                write!(io.err, "{rendered}")?;
            } else {
                write!(io.out, "{rendered}")?;
            }
            Ok(ControlFlow::Break(
                ExitStatus::try_from(e.exit_code()).unwrap_or(FAILURE),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<P: Parser>(tail: &[&str]) -> (ControlFlow<ExitStatus, P>, String, String) {
        let tail: Vec<String> = tail.iter().map(|t| (*t).to_string()).collect();
        let path = CommandPath::new("prog").child("cmd");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let flow = parse_tail::<P>(&path, &tail, &mut Streams::new(&mut out, &mut err)).unwrap();
        (
            flow,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_parse_command_a_flags() {
        let (flow, _, _) = parse::<CommandAArgs>(&["-f"]);
        match flow {
            ControlFlow::Continue(args) => {
                assert!(args.foo);
                assert!(!args.bar);
            }
            ControlFlow::Break(code) => panic!("unexpected exit {code}"),
        }

        let (flow, _, _) = parse::<CommandAArgs>(&["--foo", "--bar"]);
        assert!(matches!(flow, ControlFlow::Continue(CommandAArgs { foo: true, bar: true })));
    }

    #[test]
    fn test_parse_command_b_requires_positional() {
        let (flow, out, err) = parse::<CommandBArgs>(&[]);
        assert!(matches!(flow, ControlFlow::Break(2)));
        assert!(out.is_empty());
        assert!(err.contains("<SUBCOMMAND>"));
        assert!(err.contains("prog cmd"));
    }

    #[test]
    fn test_parse_brewups_short_dry_run() {
        let (flow, _, _) = parse::<BrewupsArgs>(&["-n"]);
        assert!(matches!(flow, ControlFlow::Continue(BrewupsArgs { dry_run: true })));
    }

    #[test]
    fn test_leaf_rejects_extra_arguments() {
        let (flow, _, err) = parse::<LeafArgs>(&["extra"]);
        assert!(matches!(flow, ControlFlow::Break(2)));
        assert!(err.contains("extra"));
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let (flow, out, err) = parse::<BrewupsArgs>(&["--help"]);
        assert!(matches!(flow, ControlFlow::Break(0)));
        assert!(out.contains("--dry-run"));
        assert!(err.is_empty());
    }
}
