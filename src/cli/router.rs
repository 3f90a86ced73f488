//! Multi-level command dispatch
//!
//! A [`Router`] reads exactly one token from its argument tail, looks it up
//! in its [`Registry`] and hands everything after that token to the bound
//! [`Handler`]. A router is itself a handler, so registries nest: a nested
//! router sees only the tail its parent left over, and its messages are
//! scoped by the [`CommandPath`] consumed so far.

use crate::error::{CliError, Result};
use regex::Regex;
use std::{fmt, io::Write, path::Path, sync::LazyLock};
use tracing::{debug, instrument};

/// Process exit status produced by routers and handlers
pub type ExitStatus = u8;

/// Exit status of a successful run
pub const SUCCESS: ExitStatus = 0;

/// Exit status of a routing failure (missing or unknown command)
pub const FAILURE: ExitStatus = 1;

const HELP_TOKENS: [&str; 2] = ["-h", "--help"];

static COMMAND_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("command name pattern is valid")
});

/// Program name followed by every command name consumed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPath {
    segments: Vec<String>,
}

impl CommandPath {
    /// Create a root path for the given program name
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            segments: vec![program.into()],
        }
    }

    /// Create a root path from `argv[0]`, keeping only its file name
    #[must_use]
    pub fn from_argv0(argv0: &str) -> Self {
        let program = Path::new(argv0)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(argv0);
        Self::new(program)
    }

    /// Path one level deeper
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// The program name
    #[must_use]
    pub fn program(&self) -> &str {
        &self.segments[0]
    }

    /// Whether no command has been consumed yet
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// What the next token is called at this level
    #[must_use]
    pub fn noun(&self) -> &'static str {
        if self.is_root() { "command" } else { "subcommand" }
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(" "))
    }
}

/// Output streams handed down through every routing level
pub struct Streams<'a> {
    /// Usage, help and handler output
    pub out: &'a mut dyn Write,
    /// Error messages
    pub err: &'a mut dyn Write,
}

impl<'a> Streams<'a> {
    /// Bundle an output and an error stream
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }
}

/// Behavior bound to one command name
pub trait Handler {
    /// Run with the arguments left after `path`'s last segment was consumed
    fn run(&self, path: &CommandPath, tail: &[String], io: &mut Streams<'_>)
    -> Result<ExitStatus>;
}

struct FnHandler<F>(F);

impl<F> Handler for FnHandler<F>
where
    F: Fn(&CommandPath, &[String], &mut Streams<'_>) -> Result<ExitStatus>,
{
    fn run(
        &self,
        path: &CommandPath,
        tail: &[String],
        io: &mut Streams<'_>,
    ) -> Result<ExitStatus> {
        (self.0)(path, tail, io)
    }
}

struct Entry {
    name: String,
    about: String,
    handler: Box<dyn Handler>,
}

/// Ordered mapping from command name to handler
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `handler`.
    ///
    /// Names must be unique and look like `^[A-Za-z0-9][A-Za-z0-9_-]*$`.
    pub fn register<H>(mut self, name: &str, about: &str, handler: H) -> Result<Self>
    where
        H: Handler + 'static,
    {
        if !COMMAND_NAME.is_match(name) {
            return Err(CliError::registry(name, "is not a valid command name"));
        }
        if self.get(name).is_some() {
            return Err(CliError::registry(name, "is already registered"));
        }

        self.entries.push(Entry {
            name: name.to_string(),
            about: about.to_string(),
            handler: Box::new(handler),
        });
        Ok(self)
    }

    /// Bind `name` to a closure
    pub fn register_fn<F>(self, name: &str, about: &str, handler: F) -> Result<Self>
    where
        F: Fn(&CommandPath, &[String], &mut Streams<'_>) -> Result<ExitStatus> + 'static,
    {
        self.register(name, about, FnHandler(handler))
    }

    /// Look up a handler by exact, case-sensitive name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Handler> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.handler.as_ref())
    }

    /// Registered names and descriptions, in registration order
    pub fn commands(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.about.as_str()))
    }

    /// Number of registered commands
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| &entry.name))
            .finish()
    }
}

/// Dispatches one argument token to a registered handler
#[derive(Debug)]
pub struct Router {
    registry: Registry,
    description: Option<String>,
    epilog: Option<String>,
}

impl Router {
    /// Create a router over the given registry
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            description: None,
            epilog: None,
        }
    }

    /// Text shown after the usage summary in `--help` output
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text shown at the end of `--help` output
    #[must_use]
    pub fn with_epilog(mut self, epilog: impl Into<String>) -> Self {
        self.epilog = Some(epilog.into());
        self
    }

    /// The commands this router knows about
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Usage summary listing every registered command
    #[must_use]
    pub fn usage(&self, path: &CommandPath) -> String {
        let noun = path.noun();
        let mut usage = format!("usage: {path} <{noun}> [<args>]\n");

        if self.registry.is_empty() {
            return usage;
        }

        usage.push_str(&format!("\nThe most commonly used {path} {noun}s are:\n"));
        let width = self
            .registry
            .commands()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            + 3;
        for (name, about) in self.registry.commands() {
            usage.push_str(&format!("  {name:<width$}{about}\n"));
        }
        usage
    }

    /// Usage summary plus description, options and epilog
    #[must_use]
    pub fn help(&self, path: &CommandPath) -> String {
        let mut help = self.usage(path);

        if let Some(description) = &self.description {
            help.push_str(&format!("\n{description}\n"));
        }
        help.push_str("\nOptions:\n  -h, --help  Print help\n");
        if let Some(epilog) = &self.epilog {
            help.push_str(&format!("\n{epilog}\n"));
        }
        help
    }

    /// Route a full argument list whose first element is the program name
    pub fn route(&self, argv: &[String], io: &mut Streams<'_>) -> Result<ExitStatus> {
        match argv.split_first() {
            Some((argv0, args)) => self.dispatch(&CommandPath::from_argv0(argv0), args, io),
            None => self.dispatch(&CommandPath::new(env!("CARGO_PKG_NAME")), argv, io),
        }
    }

    /// Consume one token from `args` and run the handler bound to it
    #[instrument(skip(self, path, io), fields(path = %path))]
    pub fn dispatch(
        &self,
        path: &CommandPath,
        args: &[String],
        io: &mut Streams<'_>,
    ) -> Result<ExitStatus> {
        let Some((candidate, tail)) = args.split_first() else {
            debug!("No {} given, printing usage", path.noun());
            write!(io.out, "{}", self.usage(path))?;
            return Ok(FAILURE);
        };

        if HELP_TOKENS.contains(&candidate.as_str()) {
            write!(io.out, "{}", self.help(path))?;
            return Ok(SUCCESS);
        }

        match self.registry.get(candidate) {
            Some(handler) => {
                debug!(command = %candidate, tail = ?tail, "Dispatching");
                handler.run(&path.child(candidate), tail, io)
            }
            None => {
                debug!(command = %candidate, "Unrecognized {}", path.noun());
                writeln!(
                    io.err,
                    "{path}: '{candidate}' is not a {path} {}. See '{path} --help'",
                    path.noun()
                )?;
                Ok(FAILURE)
            }
        }
    }
}

impl Handler for Router {
    fn run(
        &self,
        path: &CommandPath,
        tail: &[String],
        io: &mut Streams<'_>,
    ) -> Result<ExitStatus> {
        self.dispatch(path, tail, io)
    }
}
