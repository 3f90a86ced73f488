#![allow(clippy::cargo_common_metadata)]
use anyhow::{Context, Result};
use multi_level_argparse::{cli, cli::Streams, config::Config, setup_logging};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // Settings come from the environment; argv belongs to the router
    let config = Config::from_env().context("Invalid configuration")?;

    setup_logging(config.debug)?;

    let router = cli::build_router(&config).context("Failed to register commands")?;

    let argv: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let code = router.route(&argv, &mut Streams::new(&mut stdout, &mut stderr))?;
    stdout.flush()?;

    Ok(ExitCode::from(code))
}
