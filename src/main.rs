mod app;
mod command;
mod config;
mod consts;
mod engine;
mod play;
mod util;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use lexopt::prelude::*;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let Some(args) = Args::parse()? else {
        return Ok(ExitCode::SUCCESS);
    };
    let config = match args.config {
        Some(path) => Config::load(&path, false)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            let path = Config::default_path().context("failed to locate configuration")?;
            Config::load(&path, true)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
    };
    let terminal = ratatui::init();
    let r = App::new(config).run(terminal);
    ratatui::restore();
    Ok(io_exit(r))
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Args {
    config: Option<PathBuf>,
}

impl Args {
    /// Parse the command line.  Returns `None` if `--help` or `--version`
    /// was handled and the program should exit.
    fn parse() -> Result<Option<Args>, lexopt::Error> {
        let mut args = Args::default();
        let mut parser = lexopt::Parser::from_env();
        while let Some(arg) = parser.next()? {
            match arg {
                Short('c') | Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Short('h') | Long("help") => {
                    println!("Usage: {} [-c|--config <file>]", env!("CARGO_PKG_NAME"));
                    println!();
                    println!("Steer with the arrow keys, wasd, or hjkl.");
                    println!("Space starts & pauses; q quits.");
                    return Ok(None);
                }
                Short('V') | Long("version") => {
                    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                    return Ok(None);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Some(args))
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
