use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

mod config;
mod editor;
mod input;
mod logging;
mod render;
mod repl;
mod scripting;
mod terminal;

use config::ConfigEngine;
use repl::Repl;

/// Interactive Rhai REPL with a raw-mode line editor
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Config script to load instead of `<config dir>/rill/init.rhai`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the log (default `<cache dir>/rill/rill.log`)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Skip the startup banner
    #[arg(long)]
    no_banner: bool,

    /// Scripts to run before entering interactive mode
    scripts: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(log_file) = args.log_file.clone().or_else(logging::default_log_file) {
        logging::init_global(&log_file);
    }

    let mut config = ConfigEngine::new();
    let loaded = match &args.config {
        Some(path) => config.load_file(path),
        None => config.load_default(),
    };
    if let Err(e) = loaded {
        // Fall back to defaults; a broken config should not lock the user out
        eprintln!("{e}");
        warn!(error = %e, "config not applied");
    }

    let mut settings = config.settings();
    if args.no_banner {
        settings.banner = false;
    }
    info!(?settings, "starting");

    let mut repl = Repl::new(&settings);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for script in &args.scripts {
        let source = fs::read_to_string(script)
            .with_context(|| format!("failed to read {}", script.display()))?;
        repl.execute(&source, &mut stdout)?;
    }

    let mut terminal = terminal::for_stdin();
    repl.run(terminal.as_mut(), &mut stdin.lock(), &mut stdout)
        .context("terminal I/O failed")?;

    Ok(())
}
