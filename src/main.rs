//! pp - terminal video playlist player

use std::io;

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};

use pp::player::{play_playlist, PlaybackResult};
use pp::{Cli, Config, Playlist};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(not(tarpaulin_include))]
fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "pp", &mut io::stdout());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply_to(&mut config);

    // Path problems are reported before the terminal check
    let playlist = Playlist::discover(&cli.path)?;

    if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        bail!("pp needs an interactive terminal");
    }

    match pp::logging::init() {
        Ok(path) => tracing::info!(log = %path.display(), version = pp::cli::VERSION, "pp started"),
        Err(e) => eprintln!("Warning: {:#}", e),
    }

    match play_playlist(&config, playlist)? {
        PlaybackResult::Quit => {}
        PlaybackResult::Interrupted => tracing::info!("interrupted"),
    }
    Ok(())
}
