use std::{
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::{mpsc::sync_channel, Arc},
    time::Duration,
};

use clap::Parser;
use crossterm::terminal;
use log::{error, info};
use pong_shared::game_state::{GameState, Serve};
use screen::{CrosstermScreen, Geometry, Screen, StartupError};

mod game_loop;
mod input;
mod render;
mod screen;

/// How long the winner is shown before the terminal is handed back.
const GAME_OVER_HOLD: Duration = Duration::from_secs(3);

/// Two-player pong in the terminal.
///
/// Player 1 moves with z/w and s, player 2 with the arrow keys. Press p to pause and q to quit.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Milliseconds between game ticks
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(10..=1000))]
    tick_ms: u64,
    /// Append log records to this file (filtered with RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logger(cli.log_file.as_deref()) {
        eprintln!("failed to open log file: {err}");
        return ExitCode::FAILURE;
    }
    let mut screen = match init_screen() {
        Ok(screen) => screen,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let field = screen.playfield();
    let serve = Serve::default();
    let mut state = GameState::new(&field, serve);
    info!(
        "starting on a {}x{} screen, ticking every {}ms, serving {serve:?}",
        field.width, field.height, cli.tick_ms
    );

    let (intent_tx, intent_rx) = sync_channel(1);
    if let Err(err) = input::spawn_input_listener(screen.geometry(), intent_tx) {
        screen.release();
        eprintln!("failed to start input listener: {err}");
        return ExitCode::FAILURE;
    }
    let tick = Duration::from_millis(cli.tick_ms);
    let result = game_loop::play(&mut screen, &mut state, &intent_rx, tick, GAME_OVER_HOLD);
    // the input listener is still blocked on the terminal; returning from main ends it.
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("lost the terminal: {err}");
            eprintln!("lost the terminal: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_screen() -> Result<CrosstermScreen, StartupError> {
    let (width, height) = terminal::size()?;
    CrosstermScreen::init(Arc::new(Geometry::new(width, height)))
}

/// Stderr is the game's terminal, so records only go there when RUST_LOG asks for them.
fn init_logger(log_file: Option<&Path>) -> io::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
