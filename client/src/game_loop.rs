use std::{
    io,
    sync::mpsc::{Receiver, TryRecvError},
    thread::sleep,
    time::Duration,
};

use log::{debug, info, trace, warn};
use pong_shared::{
    game_state::{GameState, Phase},
    input::Intent,
    Player,
};

use crate::{
    render::{draw_game_over, Renderer},
    screen::Screen,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    Won(Player),
}

/// Plays one game to the end, shows the winner for `hold`, and hands the terminal back however
/// the game ended.
pub fn play<S: Screen>(
    screen: &mut S,
    state: &mut GameState,
    intents: &Receiver<Intent>,
    tick: Duration,
    hold: Duration,
) -> io::Result<Outcome> {
    let result = run(screen, state, intents, tick).and_then(|outcome| {
        if let Outcome::Won(winner) = outcome {
            draw_game_over(&mut *screen, winner)?;
            sleep(hold);
        }
        Ok(outcome)
    });
    screen.release();
    result
}

/// Runs ticks until someone wins or quits: one intent, one update and one frame per tick, then a
/// fixed sleep.
pub fn run<S: Screen>(
    screen: &mut S,
    state: &mut GameState,
    intents: &Receiver<Intent>,
    tick: Duration,
) -> io::Result<Outcome> {
    let mut renderer = Renderer::new();
    loop {
        let field = screen.playfield();
        if let Phase::GameOver { winner } = state.phase(&field) {
            info!("{winner} won with the ball at column {}", state.ball.col);
            return Ok(Outcome::Won(winner));
        }
        match intents.try_recv() {
            Ok(Intent::Quit) => {
                info!("quit requested");
                return Ok(Outcome::Quit);
            }
            Ok(intent) => {
                if state.apply_intent(intent, &field) && intent == Intent::TogglePause {
                    debug!("paused: {}", state.is_paused());
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                // nothing can ask to quit any more.
                warn!("input listener stopped, quitting");
                return Ok(Outcome::Quit);
            }
        }
        let bounces = state.update(&field);
        if bounces.wall {
            debug!("ball bounced off a wall at row {}", state.ball.row);
        }
        if let Some(player) = bounces.paddle {
            debug!("ball bounced off {player}'s paddle at column {}", state.ball.col);
        }
        if !state.is_paused() {
            trace!(
                "ball: row={}, col={}; paddle 1: row={}; paddle 2: row={}",
                state.ball.row,
                state.ball.col,
                state.paddle(Player::One).row,
                state.paddle(Player::Two).row,
            );
            renderer.draw(screen, state, &field)?;
        }
        sleep(tick);
    }
}
