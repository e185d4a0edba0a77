use std::{
    io,
    sync::{mpsc::SyncSender, Arc},
    thread::{Builder, JoinHandle},
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error};
use pong_shared::{
    input::{Direction, Intent},
    Player,
};

use crate::screen::Geometry;

pub fn decode_key(key: KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        // raw mode swallows SIGINT, so ctrl-c has to be handled as a key.
        return match key.code {
            KeyCode::Char('c') => Some(Intent::Quit),
            _ => None,
        };
    }
    let intent = match key.code {
        KeyCode::Char('q') => Intent::Quit,
        KeyCode::Char('p') => Intent::TogglePause,
        KeyCode::Char('z') | KeyCode::Char('w') => Intent::MovePaddle(Player::One, Direction::Up),
        KeyCode::Char('s') => Intent::MovePaddle(Player::One, Direction::Down),
        KeyCode::Up => Intent::MovePaddle(Player::Two, Direction::Up),
        KeyCode::Down => Intent::MovePaddle(Player::Two, Direction::Down),
        _ => return None,
    };
    Some(intent)
}

/// Blocks on terminal events so the tick loop never has to. Key presses are decoded and handed
/// over one at a time; resizes are applied to `geometry` straight away.
pub fn spawn_input_listener(
    geometry: Arc<Geometry>,
    intent_tx: SyncSender<Intent>,
) -> io::Result<JoinHandle<()>> {
    Builder::new()
        .name("input_listener".to_owned())
        .spawn(move || loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(err) => {
                    error!("failed to read terminal event: {err}");
                    return;
                }
            };
            match event {
                Event::Key(key) => {
                    let Some(intent) = decode_key(key) else {
                        continue;
                    };
                    debug!("key {:?} decoded to {intent:?}", key.code);
                    if intent_tx.send(intent).is_err() {
                        // the tick loop has finished.
                        return;
                    }
                }
                Event::Resize(width, height) => {
                    debug!("terminal resized to {width}x{height}");
                    geometry.resize(width, height);
                }
                _ => {}
            }
        })
}
