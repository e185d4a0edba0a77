use crate::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What a key press means to the game, decoded once at the terminal boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Quit,
    TogglePause,
    MovePaddle(Player, Direction),
}
