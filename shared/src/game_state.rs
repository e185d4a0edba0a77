use std::iter::once;

use crate::{
    collision::{collides_with_paddle, collides_with_wall},
    input::{Direction, Intent},
    style::{Style, BALL_STYLE, PADDLE_ONE_STYLE, PADDLE_TWO_STYLE},
    Player,
};

pub const PADDLE_SYMBOL: char = '\u{2588}';
pub const BALL_SYMBOL: char = '\u{25cf}';
pub const PADDLE_HEIGHT: i32 = 8;
/// Rows kept free above and below the table.
pub const BOUNDARY_OFFSET_ROW: i32 = 5;
/// Columns kept free left and right of the table.
pub const BOUNDARY_OFFSET_COL: i32 = 10;
/// How far each paddle sits inside its edge of the table.
pub const PADDLE_INSET: i32 = 5;
pub const BALL_VELOCITY_ROW: i32 = 1;
pub const BALL_VELOCITY_COL: i32 = 2;
pub const MIN_SCREEN_WIDTH: i32 = 101;
pub const MIN_SCREEN_HEIGHT: i32 = 31;

const _CHECKS: () = {
    assert!(
        MIN_SCREEN_HEIGHT - 2 * BOUNDARY_OFFSET_ROW > PADDLE_HEIGHT,
        "the smallest playable screen must leave room for a paddle to move"
    );
    assert!(
        MIN_SCREEN_WIDTH / 2 - BOUNDARY_OFFSET_COL - PADDLE_INSET > BALL_VELOCITY_COL,
        "the ball must start clear of both paddles on the smallest playable screen"
    );
};

/// The terminal grid the game is played on, re-read from the display every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
}

impl Playfield {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_playable(&self) -> bool {
        self.width >= MIN_SCREEN_WIDTH && self.height >= MIN_SCREEN_HEIGHT
    }

    /// First row of the play area.
    pub fn top(&self) -> i32 {
        BOUNDARY_OFFSET_ROW
    }

    /// First row below the play area.
    pub fn bottom(&self) -> i32 {
        self.height - BOUNDARY_OFFSET_ROW
    }

    /// First column of the table.
    pub fn left(&self) -> i32 {
        BOUNDARY_OFFSET_COL + 1
    }

    /// First column right of the table.
    pub fn right(&self) -> i32 {
        self.width - BOUNDARY_OFFSET_COL - 1
    }

    pub fn net_col(&self) -> i32 {
        self.width / 2
    }

    /// Objects are only drawn while they are over the table.
    pub fn is_visible_col(&self, col: i32) -> bool {
        col >= self.left() && col < self.right()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameObject {
    pub row: i32,
    pub col: i32,
    pub width: i32,
    pub height: i32,
    pub vel_row: i32,
    pub vel_col: i32,
    pub symbol: char,
    pub style: Style,
}

impl GameObject {
    pub fn paddle(field: &Playfield, player: Player) -> Self {
        let (col, style) = match player {
            Player::One => (BOUNDARY_OFFSET_COL + PADDLE_INSET, PADDLE_ONE_STYLE),
            Player::Two => (
                field.width - BOUNDARY_OFFSET_COL - PADDLE_INSET - 1,
                PADDLE_TWO_STYLE,
            ),
        };
        Self {
            row: field.height / 2 - PADDLE_HEIGHT / 2,
            col,
            width: 1,
            height: PADDLE_HEIGHT,
            vel_row: 0,
            vel_col: 0,
            symbol: PADDLE_SYMBOL,
            style,
        }
    }

    pub fn ball(field: &Playfield, serve: Serve) -> Self {
        Self {
            row: field.height / 2,
            col: field.width / 2,
            width: 1,
            height: 1,
            vel_row: if serve.moving_down {
                BALL_VELOCITY_ROW
            } else {
                -BALL_VELOCITY_ROW
            },
            vel_col: if serve.moving_right {
                BALL_VELOCITY_COL
            } else {
                -BALL_VELOCITY_COL
            },
            symbol: BALL_SYMBOL,
            style: BALL_STYLE,
        }
    }

    pub fn advance(&mut self) {
        self.row += self.vel_row;
        self.col += self.vel_col;
    }
}

/// The direction the ball leaves the centre of the table in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Serve {
    pub moving_down: bool,
    pub moving_right: bool,
}

impl Default for Serve {
    fn default() -> Self {
        Self {
            moving_down: true,
            moving_right: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver { winner: Player },
}

/// What an update bounced off, if anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounces {
    pub wall: bool,
    pub paddle: Option<Player>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Indexed by [`Player::index`].
    pub paddles: [GameObject; 2],
    pub ball: GameObject,
    paused: bool,
}

impl GameState {
    pub fn new(field: &Playfield, serve: Serve) -> Self {
        Self {
            paddles: [
                GameObject::paddle(field, Player::One),
                GameObject::paddle(field, Player::Two),
            ],
            ball: GameObject::ball(field, serve),
            paused: false,
        }
    }

    pub fn paddle(&self, player: Player) -> &GameObject {
        &self.paddles[player.index()]
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Every live object in draw order: player 1's paddle, player 2's paddle, then the ball.
    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.paddles.iter().chain(once(&self.ball))
    }

    fn objects_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.paddles.iter_mut().chain(once(&mut self.ball))
    }

    /// Applies one decoded intent, returning whether anything changed.
    ///
    /// Paddle moves that would leave the play area are rejected rather than clamped, as are paddle
    /// moves while paused.
    pub fn apply_intent(&mut self, intent: Intent, field: &Playfield) -> bool {
        match intent {
            // quitting tears down the display, which is the game loop's job.
            Intent::Quit => false,
            Intent::TogglePause => {
                self.paused = !self.paused;
                true
            }
            Intent::MovePaddle(..) if self.paused => false,
            Intent::MovePaddle(player, Direction::Up) => {
                let paddle = &mut self.paddles[player.index()];
                if paddle.row > field.top() {
                    paddle.row -= 1;
                    true
                } else {
                    false
                }
            }
            Intent::MovePaddle(player, Direction::Down) => {
                let paddle = &mut self.paddles[player.index()];
                if paddle.row + paddle.height < field.bottom() {
                    paddle.row += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Advances one tick. Does nothing while paused.
    pub fn update(&mut self, field: &Playfield) -> Bounces {
        if self.paused {
            return Bounces::default();
        }
        for object in self.objects_mut() {
            object.advance();
        }
        let mut bounces = Bounces::default();
        if collides_with_wall(&self.ball, field) {
            self.ball.vel_row = -self.ball.vel_row;
            bounces.wall = true;
        }
        bounces.paddle = Player::ALL
            .into_iter()
            .find(|&player| collides_with_paddle(&self.ball, self.paddle(player)));
        if bounces.paddle.is_some() {
            self.ball.vel_col = -self.ball.vel_col;
        }
        bounces
    }

    /// The player who won, once the ball has left the table sideways.
    pub fn winner(&self, field: &Playfield) -> Option<Player> {
        if self.ball.col < 0 {
            Some(Player::Two)
        } else if self.ball.col >= field.width {
            Some(Player::One)
        } else {
            None
        }
    }

    pub fn phase(&self, field: &Playfield) -> Phase {
        match self.winner(field) {
            Some(winner) => Phase::GameOver { winner },
            None if self.paused => Phase::Paused,
            None => Phase::Running,
        }
    }
}
