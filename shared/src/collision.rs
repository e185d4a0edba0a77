//! One-step lookahead collision checks. Both predicates look at where the ball will be after its
//! next move, so the bounce happens before the ball overlaps a wall or paddle.

use crate::game_state::{GameObject, Playfield};

/// True when the ball's next row falls outside the vertical play area.
pub fn collides_with_wall(ball: &GameObject, field: &Playfield) -> bool {
    let next_row = ball.row + ball.vel_row;
    next_row < field.top() || next_row >= field.bottom()
}

/// True when the ball is level with the paddle and its next column crosses the paddle's column
/// coming from the side the ball is currently on.
///
/// The paddle is treated as a line one column wide, whatever its `width`.
pub fn collides_with_paddle(ball: &GameObject, paddle: &GameObject) -> bool {
    let next_col = ball.col + ball.vel_col;
    let crosses_column = if ball.col < paddle.col {
        next_col >= paddle.col
    } else {
        next_col <= paddle.col
    };
    crosses_column && ball.row >= paddle.row && ball.row < paddle.row + paddle.height
}

#[cfg(test)]
mod tests {
    use crate::{
        collision::{collides_with_paddle, collides_with_wall},
        game_state::{GameObject, Playfield, Serve, PADDLE_HEIGHT},
        Player,
    };

    fn field() -> Playfield {
        Playfield::new(120, 40)
    }

    fn ball_at(row: i32, col: i32, vel_row: i32, vel_col: i32) -> GameObject {
        let mut ball = GameObject::ball(&field(), Serve::default());
        ball.row = row;
        ball.col = col;
        ball.vel_row = vel_row;
        ball.vel_col = vel_col;
        ball
    }

    fn paddle_at(row: i32, col: i32) -> GameObject {
        let mut paddle = GameObject::paddle(&field(), Player::One);
        paddle.row = row;
        paddle.col = col;
        paddle
    }

    #[test]
    fn wall_top() {
        // next row would be above the top boundary.
        assert!(collides_with_wall(&ball_at(5, 60, -1, 2), &field()));
        // next row is exactly the top boundary, still inside.
        assert!(!collides_with_wall(&ball_at(6, 60, -1, 2), &field()));
        // moving away from the top.
        assert!(!collides_with_wall(&ball_at(5, 60, 1, 2), &field()));
    }

    #[test]
    fn wall_bottom() {
        // the bottom boundary row itself is outside the play area.
        assert!(collides_with_wall(&ball_at(34, 60, 1, 2), &field()));
        assert!(!collides_with_wall(&ball_at(33, 60, 1, 2), &field()));
        assert!(!collides_with_wall(&ball_at(34, 60, -1, 2), &field()));
    }

    #[test]
    fn paddle_from_the_left() {
        let paddle = paddle_at(16, 104);
        assert!(collides_with_paddle(&ball_at(20, 102, 1, 2), &paddle));
        assert!(collides_with_paddle(&ball_at(20, 103, 1, 2), &paddle));
        assert!(!collides_with_paddle(&ball_at(20, 101, 1, 2), &paddle));
        // moving away.
        assert!(!collides_with_paddle(&ball_at(20, 102, 1, -2), &paddle));
    }

    #[test]
    fn paddle_from_the_right() {
        let paddle = paddle_at(16, 15);
        assert!(collides_with_paddle(&ball_at(20, 17, 1, -2), &paddle));
        assert!(collides_with_paddle(&ball_at(20, 16, 1, -2), &paddle));
        assert!(!collides_with_paddle(&ball_at(20, 18, 1, -2), &paddle));
        // moving away.
        assert!(!collides_with_paddle(&ball_at(20, 17, 1, 2), &paddle));
    }

    #[test]
    fn paddle_far_face_never_reflects() {
        // a ball behind the left paddle heading further left must not bounce off its back.
        let left = paddle_at(16, 15);
        assert!(!collides_with_paddle(&ball_at(20, 13, 1, -2), &left));
        // a ball behind the right paddle heading further right must not bounce off its back.
        let right = paddle_at(16, 104);
        assert!(!collides_with_paddle(&ball_at(20, 106, 1, 2), &right));
    }

    #[test]
    fn paddle_rows_are_half_open() {
        let paddle = paddle_at(16, 104);
        assert!(!collides_with_paddle(&ball_at(15, 102, 1, 2), &paddle));
        assert!(collides_with_paddle(&ball_at(16, 102, 1, 2), &paddle));
        assert!(collides_with_paddle(
            &ball_at(16 + PADDLE_HEIGHT - 1, 102, 1, 2),
            &paddle
        ));
        assert!(!collides_with_paddle(
            &ball_at(16 + PADDLE_HEIGHT, 102, 1, 2),
            &paddle
        ));
    }

    #[test]
    fn paddle_width_is_ignored() {
        let mut paddle = paddle_at(16, 104);
        paddle.width = 3;
        // would overlap the paddle's extra columns, but only its column counts.
        assert!(!collides_with_paddle(&ball_at(20, 100, 1, 2), &paddle));
    }
}
