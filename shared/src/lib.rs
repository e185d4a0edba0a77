use std::fmt::Display;

pub mod collision;
pub mod game_state;
pub mod input;
pub mod style;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => Display::fmt("Player 1", f),
            Player::Two => Display::fmt("Player 2", f),
        }
    }
}

#[cfg(test)]
#[macro_export]
macro_rules! assert_position {
    ($object:expr, $row:expr, $col:expr $(,)?) => {
        assert_eq!(($object.row, $object.col), ($row, $col))
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! assert_velocity {
    ($object:expr, $vel_row:expr, $vel_col:expr $(,)?) => {
        assert_eq!(($object.vel_row, $object.vel_col), ($vel_row, $vel_col))
    };
}

#[cfg(test)]
mod tests {
    use crate::Player;

    #[test]
    fn player_display() {
        assert_eq!(Player::One.to_string(), "Player 1");
        assert_eq!(Player::Two.to_string(), "Player 2");
    }

    #[test]
    fn player_index_matches_order() {
        for (i, player) in Player::ALL.into_iter().enumerate() {
            assert_eq!(player.index(), i);
        }
    }
}
