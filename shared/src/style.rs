/// The small palette the game draws with. Terminal backends map these onto their own colours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Color {
    /// The terminal's own default colour.
    #[default]
    Reset,
    White,
    DarkBlue,
    LightGreen,
    Red,
    Blue,
    Yellow,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
}

impl Style {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    pub const fn fg(self, fg: Color) -> Self {
        Self { fg, bg: self.bg }
    }
}

pub const SCREEN_STYLE: Style = Style::new(Color::White, Color::DarkBlue);
pub const TABLE_STYLE: Style = Style::new(Color::Reset, Color::LightGreen);
pub const NET_STYLE: Style = Style::new(Color::Reset, Color::White);
pub const PADDLE_ONE_STYLE: Style = Style::new(Color::Red, Color::Reset);
pub const PADDLE_TWO_STYLE: Style = Style::new(Color::Blue, Color::Reset);
pub const BALL_STYLE: Style = TABLE_STYLE.fg(Color::Yellow);

#[cfg(test)]
mod tests {
    use crate::style::{Color, Style, BALL_STYLE, TABLE_STYLE};

    #[test]
    fn fg_keeps_the_background() {
        let style = Style::default().fg(Color::Red);
        assert_eq!(style, Style::new(Color::Red, Color::Reset));
        assert_eq!(
            Style::new(Color::Red, Color::White).fg(Color::Blue),
            Style::new(Color::Blue, Color::White)
        );
    }

    #[test]
    fn ball_sits_on_the_table() {
        assert_eq!(BALL_STYLE.bg, TABLE_STYLE.bg);
        assert_eq!(BALL_STYLE.fg, Color::Yellow);
    }
}
