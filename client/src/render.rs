use std::io;

use pong_shared::{
    game_state::{GameObject, GameState, Playfield},
    style::{Style, NET_STYLE, SCREEN_STYLE, TABLE_STYLE},
    Player,
};

use crate::screen::Screen;

/// Cells covered by an object in the frame that was last presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Footprint {
    row: i32,
    col: i32,
    width: i32,
    height: i32,
}

impl From<&GameObject> for Footprint {
    fn from(object: &GameObject) -> Self {
        Self {
            row: object.row,
            col: object.col,
            width: object.width,
            height: object.height,
        }
    }
}

/// Draws frames without clearing the whole screen: only the cells objects covered last frame are
/// blanked before the table and objects are drawn again.
#[derive(Debug, Default)]
pub struct Renderer {
    footprints: Vec<Footprint>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw<S: Screen>(
        &mut self,
        screen: &mut S,
        state: &GameState,
        field: &Playfield,
    ) -> io::Result<()> {
        for footprint in self.footprints.drain(..) {
            fill(
                screen,
                footprint.row,
                footprint.col,
                footprint.width,
                footprint.height,
                ' ',
                SCREEN_STYLE,
            );
        }
        draw_table(screen, field);
        for object in state.objects() {
            // objects may run off the table on their way out, but are never drawn there.
            if !field.is_visible_col(object.col) {
                continue;
            }
            let style = if object.col == field.net_col() {
                NET_STYLE.fg(object.style.fg)
            } else {
                object.style
            };
            fill(
                screen,
                object.row,
                object.col,
                object.width,
                object.height,
                object.symbol,
                style,
            );
            self.footprints.push(Footprint::from(object));
        }
        screen.present()
    }
}

fn draw_table<S: Screen>(screen: &mut S, field: &Playfield) {
    let net = field.net_col();
    for row in field.top()..field.bottom() {
        for col in field.left()..field.right() {
            let style = if col == net { NET_STYLE } else { TABLE_STYLE };
            screen.set_cell(col, row, ' ', style);
        }
    }
}

fn fill<S: Screen>(
    screen: &mut S,
    row: i32,
    col: i32,
    width: i32,
    height: i32,
    glyph: char,
    style: Style,
) {
    for r in row..row + height {
        for c in col..col + width {
            screen.set_cell(c, r, glyph, style);
        }
    }
}

fn print_str<S: Screen>(screen: &mut S, row: i32, col: i32, text: &str) {
    for (i, glyph) in text.chars().enumerate() {
        screen.set_cell(col + i as i32, row, glyph, SCREEN_STYLE);
    }
}

fn print_str_centered<S: Screen>(screen: &mut S, row: i32, col: i32, text: &str) {
    let half = text.chars().count() as i32 / 2;
    print_str(screen, row, col - half, text);
}

/// The final frame, drawn over whatever the last tick left on screen.
pub fn draw_game_over<S: Screen>(screen: &mut S, winner: Player) -> io::Result<()> {
    let (width, height) = screen.size();
    print_str_centered(screen, height / 2 - 1, width / 2, "Game over");
    print_str_centered(screen, height / 2, width / 2, &format!("{winner} wins..."));
    screen.present()
}
