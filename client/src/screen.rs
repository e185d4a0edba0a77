use std::{
    io::{self, stdout, Stdout, Write},
    sync::{
        atomic::{AtomicBool, AtomicU32, Ordering},
        Arc,
    },
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use pong_shared::{
    game_state::{Playfield, MIN_SCREEN_HEIGHT, MIN_SCREEN_WIDTH},
    style::{Color, Style, SCREEN_STYLE},
};
use thiserror::Error;

/// The character grid the game draws on.
pub trait Screen {
    /// Current `(width, height)` in cells.
    fn size(&self) -> (i32, i32);
    /// Writes one cell. Cells outside the grid are ignored.
    fn set_cell(&mut self, col: i32, row: i32, glyph: char, style: Style);
    /// Shows everything written since the last call as one frame.
    fn present(&mut self) -> io::Result<()>;
    /// Hands the terminal back in the state it was found in. Safe to call more than once.
    fn release(&mut self);

    fn playfield(&self) -> Playfield {
        let (width, height) = self.size();
        Playfield::new(width, height)
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("terminal unavailable: {0}")]
    Io(#[from] io::Error),
    #[error(
        "the screen is too small: {width}x{height}, need at least {min_width}x{min_height}",
        min_width = MIN_SCREEN_WIDTH,
        min_height = MIN_SCREEN_HEIGHT
    )]
    TooSmall { width: u16, height: u16 },
}

/// Terminal dimensions, written by the input listener on resize and read by the tick loop.
#[derive(Debug)]
pub struct Geometry {
    size: AtomicU32,
    resized: AtomicBool,
}

impl Geometry {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: AtomicU32::new(pack_size(width, height)),
            resized: AtomicBool::new(false),
        }
    }

    pub fn size(&self) -> (u16, u16) {
        unpack_size(self.size.load(Ordering::Relaxed))
    }

    pub fn resize(&self, width: u16, height: u16) {
        self.size.store(pack_size(width, height), Ordering::Relaxed);
        // publishes the size above to whoever takes the flag.
        self.resized.store(true, Ordering::Release);
    }

    /// Clears the resize flag, returning whether it was set. Once this returns true, [`size`]
    /// reads at least the size stored by the resize that raised it.
    ///
    /// [`size`]: Geometry::size
    fn take_resized(&self) -> bool {
        self.resized.swap(false, Ordering::Acquire)
    }
}

// both halves of the size live in one atomic so readers never see a width from one resize and a
// height from another.
fn pack_size(width: u16, height: u16) -> u32 {
    (width as u32) << 16 | height as u32
}

fn unpack_size(size: u32) -> (u16, u16) {
    ((size >> 16) as u16, size as u16)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        style: SCREEN_STYLE,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct CellBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|i| self.cells[i])
    }

    pub fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = cell;
        }
    }

    /// Resizes in place, keeping whatever still fits.
    fn resize(&mut self, width: u16, height: u16) {
        let mut resized = Self::new(width, height);
        for row in 0..height.min(self.height) as i32 {
            for col in 0..width.min(self.width) as i32 {
                if let Some(cell) = self.get(col, row) {
                    resized.set(col, row, cell);
                }
            }
        }
        *self = resized;
    }
}

fn check_size(width: u16, height: u16) -> Result<(), StartupError> {
    if Playfield::new(width as i32, height as i32).is_playable() {
        Ok(())
    } else {
        Err(StartupError::TooSmall { width, height })
    }
}

/// A [`Screen`] on the real terminal. Cells are buffered and only the ones that changed since the
/// previous frame are written out.
pub struct CrosstermScreen {
    out: Stdout,
    geometry: Arc<Geometry>,
    back: CellBuffer,
    front: CellBuffer,
    repaint: bool,
    released: bool,
}

impl CrosstermScreen {
    pub fn init(geometry: Arc<Geometry>) -> Result<Self, StartupError> {
        let (width, height) = geometry.size();
        check_size(width, height)?;
        let mut screen = Self {
            out: stdout(),
            geometry,
            back: CellBuffer::new(width, height),
            front: CellBuffer::new(width, height),
            repaint: true,
            released: false,
        };
        // anything acquired before a failure here is handed back when `screen` drops.
        terminal::enable_raw_mode()?;
        execute!(
            screen.out,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(screen)
    }

    pub fn geometry(&self) -> Arc<Geometry> {
        Arc::clone(&self.geometry)
    }

    fn sync(&mut self) -> io::Result<()> {
        let (width, height) = self.geometry.size();
        self.back.resize(width, height);
        self.front = CellBuffer::new(width, height);
        self.repaint = true;
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        Ok(())
    }
}

impl Screen for CrosstermScreen {
    fn size(&self) -> (i32, i32) {
        let (width, height) = self.geometry.size();
        (width as i32, height as i32)
    }

    fn set_cell(&mut self, col: i32, row: i32, glyph: char, style: Style) {
        self.back.set(col, row, Cell { glyph, style });
    }

    fn present(&mut self) -> io::Result<()> {
        if self.geometry.take_resized() {
            self.sync()?;
        }
        let Self {
            out,
            back,
            front,
            repaint,
            ..
        } = self;
        let mut cursor = None;
        let mut current_style = None;
        for row in 0..back.height {
            for col in 0..back.width {
                let i = row as usize * back.width as usize + col as usize;
                let cell = back.cells[i];
                if !*repaint && front.cells[i] == cell {
                    continue;
                }
                if cursor != Some((col, row)) {
                    queue!(out, MoveTo(col, row))?;
                }
                if current_style != Some(cell.style) {
                    queue!(
                        out,
                        SetForegroundColor(to_crossterm(cell.style.fg)),
                        SetBackgroundColor(to_crossterm(cell.style.bg)),
                    )?;
                    current_style = Some(cell.style);
                }
                queue!(out, Print(cell.glyph))?;
                cursor = Some((col + 1, row));
            }
        }
        queue!(out, ResetColor)?;
        out.flush()?;
        front.clone_from(back);
        *repaint = false;
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        self.release();
    }
}

fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::White => style::Color::White,
        Color::DarkBlue => style::Color::DarkBlue,
        Color::LightGreen => style::Color::Green,
        Color::Red => style::Color::Red,
        Color::Blue => style::Color::Blue,
        Color::Yellow => style::Color::Yellow,
    }
}

/// An in-memory [`Screen`] for driving the renderer and game loop in tests.
#[cfg(test)]
pub struct MemoryScreen {
    pub buffer: CellBuffer,
    pub frames: usize,
    pub released: bool,
    /// Makes every `present` fail, as if the terminal went away.
    pub broken: bool,
}

#[cfg(test)]
impl MemoryScreen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: CellBuffer::new(width, height),
            frames: 0,
            released: false,
            broken: false,
        }
    }

    pub fn cell(&self, col: i32, row: i32) -> Cell {
        self.buffer.get(col, row).expect("cell inside the screen")
    }

    pub fn text(&self, col: i32, row: i32, len: usize) -> String {
        (0..len as i32).map(|i| self.cell(col + i, row).glyph).collect()
    }
}

#[cfg(test)]
impl Screen for MemoryScreen {
    fn size(&self) -> (i32, i32) {
        (self.buffer.width as i32, self.buffer.height as i32)
    }

    fn set_cell(&mut self, col: i32, row: i32, glyph: char, style: Style) {
        self.buffer.set(col, row, Cell { glyph, style });
    }

    fn present(&mut self) -> io::Result<()> {
        if self.broken {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"));
        }
        self.frames += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread::spawn};

    use pong_shared::style::{Style, TABLE_STYLE};

    use crate::screen::{
        check_size, pack_size, unpack_size, Cell, CellBuffer, CrosstermScreen, Geometry,
        StartupError,
    };

    #[test]
    fn size_packing() {
        assert_eq!(unpack_size(pack_size(120, 40)), (120, 40));
        assert_eq!(unpack_size(pack_size(u16::MAX, 0)), (u16::MAX, 0));
        assert_eq!(unpack_size(pack_size(0, u16::MAX)), (0, u16::MAX));
    }

    #[test]
    fn geometry_resize_flag() {
        let geometry = Geometry::new(120, 40);
        assert!(!geometry.take_resized());
        geometry.resize(130, 45);
        assert_eq!(geometry.size(), (130, 45));
        assert!(geometry.take_resized());
        // taking the flag clears it.
        assert!(!geometry.take_resized());
    }

    #[test]
    fn resize_seen_from_another_thread() {
        let geometry = Arc::new(Geometry::new(120, 40));
        let input_geometry = Arc::clone(&geometry);
        spawn(move || input_geometry.resize(140, 50))
            .join()
            .unwrap();
        assert!(geometry.take_resized());
        assert_eq!(geometry.size(), (140, 50));
    }

    #[test]
    fn too_small_rejected_before_touching_the_terminal() {
        // narrow.
        assert!(matches!(
            CrosstermScreen::init(Arc::new(Geometry::new(100, 40))),
            Err(StartupError::TooSmall {
                width: 100,
                height: 40
            })
        ));
        // short.
        assert!(matches!(
            CrosstermScreen::init(Arc::new(Geometry::new(120, 30))),
            Err(StartupError::TooSmall {
                width: 120,
                height: 30
            })
        ));
    }

    #[test]
    fn smallest_playable_size() {
        assert!(check_size(101, 31).is_ok());
        assert!(matches!(
            check_size(101, 30),
            Err(StartupError::TooSmall { .. })
        ));
        assert!(matches!(
            check_size(100, 31),
            Err(StartupError::TooSmall { .. })
        ));
    }

    #[test]
    fn out_of_range_cells_are_ignored() {
        let mut buffer = CellBuffer::new(4, 3);
        let cell = Cell {
            glyph: 'x',
            style: Style::default(),
        };
        buffer.set(-1, 0, cell);
        buffer.set(0, -1, cell);
        buffer.set(4, 0, cell);
        buffer.set(0, 3, cell);
        assert_eq!(buffer, CellBuffer::new(4, 3));
        assert_eq!(buffer.get(4, 0), None);
        buffer.set(3, 2, cell);
        assert_eq!(buffer.get(3, 2), Some(cell));
    }

    #[test]
    fn resize_keeps_what_fits() {
        let mut buffer = CellBuffer::new(4, 3);
        let cell = Cell {
            glyph: 'o',
            style: TABLE_STYLE,
        };
        buffer.set(1, 1, cell);
        buffer.set(3, 2, cell);
        buffer.resize(3, 5);
        assert_eq!(buffer.get(1, 1), Some(cell));
        assert_eq!(buffer.get(3, 2), None);
        assert_eq!(buffer.get(2, 4), Some(Cell::BLANK));
    }

    #[test]
    fn too_small_message() {
        let err = StartupError::TooSmall {
            width: 80,
            height: 24,
        };
        assert_eq!(
            err.to_string(),
            "the screen is too small: 80x24, need at least 101x31"
        );
    }
}
