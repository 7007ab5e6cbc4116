//! Crossterm terminal driver for the A* visualizer.
//!
//! Provides a [`CrosstermDriver`] that implements [`astar_core::Driver`]:
//! each grid cell is drawn as a run of terminal columns coloured by its
//! [`CellState`], and mouse clicks are mapped back to cell coordinates.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use astar_core::{
    CellState, Point,
    app::Driver,
    grid::Frame,
    messages::{Key, Msg, MouseAction},
};

const GRID_LINE: CtColor = CtColor::Rgb {
    r: 128,
    g: 128,
    b: 128,
};

/// Maps a [`CellState`] to its display colour.
pub fn state_color(state: CellState) -> CtColor {
    let (r, g, b) = match state {
        CellState::Unchecked => (255, 255, 255),
        CellState::Open => (0, 255, 0),
        CellState::Closed => (255, 0, 0),
        CellState::Barrier => (0, 0, 0),
        CellState::Start => (255, 165, 0),
        CellState::End => (64, 224, 208),
        CellState::Path => (255, 0, 255),
    };
    CtColor::Rgb { r, g, b }
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Maps a terminal position to the grid cell drawn there.
fn to_cell(column: u16, row: u16, cell_width: i32) -> Point {
    Point::new(row as i32, column as i32 / cell_width.max(1))
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
    cell_width: i32,
}

impl CrosstermDriver {
    /// Create a new driver. Cells are two columns wide until the first frame
    /// says otherwise.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
            cell_width: 2,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    fn translate(&self, ev: Event) -> Option<Msg> {
        match ev {
            Event::Key(KeyEvent { code, kind, .. }) if kind == KeyEventKind::Press => {
                to_key(code).map(Msg::key)
            }
            Event::Mouse(me) => {
                let pos = to_cell(me.column, me.row, self.cell_width);
                let action = match me.kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => MouseAction::Main,
                    MouseEventKind::Down(MouseButton::Right)
                    | MouseEventKind::Drag(MouseButton::Right) => MouseAction::Secondary,
                    MouseEventKind::Down(MouseButton::Middle) => MouseAction::Auxiliary,
                    MouseEventKind::Up(_) => MouseAction::Release,
                    _ => return None,
                };
                Some(Msg::mouse(action, pos))
            }
            _ => None,
        }
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            queue!(stdout, event::EnableMouseCapture)?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        timeout: Duration,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if let Some(m) = self.translate(event::read()?) {
                tx.send(m).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.cell_width = frame.cell_size.max(1);
        let width = self.cell_width as usize;
        // Left edge of every cell doubles as the grid overlay line.
        let text = format!("\u{258f}{}", " ".repeat(width.saturating_sub(1)));

        let mut stdout = io::stdout();
        for fc in &frame.cells {
            let p = fc.pos;
            queue!(
                stdout,
                cursor::MoveTo((p.col * self.cell_width) as u16, p.row as u16),
                SetForegroundColor(GRID_LINE),
                SetBackgroundColor(state_color(fc.state)),
                Print(&text)
            )?;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()?;
        log::debug!("flushed {} cells", frame.cells.len());
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = queue!(stdout, event::DisableMouseCapture);
        }
        let _ = queue!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}
