use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use common::{
    input::UiKey,
    render::{CellView, PlayerView, RenderSink, StatusView},
};

use crate::frame::Frame;

pub const MESSAGE_LINES: usize = 3;
pub const HELP: &str =
    "g: generate  i: instant  p: play  1-4: speed  arrows/WASD: move  Enter: dismiss  q: quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiInputError {
    Disconnected,
}

impl fmt::Display for UiInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiInputError::Disconnected => write!(f, "Input source disconnected"),
        }
    }
}

impl std::error::Error for UiInputError {}

pub struct TerminalUi<W: Write> {
    stdout: W,
    frame: Frame,
    status: Option<StatusView>,
    messages: VecDeque<String>,
    needs_clear: bool,
    is_raw_mode_owner: bool, // True except in tests.
}

impl TerminalUi<Stdout> {
    pub fn new(rows: usize, cols: usize) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self {
            stdout,
            frame: Frame::new(rows, cols),
            status: None,
            messages: VecDeque::with_capacity(MESSAGE_LINES + 1),
            needs_clear: false,
            is_raw_mode_owner: true,
        })
    }
}

impl<W: Write> TerminalUi<W> {
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn show_message(&mut self, message: &str) {
        self.messages.push_back(message.to_string());
        while self.messages.len() > MESSAGE_LINES {
            self.messages.pop_front();
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn poll_key(&mut self, timeout: Duration) -> Result<Option<UiKey>, UiInputError> {
        if !event::poll(timeout).unwrap_or(false) {
            return Ok(None);
        }

        match event::read() {
            Ok(event) => self.handle_event(event),
            Err(_) => Err(UiInputError::Disconnected),
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<Option<UiKey>, UiInputError> {
        match event {
            Event::Key(key_event) => {
                // Some platforms report releases as well as presses.
                if key_event.kind == KeyEventKind::Release {
                    return Ok(None);
                }

                if key_event.modifiers.contains(KeyModifiers::CONTROL) {
                    return match key_event.code {
                        KeyCode::Char('c') | KeyCode::Char('d') => Err(UiInputError::Disconnected),
                        _ => Ok(None),
                    };
                }

                Ok(match key_event.code {
                    KeyCode::Up => Some(UiKey::Up),
                    KeyCode::Down => Some(UiKey::Down),
                    KeyCode::Left => Some(UiKey::Left),
                    KeyCode::Right => Some(UiKey::Right),
                    KeyCode::Enter => Some(UiKey::Enter),
                    KeyCode::Esc => Some(UiKey::Esc),
                    KeyCode::Char(c) => Some(UiKey::Char(c.to_ascii_lowercase())),
                    _ => None,
                })
            }
            Event::Resize(..) => {
                self.needs_clear = true;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn status_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(status) = &self.status {
            let maze = if status.generating {
                "generating"
            } else if status.ready {
                "ready"
            } else {
                "empty"
            };
            lines.push(format!(
                "Time: {:>3}s   Speed: {}   Maze: {}",
                status.remaining.max(0),
                status.speed,
                maze
            ));

            for notice in &status.notices {
                if notice.is_popup() {
                    lines.push(format!("*** {} ***  (Enter to continue)", notice.text()));
                } else {
                    lines.push(notice.text().to_string());
                }
            }
        }

        lines.push(HELP.to_string());
        lines.extend(self.messages.iter().cloned());
        lines
    }

    /// Prints the frame and the status lines below it, then flushes.
    pub fn present(&mut self) -> io::Result<()> {
        if self.needs_clear {
            queue!(self.stdout, Clear(ClearType::All))?;
            self.needs_clear = false;
        }

        for (y, line) in self.frame.lines().enumerate() {
            queue!(self.stdout, MoveTo(0, y as u16))?;
            let mut color = None;
            for glyph in line {
                if color != Some(glyph.color) {
                    queue!(self.stdout, SetForegroundColor(glyph.color))?;
                    color = Some(glyph.color);
                }
                queue!(self.stdout, Print(glyph.symbol))?;
            }
        }
        queue!(self.stdout, ResetColor)?;

        let mut y = self.frame.height() as u16 + 1;
        for line in self.status_lines() {
            queue!(
                self.stdout,
                MoveTo(0, y),
                Clear(ClearType::CurrentLine),
                Print(line)
            )?;
            y += 1;
        }
        queue!(self.stdout, MoveTo(0, y), Clear(ClearType::FromCursorDown))?;

        self.stdout.flush()
    }
}

impl<W: Write> RenderSink for TerminalUi<W> {
    fn draw_cell(&mut self, cell: &CellView) {
        self.frame.draw_cell(cell);
    }

    fn draw_player(&mut self, player: &PlayerView) {
        self.frame.draw_player(player);
    }

    fn draw_status(&mut self, status: &StatusView) {
        self.status = Some(status.clone());
    }
}

impl<W: Write> Drop for TerminalUi<W> {
    fn drop(&mut self) {
        if self.is_raw_mode_owner {
            // Only restore the terminal if this instance was the one to take it over.
            // This prevents tests from disabling raw mode for the test runner.
            execute!(self.stdout, ResetColor, Show, LeaveAlternateScreen).ok();
            terminal::disable_raw_mode().ok();
        }
    }
}

#[cfg(test)]
impl TerminalUi<Vec<u8>> {
    // A `TerminalUi` that writes into a byte buffer and never touches raw mode.
    pub(crate) fn headless(rows: usize, cols: usize) -> Self {
        TerminalUi {
            stdout: Vec::new(),
            frame: Frame::new(rows, cols),
            status: None,
            messages: VecDeque::new(),
            needs_clear: false,
            is_raw_mode_owner: false,
        }
    }

    pub(crate) fn output(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}
