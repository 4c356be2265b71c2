use std::io::{self, Read, Write};

use tracing::debug;

use super::HistoryStore;
use crate::input::{self, KeyEvent};
use crate::render::Renderer;
use crate::terminal::{ModeGuard, TerminalMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Editing,
    Committed,
}

/// One pass of line editing over a borrowed history.
pub struct Session<'h, W: Write> {
    history: &'h mut HistoryStore,
    renderer: Renderer<W>,
    state: State,
}

impl<'h, W: Write> Session<'h, W> {
    /// Start editing at `start_index`. The slot there is emptied first.
    pub fn begin(history: &'h mut HistoryStore, start_index: usize, out: W) -> Self {
        history.select(start_index);
        history.current_mut().clear();
        debug!(index = history.current_index(), "edit session started");
        Self {
            history,
            renderer: Renderer::new(out),
            state: State::Editing,
        }
    }

    pub fn is_committed(&self) -> bool {
        self.state == State::Committed
    }

    pub fn apply(&mut self, event: &KeyEvent) -> io::Result<()> {
        if self.is_committed() {
            return Ok(());
        }

        match event {
            KeyEvent::Commit => {
                self.renderer.commit()?;
                self.state = State::Committed;
            }
            KeyEvent::Printable(byte) => {
                let line = self.history.current_mut();
                if line.insert(*byte) {
                    let at = line.cursor() - 1;
                    self.renderer.print_tail(&line.as_bytes()[at..])?;
                    self.renderer.cursor_right(1)?;
                }
            }
            KeyEvent::Backspace => {
                let line = self.history.current_mut();
                if line.backspace() {
                    self.renderer.cursor_left(1)?;
                    self.renderer.clear_to_end()?;
                    self.renderer.print_tail(line.tail())?;
                }
            }
            KeyEvent::ForwardDelete => {
                let line = self.history.current_mut();
                if line.delete_forward() {
                    self.renderer.clear_to_end()?;
                    self.renderer.print_tail(line.tail())?;
                }
            }
            KeyEvent::CursorLeft => {
                if self.history.current_mut().move_left() {
                    self.renderer.cursor_left(1)?;
                }
            }
            KeyEvent::CursorRight => {
                if self.history.current_mut().move_right() {
                    self.renderer.cursor_right(1)?;
                }
            }
            KeyEvent::Home => {
                let moved = self.history.current_mut().move_home();
                self.renderer.cursor_left(moved)?;
            }
            KeyEvent::End => {
                let moved = self.history.current_mut().move_end();
                self.renderer.cursor_right(moved)?;
            }
            KeyEvent::HistoryOlder => {
                let from = self.history.current().cursor();
                if self.history.older() {
                    self.renderer.redraw_line(from, self.history.current())?;
                }
            }
            KeyEvent::HistoryNewer => {
                let from = self.history.current().cursor();
                if self.history.newer() {
                    self.renderer.redraw_line(from, self.history.current())?;
                }
            }
            // already reported by the decoder
            KeyEvent::Unrecognized(_) => {}
        }

        self.renderer.flush()
    }

    /// The slot index holding the submitted line.
    pub fn finish(self) -> usize {
        self.history.current_index()
    }
}

/// Edit one line in raw mode and return the history index it was committed
/// from.
///
/// The terminal is restored on every return path: explicitly on commit, via
/// the guard's drop when a read or write fails.
pub fn edit_line<T, R, W>(
    history: &mut HistoryStore,
    start_index: usize,
    terminal: &mut T,
    input: &mut R,
    output: W,
) -> io::Result<usize>
where
    T: TerminalMode + ?Sized,
    R: Read + ?Sized,
    W: Write,
{
    let guard = ModeGuard::acquire(terminal)?;
    let mut session = Session::begin(history, start_index, output);

    while !session.is_committed() {
        let event = input::read_event(input)?;
        session.apply(&event)?;
    }

    let index = session.finish();
    guard.release()?;
    debug!(index, "line committed");
    Ok(index)
}
