use std::io::{self, Write};

use crossterm::{
    cursor::{MoveLeft, MoveRight},
    queue,
    terminal::{Clear, ClearType},
};

use crate::editor::LineBuffer;

/// Keeps the terminal's copy of the edit line in sync with the buffer.
///
/// Every method leaves the real cursor at the logical cursor column. Output
/// is queued; call `flush` once per handled key.
pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn cursor_left(&mut self, n: usize) -> io::Result<()> {
        if n > 0 {
            queue!(self.out, MoveLeft(columns(n)))?;
        }
        Ok(())
    }

    pub fn cursor_right(&mut self, n: usize) -> io::Result<()> {
        if n > 0 {
            queue!(self.out, MoveRight(columns(n)))?;
        }
        Ok(())
    }

    pub fn clear_to_end(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::UntilNewLine))
    }

    /// Write `tail` and step back over it, so the cursor does not move.
    pub fn print_tail(&mut self, tail: &[u8]) -> io::Result<()> {
        self.out.write_all(tail)?;
        self.cursor_left(tail.len())
    }

    /// Repaint the whole line after a history switch. `from` is where the
    /// real cursor was before the switch.
    pub fn redraw_line(&mut self, from: usize, line: &LineBuffer) -> io::Result<()> {
        self.cursor_left(from)?;
        self.out.write_all(line.as_bytes())?;
        // also erase whatever a longer previous line left past the new end
        self.clear_to_end()?;
        self.cursor_left(line.len() - line.cursor())
    }

    pub fn commit(&mut self) -> io::Result<()> {
        self.out.write_all(b"\r\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

fn columns(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
