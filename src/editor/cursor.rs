/// Byte offset of the edit point within a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub col: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self { col: 0 }
    }

    pub fn move_left(&mut self) -> bool {
        if self.col > 0 {
            self.col -= 1;
            true
        } else {
            false
        }
    }

    pub fn move_right(&mut self, line_len: usize) -> bool {
        if self.col < line_len {
            self.col += 1;
            true
        } else {
            false
        }
    }

    /// Jump to column 0, returning how many columns were crossed.
    pub fn move_home(&mut self) -> usize {
        std::mem::take(&mut self.col)
    }

    /// Jump to the end of the line, returning how many columns were crossed.
    pub fn move_end(&mut self, line_len: usize) -> usize {
        let moved = line_len.saturating_sub(self.col);
        self.col = line_len;
        moved
    }

    pub fn clamp(&mut self, line_len: usize) {
        self.col = self.col.min(line_len);
    }
}
