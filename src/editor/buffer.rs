use std::borrow::Cow;

use super::Cursor;

/// A single editable line of raw bytes with a fixed capacity.
///
/// One byte of the capacity is reserved for a terminator, so at most
/// `capacity - 1` bytes are ever stored. Bytes are treated as opaque code
/// units; cursor motion never looks at UTF-8 boundaries.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    content: Vec<u8>,
    cursor: Cursor,
    capacity: usize,
}

impl LineBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            content: Vec::with_capacity(capacity.saturating_sub(1)),
            cursor: Cursor::new(),
            capacity,
        }
    }

    /// Create a buffer holding `text`, cursor at the end (useful for testing)
    #[cfg(test)]
    pub fn from_text(capacity: usize, text: &str) -> Self {
        let mut buf = Self::new(capacity);
        for &b in text.as_bytes() {
            buf.insert(b);
        }
        buf
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Longest line this buffer accepts.
    pub fn max_len(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.max_len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor.col
    }

    /// Place the cursor, clamped to `[0, len]`.
    pub fn set_cursor(&mut self, col: usize) {
        self.cursor.col = col;
        self.cursor.clamp(self.len());
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Bytes from the cursor to the end of the line.
    pub fn tail(&self) -> &[u8] {
        &self.content[self.cursor.col..]
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = Cursor::new();
    }

    /// Insert a byte at the cursor. A full buffer drops the byte silently.
    pub fn insert(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.content.insert(self.cursor.col, byte);
        self.cursor.col += 1;
        true
    }

    /// Delete the byte before the cursor (backspace)
    pub fn backspace(&mut self) -> bool {
        if !self.cursor.move_left() {
            return false;
        }
        self.content.remove(self.cursor.col);
        true
    }

    /// Delete the byte under the cursor
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor.col >= self.len() {
            return false;
        }
        self.content.remove(self.cursor.col);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.cursor.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.cursor.move_right(self.content.len())
    }

    pub fn move_home(&mut self) -> usize {
        self.cursor.move_home()
    }

    pub fn move_end(&mut self) -> usize {
        self.cursor.move_end(self.content.len())
    }
}
