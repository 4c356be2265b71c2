use tracing::trace;

use super::LineBuffer;

/// Fixed set of line slots shared by every edit session of a process.
///
/// Slot 0 is the line being composed; higher indices are older lines. Only the
/// slot at `current_index` is handed out for mutation.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    slots: Vec<LineBuffer>,
    current: usize,
}

impl HistoryStore {
    /// `history_size` is clamped to at least one slot.
    pub fn new(history_size: usize, line_capacity: usize) -> Self {
        let slots = (0..history_size.max(1))
            .map(|_| LineBuffer::new(line_capacity))
            .collect();
        Self { slots, current: 0 }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slot(&self, index: usize) -> Option<&LineBuffer> {
        self.slots.get(index)
    }

    pub fn current(&self) -> &LineBuffer {
        &self.slots[self.current]
    }

    pub fn current_mut(&mut self) -> &mut LineBuffer {
        &mut self.slots[self.current]
    }

    /// Make `index` the live slot, clamped to the last slot.
    pub fn select(&mut self, index: usize) {
        self.current = index.min(self.slots.len() - 1);
    }

    /// Step to the next older slot. Returns false when already at the oldest.
    pub fn older(&mut self) -> bool {
        if self.current + 1 >= self.slots.len() {
            return false;
        }
        self.switch_to(self.current + 1);
        true
    }

    /// Step to the next newer slot. Returns false when already at slot 0.
    pub fn newer(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.switch_to(self.current - 1);
        true
    }

    /// The cursor carries over as `max(previous, destination length)`, and is
    /// then clamped into the destination line, which always lands it at the
    /// end of that line.
    fn switch_to(&mut self, index: usize) {
        let previous = self.current().cursor();
        self.current = index;
        let slot = &mut self.slots[index];
        let recalled = previous.max(slot.len());
        slot.set_cursor(recalled);
        trace!(index, previous, recalled, cursor = slot.cursor(), "history slot switched");
    }
}
