//! Bounded linear undo/redo history.

/// Default number of entries kept before the oldest is evicted.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Ordered list of committed entries plus a cursor.
///
/// The cursor is `None` when stepping back past the first entry (the
/// "nothing to show" position), otherwise it indexes the entry currently on
/// screen. Entries after the cursor are redo candidates until the next commit
/// truncates them.
#[derive(Debug)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: Option<usize>,
    max_len: usize,
}

impl<T> History<T> {
    /// Creates an empty history holding at most `max_len` entries (minimum 1).
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_len: max_len.max(1),
        }
    }

    /// Records a new entry after the cursor.
    ///
    /// Everything after the cursor is dropped first. When the list is full the
    /// oldest entry is evicted and the cursor index is left unchanged; after the
    /// shift that index addresses the new entry.
    pub fn commit(&mut self, entry: T) {
        let keep = self.cursor.map_or(0, |index| index + 1);
        self.entries.truncate(keep);
        self.entries.push(entry);

        if self.entries.len() > self.max_len {
            self.entries.remove(0);
            log::debug!("History full ({}), evicted oldest entry", self.max_len);
        } else {
            self.cursor = Some(self.entries.len() - 1);
        }
    }

    /// Steps the cursor back. Returns `false` if already before the first entry.
    pub fn undo(&mut self) -> bool {
        match self.cursor {
            Some(0) => {
                self.cursor = None;
                true
            }
            Some(index) => {
                self.cursor = Some(index - 1);
                true
            }
            None => false,
        }
    }

    /// Steps the cursor forward. Returns `false` if already at the last entry.
    pub fn redo(&mut self) -> bool {
        let next = self.cursor.map_or(0, |index| index + 1);
        if next < self.entries.len() {
            self.cursor = Some(next);
            true
        } else {
            false
        }
    }

    /// Entry under the cursor, if any.
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|index| self.entries.get(index))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |index| index + 1) < self.entries.len()
    }
}
