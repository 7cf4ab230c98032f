use std::sync::Arc;

use crate::buffer::PixelBuffer;

/// Undo/redo history of full-buffer snapshots.
///
/// Entries `[0..=cursor]` are the undo-reachable past, with `cursor` naming
/// the current state; entries after the cursor are the redo-reachable future
/// and are discarded the moment a new snapshot is taken. `undo`/`redo` past
/// their bounds are no-ops, never errors; they are wired to keyboard
/// shortcuts that can be pressed arbitrarily.
pub struct SnapshotHistory {
    entries: Vec<Arc<PixelBuffer>>,
    cursor: usize,
    capacity: usize,
}

impl SnapshotHistory {
    /// Default maximum number of retained snapshots.
    pub const DEFAULT_CAPACITY: usize = 50;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Bound memory to `capacity` snapshots; at least the current entry and
    /// one undo step are always retained.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            capacity: capacity.max(2),
        }
    }

    /// Store the buffer state at a commit boundary and make it current,
    /// truncating any redo tail. Oldest entries are evicted once the
    /// capacity is exceeded; eviction never touches the current or future
    /// entries.
    pub fn snapshot(&mut self, buffer: &PixelBuffer) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(Arc::new(buffer.clone()));
        self.cursor = self.entries.len() - 1;

        let excess = self.entries.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.entries.drain(0..excess);
            self.cursor -= excess;
            log::debug!("evicted {excess} history entries");
        }
    }

    /// Step back one entry and return it for the caller to repaint from.
    /// No-op at the initial entry.
    pub fn undo(&mut self) -> Option<Arc<PixelBuffer>> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        Some(Arc::clone(&self.entries[self.cursor]))
    }

    /// Step forward one entry and return it. No-op at the latest entry.
    pub fn redo(&mut self) -> Option<Arc<PixelBuffer>> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(Arc::clone(&self.entries[self.cursor]))
    }

    /// The entry the surface currently shows.
    pub fn current(&self) -> Option<Arc<PixelBuffer>> {
        self.entries.get(self.cursor).map(Arc::clone)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new()
    }
}
