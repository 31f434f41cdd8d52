//! Bottom-anchored scroll state for the chat and log panels.
//!
//! The offset counts lines scrolled up from the newest content, so a panel
//! at offset 0 follows new messages as they arrive.

use std::cell::Cell;
use std::ops::Range;

#[derive(Debug, Default)]
pub struct ScrollState {
    /// Kept in a `Cell` so a render can pin the view when content grows.
    offset: Cell<usize>,
    /// Largest useful offset, recorded by the last render.
    max_offset: Cell<usize>,
    /// Line count seen by the last render.
    last_total: Cell<usize>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    pub fn is_following(&self) -> bool {
        self.offset.get() == 0
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let offset = self
            .offset
            .get()
            .saturating_add(lines)
            .min(self.max_offset.get());
        self.offset.set(offset);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset.set(self.offset.get().saturating_sub(lines));
    }

    /// Jumps back to the newest content.
    pub fn follow(&mut self) {
        self.offset.set(0);
    }

    /// Returns the range of `total` lines visible in a `height`-row viewport.
    ///
    /// Content shorter than the viewport is shown from the top. While
    /// scrolled up, lines appended since the last call push the offset up by
    /// the same amount, so the visible lines stay put.
    pub fn window(&self, total: usize, height: usize) -> Range<usize> {
        let max_offset = total.saturating_sub(height);
        self.max_offset.set(max_offset);

        let mut offset = self.offset.get();
        let last_total = self.last_total.replace(total);
        if offset > 0 && total > last_total {
            offset = offset.saturating_add(total - last_total);
        }
        let offset = offset.min(max_offset);
        self.offset.set(offset);

        let end = total - offset;
        let start = end.saturating_sub(height);
        start..end
    }
}
