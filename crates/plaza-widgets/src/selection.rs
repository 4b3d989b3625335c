//! Highlight and scroll state for the select's option list.
//!
//! `SelectionState` tracks a cursor over `count` rows and the offset of a
//! viewport `visible` rows tall. Movement clamps at both ends; the list grows
//! at the bottom as more options are revealed, so wrapping to the top would
//! skip the reveal.

/// Tracks cursor position and scroll offset for a selectable collection.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    cursor: usize,
    offset: usize,
    count: usize,
    visible: usize,
}

impl SelectionState {
    pub fn new(count: usize, visible: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            count,
            visible,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn offset(&self) -> usize {
        self.offset
    }
    pub fn count(&self) -> usize {
        self.count
    }
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Rows that exist below the viewport's last row.
    pub fn rows_below(&self) -> usize {
        self.count.saturating_sub(self.offset + self.visible)
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if self.count == 0 {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        if self.cursor >= self.count {
            self.cursor = self.count - 1;
        }
        self.clamp_offset();
        self.ensure_visible();
    }

    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.clamp_offset();
        self.ensure_visible();
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.ensure_visible();
    }

    pub fn move_down(&mut self) {
        if self.count == 0 {
            return;
        }
        self.cursor = (self.cursor + 1).min(self.count - 1);
        self.ensure_visible();
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible.max(1));
        self.ensure_visible();
    }

    pub fn page_down(&mut self) {
        if self.count == 0 {
            return;
        }
        self.cursor = (self.cursor + self.visible.max(1)).min(self.count - 1);
        self.ensure_visible();
    }

    pub fn home(&mut self) {
        self.cursor = 0;
        self.ensure_visible();
    }

    pub fn end(&mut self) {
        if self.count > 0 {
            self.cursor = self.count - 1;
        }
        self.ensure_visible();
    }

    pub fn select(&mut self, index: usize) {
        if self.count == 0 {
            return;
        }
        self.cursor = index.min(self.count - 1);
        self.ensure_visible();
    }

    /// Scroll the viewport by `delta` rows without moving past either end.
    /// The cursor is dragged along when it would leave the viewport.
    pub fn scroll_by(&mut self, delta: isize) {
        let max_offset = self.count.saturating_sub(self.visible);
        self.offset = self.offset.saturating_add_signed(delta).min(max_offset);
        if self.count == 0 || self.visible == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.cursor = self.offset;
        } else if self.cursor >= self.offset + self.visible {
            self.cursor = self.offset + self.visible - 1;
        }
    }

    /// Back to the first row.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.count.saturating_sub(self.visible));
    }

    fn ensure_visible(&mut self) {
        if self.count == 0 || self.visible == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.visible {
            self.offset = self.cursor + 1 - self.visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_with_items() {
        let s = SelectionState::new(5, 3);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.offset(), 0);
        assert_eq!(s.rows_below(), 2);
    }

    #[test]
    fn move_down_stops_at_last() {
        let mut s = SelectionState::new(3, 10);
        s.move_down();
        s.move_down();
        s.move_down();
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn move_up_stops_at_first() {
        let mut s = SelectionState::new(3, 10);
        s.move_up();
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn page_moves_clamp() {
        let mut s = SelectionState::new(20, 5);
        s.page_down();
        assert_eq!(s.cursor(), 5);
        s.select(18);
        s.page_down();
        assert_eq!(s.cursor(), 19);
        s.select(2);
        s.page_up();
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn home_end() {
        let mut s = SelectionState::new(10, 5);
        s.end();
        assert_eq!(s.cursor(), 9);
        assert_eq!(s.offset(), 5);
        assert_eq!(s.rows_below(), 0);
        s.home();
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn empty_count_is_noop() {
        let mut s = SelectionState::new(0, 5);
        s.move_down();
        s.page_down();
        s.scroll_by(3);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn scroll_by_clamps_and_drags_cursor() {
        let mut s = SelectionState::new(10, 4);
        s.scroll_by(3);
        assert_eq!(s.offset(), 3);
        assert_eq!(s.cursor(), 3);
        s.scroll_by(100);
        assert_eq!(s.offset(), 6);
        assert_eq!(s.rows_below(), 0);
        s.scroll_by(-100);
        assert_eq!(s.offset(), 0);
        assert_eq!(s.cursor(), 3);
    }

    #[test]
    fn growing_count_exposes_rows_below() {
        let mut s = SelectionState::new(10, 4);
        s.end();
        assert_eq!(s.rows_below(), 0);
        s.set_count(20);
        assert_eq!(s.cursor(), 9);
        assert_eq!(s.rows_below(), 10);
    }

    #[test]
    fn set_count_clamps_cursor_and_offset() {
        let mut s = SelectionState::new(10, 3);
        s.select(8);
        s.set_count(5);
        assert_eq!(s.cursor(), 4);
        assert!(s.offset() <= 2);
    }
}
