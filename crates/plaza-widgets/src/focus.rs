//! Focus management for cycling keyboard focus across form fields.

/// Tracks which of `N` fields has keyboard focus.
///
/// Moves report the slot that lost focus and the slot that gained it, so the
/// caller can send `Blur` and `Focus` to the right components. Slots the
/// caller marks as unavailable (e.g. disabled selects) are skipped.
#[derive(Debug, Clone)]
pub struct FocusGroup<const N: usize> {
    focused: usize,
}

/// A focus change from one slot to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMove {
    pub from: usize,
    pub to: usize,
}

impl<const N: usize> FocusGroup<N> {
    /// Create a new focus group with focus on the first slot (index 0).
    pub fn new() -> Self {
        Self { focused: 0 }
    }

    /// Return the index of the currently focused slot.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Return whether the slot at the given index currently has focus.
    pub fn is_focused(&self, index: usize) -> bool {
        self.focused == index
    }

    /// Move to the next available slot, wrapping after the last.
    pub fn focus_next(&mut self, available: impl Fn(usize) -> bool) -> Option<FocusMove> {
        self.step(1, available)
    }

    /// Move to the previous available slot, wrapping before the first.
    pub fn focus_prev(&mut self, available: impl Fn(usize) -> bool) -> Option<FocusMove> {
        self.step(N - 1, available)
    }

    /// Focus `index` (clamped). `None` when it already had focus.
    pub fn focus(&mut self, index: usize) -> Option<FocusMove> {
        let to = index.min(N.saturating_sub(1));
        self.move_to(to)
    }

    fn step(&mut self, stride: usize, available: impl Fn(usize) -> bool) -> Option<FocusMove> {
        let mut candidate = self.focused;
        for _ in 0..N {
            candidate = (candidate + stride) % N;
            if available(candidate) {
                return self.move_to(candidate);
            }
        }
        None
    }

    fn move_to(&mut self, to: usize) -> Option<FocusMove> {
        if to == self.focused {
            return None;
        }
        let from = std::mem::replace(&mut self.focused, to);
        Some(FocusMove { from, to })
    }
}

impl<const N: usize> Default for FocusGroup<N> {
    fn default() -> Self {
        Self::new()
    }
}
