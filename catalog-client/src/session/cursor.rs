use serde::{Deserialize, Serialize};

/// Pages needed to show `total_items` at `page_size` per page, at least one.
pub fn page_count(total_items: u64, page_size: u32) -> u32 {
    let pages = total_items.div_ceil(u64::from(page_size.max(1))).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Current page and last known page. Always `1 <= current <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    current: u32,
    max: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self { current: 1, max: 1 }
    }
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn has_next(&self) -> bool {
        self.current < self.max
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Returns whether the page changed.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Moves to `page`, clamped into `1..=max`. Returns whether the page changed.
    pub fn jump(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.max);
        let changed = target != self.current;
        self.current = target;
        changed
    }

    pub fn set_max(&mut self, max: u32) {
        self.max = max.max(1);
        self.current = self.current.min(self.max);
    }

    pub fn set_total_items(&mut self, total_items: u64, page_size: u32) {
        self.set_max(page_count(total_items, page_size));
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// `current/max`, as shown in the footer.
    pub fn label(&self) -> String {
        format!("{}/{}", self.current, self.max)
    }
}
