use serde::{Deserialize, Serialize};

use crate::state::Entity;

pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Incremental window over the master list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pager {
    entries: Vec<Entity>,
    shown: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            shown: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn with_entries(entries: Vec<Entity>, page_size: usize) -> Self {
        let mut pager = Self::new(page_size);
        pager.entries = entries;
        pager
    }

    /// Replace the master list. Pages already shown stay shown, clamped to
    /// the new total.
    pub fn replace(&mut self, entries: Vec<Entity>) {
        self.entries = entries;
        self.shown = self.shown.min(self.entries.len());
    }

    /// Show one more page. Returns whether anything changed.
    pub fn load_more(&mut self) -> bool {
        let next = (self.shown + self.page_size).min(self.total());
        if next == self.shown {
            return false;
        }
        self.shown = next;
        true
    }

    pub fn visible(&self) -> &[Entity] {
        &self.entries[..self.shown]
    }

    pub fn is_exhausted(&self) -> bool {
        self.shown >= self.total()
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
