use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::breakdown::{TypeBreakdown, TypeCount};
use crate::config::DEFAULT_LIST_LIMIT;
use crate::favorites::Favorites;
use crate::pager::{Pager, DEFAULT_PAGE_SIZE};
use crate::selection::Selection;

/// One row of the master list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub name: String,
    pub types: Vec<String>,
    pub height: u32,
    pub weight: u32,
    pub abilities: Vec<String>,
    pub held_items: Vec<String>,
    pub sprite_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    #[default]
    All,
    Favorites,
}

impl View {
    pub fn toggle(self) -> Self {
        match self {
            View::All => View::Favorites,
            View::Favorites => View::All,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub view: View,
    pub list_limit: usize,
    pub pager: Pager,
    pub list_loading: bool,
    pub list_error: Option<String>,
    pub favorites: Favorites,
    pub breakdown: TypeBreakdown,
    pub selection: Selection,
    pub search: SearchState,
    pub cursor: usize,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_LIST_LIMIT)
    }
}

impl AppState {
    pub fn new(page_size: usize, list_limit: usize) -> Self {
        Self {
            terminal_size: (80, 24),
            view: View::All,
            list_limit,
            pager: Pager::new(page_size),
            list_loading: false,
            list_error: None,
            favorites: Favorites::default(),
            breakdown: TypeBreakdown::default(),
            selection: Selection::default(),
            search: SearchState::default(),
            cursor: 0,
            tick: 0,
        }
    }

    pub fn is_filtering(&self) -> bool {
        !self.search.query.trim().is_empty()
    }

    /// The shown page narrowed by the search query. Entries beyond the
    /// page are never searched.
    pub fn visible_entries(&self) -> Vec<&Entity> {
        let query = self.search.query.trim().to_lowercase();
        self.pager
            .visible()
            .iter()
            .filter(|entry| query.is_empty() || entry.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn current_entries(&self) -> Vec<&Entity> {
        match self.view {
            View::All => self.visible_entries(),
            View::Favorites => self.favorites.entries().iter().collect(),
        }
    }

    pub fn entry_under_cursor(&self) -> Option<&Entity> {
        self.current_entries().get(self.cursor).copied()
    }

    pub fn can_load_more(&self) -> bool {
        !self.is_filtering() && !self.pager.is_exhausted()
    }

    pub fn type_counts(&self) -> &[TypeCount] {
        self.breakdown.counts()
    }

    pub fn selected_detail(&self) -> Option<&Detail> {
        self.selection.detail()
    }

    pub fn set_cursor(&mut self, index: usize) -> bool {
        let len = self.current_entries().len();
        if len == 0 {
            self.cursor = 0;
            return false;
        }
        let bounded = index.min(len - 1);
        if bounded != self.cursor {
            self.cursor = bounded;
            return true;
        }
        false
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.current_entries().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    pub fn is_busy(&self) -> bool {
        self.list_loading || self.breakdown.is_computing() || self.selection.is_loading()
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("List")
                .entry("total", ron_string(&self.pager.total()))
                .entry("shown", ron_string(&self.pager.shown()))
                .entry("page_size", ron_string(&self.pager.page_size()))
                .entry("visible", ron_string(&self.visible_entries().len()))
                .entry("cursor", ron_string(&self.cursor))
                .entry("view", ron_string(&self.view)),
            DebugSection::new("Favorites")
                .entry("count", ron_string(&self.favorites.len()))
                .entry("types", ron_string(&self.breakdown.counts()))
                .entry("generation", ron_string(&self.breakdown.generation().value()))
                .entry("computing", ron_string(&self.breakdown.is_computing())),
            DebugSection::new("Selection")
                .entry("name", ron_string(&self.selection.name()))
                .entry("generation", ron_string(&self.selection.generation().value()))
                .entry("loading", ron_string(&self.selection.is_loading()))
                .entry("shown", ron_string(&self.selection.detail().is_some())),
            DebugSection::new("Status")
                .entry("search", ron_string(&self.search.query))
                .entry("search_active", ron_string(&self.search.active))
                .entry("list_loading", ron_string(&self.list_loading))
                .entry("list_error", ron_string(&self.list_error)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(names: &[&str]) -> Vec<Entity> {
        names
            .iter()
            .map(|name| Entity {
                name: name.to_string(),
                url: String::new(),
            })
            .collect()
    }

    #[test]
    fn search_only_covers_the_shown_page() {
        let mut state = AppState::new(2, 150);
        state.pager.replace(entities(&["bulbasaur", "ivysaur", "venusaur"]));
        state.pager.load_more();
        state.search.query = "saur".into();
        assert_eq!(state.visible_entries().len(), 2);

        state.search.query = "venu".into();
        assert!(state.visible_entries().is_empty());
        assert!(!state.can_load_more());
    }

    #[test]
    fn search_is_case_insensitive_and_trimmed() {
        let mut state = AppState::new(30, 150);
        state.pager.replace(entities(&["Pikachu", "raichu", "onix"]));
        state.pager.load_more();
        state.search.query = "  CHU ".into();
        let names: Vec<_> = state.visible_entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Pikachu", "raichu"]);
    }

    #[test]
    fn cursor_follows_the_current_view() {
        let mut state = AppState::new(30, 150);
        state.pager.replace(entities(&["a", "b", "c"]));
        state.pager.load_more();
        assert!(state.set_cursor(10));
        assert_eq!(state.cursor, 2);

        state.view = View::Favorites;
        state.clamp_cursor();
        assert_eq!(state.cursor, 0);
        assert!(state.entry_under_cursor().is_none());
    }
}
