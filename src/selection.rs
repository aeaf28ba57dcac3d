use serde::{Deserialize, Serialize};

use crate::generation::Generation;
use crate::state::Detail;

/// The single entity chosen for the detail overlay.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    name: Option<String>,
    generation: Generation,
    detail: Option<Detail>,
    loading: bool,
}

impl Selection {
    /// Select `name` and return the token the detail lookup must carry.
    /// Any previously published detail stays until the lookup resolves.
    pub fn select(&mut self, name: impl Into<String>) -> Generation {
        self.name = Some(name.into());
        self.loading = true;
        self.generation.bump()
    }

    /// Publish the lookup result for `generation`. A result for an older
    /// selection, or one that arrives after [`Selection::clear`], is dropped.
    pub fn resolve(&mut self, generation: Generation, detail: Option<Detail>) -> bool {
        if self.name.is_none() || generation != self.generation {
            tracing::debug!(%generation, current = %self.generation, "discarding stale detail");
            return false;
        }
        self.detail = detail;
        self.loading = false;
        true
    }

    pub fn clear(&mut self) {
        self.name = None;
        self.detail = None;
        self.loading = false;
        self.generation.bump();
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }
}
