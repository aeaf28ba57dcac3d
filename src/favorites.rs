use serde::{Deserialize, Serialize};

use crate::state::Entity;

/// Favorited entities, unique by name, kept in the order they were added.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Favorites {
    entries: Vec<Entity>,
}

impl Favorites {
    /// Remove `entity` if a favorite with the same name exists, otherwise
    /// append it. Returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, entity: Entity) -> bool {
        if let Some(index) = self.position(&entity.name) {
            self.entries.remove(index);
            false
        } else {
            self.entries.push(entity);
            true
        }
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn entries(&self) -> &[Entity] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }
}
