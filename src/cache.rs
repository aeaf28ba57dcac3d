use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::state::Detail;

/// Name-keyed detail records fetched during this session.
///
/// Clones share the same entries. An entry is only ever a fully parsed
/// [`Detail`]; failed fetches leave the map untouched.
#[derive(Clone)]
pub struct DetailCache {
    catalog: Arc<dyn Catalog>,
    entries: Arc<RwLock<HashMap<String, Detail>>>,
}

impl DetailCache {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Return the cached detail for `name`, fetching it on a miss or when
    /// `force` is set. Fetch failures are logged and yield `None`.
    pub async fn get(&self, name: &str, force: bool) -> Option<Detail> {
        if !force {
            if let Some(detail) = self.entries.read().await.get(name) {
                tracing::debug!(name, "detail cache hit");
                return Some(detail.clone());
            }
        }

        tracing::debug!(name, force, "fetching detail");
        match self.catalog.fetch_detail(name).await {
            Ok(detail) => {
                // Last writer wins when two flows fill the same miss.
                self.entries
                    .write()
                    .await
                    .insert(name.to_string(), detail.clone());
                Some(detail)
            }
            Err(error) => {
                tracing::warn!(name, %error, "failed to fetch detail");
                None
            }
        }
    }

    /// Cached detail without touching the network.
    pub async fn peek(&self, name: &str) -> Option<Detail> {
        self.entries.read().await.get(name).cloned()
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.entries.read().await.contains_key(name)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
