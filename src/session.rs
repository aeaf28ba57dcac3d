use std::sync::Arc;

use crate::breakdown::{collect_type_counts, TypeCount};
use crate::cache::DetailCache;
use crate::catalog::{Catalog, CatalogError, PokeApi};
use crate::config::Config;
use crate::state::{Detail, Entity};

/// Services that live as long as one run of the app: the catalog client and
/// the detail cache shared by the type breakdown and the detail overlay.
#[derive(Clone)]
pub struct Session {
    catalog: Arc<dyn Catalog>,
    cache: DetailCache,
}

impl Session {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        let cache = DetailCache::new(Arc::clone(&catalog));
        Self { catalog, cache }
    }

    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let api = PokeApi::new(config.api_base.clone(), config.timeout)?;
        Ok(Self::new(Arc::new(api)))
    }

    pub fn cache(&self) -> &DetailCache {
        &self.cache
    }

    pub async fn load_list(&self, limit: usize, offset: usize) -> Result<Vec<Entity>, CatalogError> {
        match self.catalog.list_entries(limit, offset).await {
            Ok(entries) => {
                tracing::info!(count = entries.len(), limit, offset, "list loaded");
                Ok(entries)
            }
            Err(error) => {
                tracing::error!(%error, "list fetch failed");
                Err(error)
            }
        }
    }

    pub async fn type_counts(&self, favorites: &[Entity]) -> Vec<TypeCount> {
        collect_type_counts(&self.cache, favorites).await
    }

    pub async fn detail(&self, name: &str, force: bool) -> Option<Detail> {
        self.cache.get(name, force).await
    }
}
