//! Type breakdown of the favorites: histogram, percentages, and the
//! generation-guarded state that publishes them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::cache::DetailCache;
use crate::favorites::Favorites;
use crate::generation::Generation;
use crate::state::Entity;

/// One histogram bucket: how many favorites carry the type `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    pub name: String,
    pub value: u32,
}

/// Group type names by exact equality and count them, sorted by name.
pub fn build_type_counts<I, S>(type_names: I) -> Vec<TypeCount>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for name in type_names {
        *counts.entry(name.into()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(name, value)| TypeCount { name, value })
        .collect()
}

/// Share of `name` in the histogram as `"NN.NN%"`, or `"0%"` when the
/// histogram is empty or does not contain `name`.
pub fn type_percent(name: &str, counts: &[TypeCount]) -> String {
    let total: u32 = counts.iter().map(|count| count.value).sum();
    if total == 0 {
        return "0%".to_string();
    }
    let Some(target) = counts.iter().find(|count| count.name == name) else {
        return "0%".to_string();
    };
    format!("{:.2}%", f64::from(target.value) / f64::from(total) * 100.0)
}

/// Fetch any uncached favorites concurrently, then count the types of
/// every favorite whose detail is cached. Failed fetches are skipped.
pub async fn collect_type_counts(cache: &DetailCache, favorites: &[Entity]) -> Vec<TypeCount> {
    if favorites.is_empty() {
        return Vec::new();
    }

    let mut join_set = JoinSet::new();
    for entity in favorites {
        if cache.contains(&entity.name).await {
            continue;
        }
        let cache = cache.clone();
        let name = entity.name.clone();
        join_set.spawn(async move { cache.get(&name, false).await.is_some() });
    }

    let mut missing = 0usize;
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(true) => {}
            Ok(false) => missing += 1,
            Err(error) => {
                missing += 1;
                tracing::warn!(%error, "detail task failed");
            }
        }
    }
    if missing > 0 {
        tracing::debug!(missing, "favorites without detail skipped");
    }

    let mut type_names = Vec::new();
    for entity in favorites {
        if let Some(detail) = cache.peek(&entity.name).await {
            type_names.extend(detail.types);
        }
    }
    build_type_counts(type_names)
}

/// Published type counts plus the bookkeeping that keeps stale runs out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    generation: Generation,
    computing: bool,
    counts: Vec<TypeCount>,
}

impl TypeBreakdown {
    /// React to a favorites change. Every call invalidates runs already in
    /// flight. Returns the token for a new run, or `None` when there are no
    /// favorites and the empty result has been published directly.
    pub fn trigger(&mut self, favorites: &Favorites) -> Option<Generation> {
        let generation = self.generation.bump();
        if favorites.is_empty() {
            self.counts.clear();
            self.computing = false;
            return None;
        }
        self.computing = true;
        Some(generation)
    }

    /// Publish the result of run `generation`. Returns `false` and leaves
    /// the state alone if a newer run has been triggered since.
    pub fn publish(&mut self, generation: Generation, counts: Vec<TypeCount>) -> bool {
        if generation != self.generation {
            tracing::debug!(%generation, current = %self.generation, "discarding stale type counts");
            return false;
        }
        self.counts = counts;
        self.computing = false;
        true
    }

    pub fn counts(&self) -> &[TypeCount] {
        &self.counts
    }

    pub fn is_computing(&self) -> bool {
        self.computing
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn percent(&self, name: &str) -> String {
        type_percent(name, &self.counts)
    }
}
