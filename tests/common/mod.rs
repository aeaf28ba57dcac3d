#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use pokefav::catalog::{Catalog, CatalogError};
use pokefav::state::{Detail, Entity};

pub fn entity(name: &str) -> Entity {
    Entity {
        name: name.to_string(),
        url: format!("https://pokeapi.co/api/v2/pokemon/{name}/"),
    }
}

pub fn numbered_entities(count: usize) -> Vec<Entity> {
    (1..=count).map(|n| entity(&format!("mon-{n:03}"))).collect()
}

pub fn detail(name: &str, types: &[&str]) -> Detail {
    Detail {
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        height: 4,
        weight: 60,
        abilities: vec!["static".into()],
        held_items: Vec::new(),
        sprite_url: None,
    }
}

/// In-memory catalog that records every call and can hold a detail lookup
/// until its gate is opened.
#[derive(Default)]
pub struct FakeCatalog {
    entries: Vec<Entity>,
    fail_list: bool,
    details: Mutex<HashMap<String, Detail>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, entries: Vec<Entity>) -> Self {
        self.entries = entries;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn with_detail(self, detail: Detail) -> Self {
        self.set_detail(detail);
        self
    }

    pub fn set_detail(&self, detail: Detail) {
        self.details
            .lock()
            .unwrap()
            .insert(detail.name.clone(), detail);
    }

    /// Hold lookups of `name` until the returned gate is notified.
    pub fn gate(&self, name: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(name.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self, name: &str) -> usize {
        let call = format!("detail:{name}");
        self.calls().iter().filter(|c| **c == call).count()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn list_entries(&self, limit: usize, offset: usize) -> Result<Vec<Entity>, CatalogError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("list:{limit}:{offset}"));
        if self.fail_list {
            return Err(CatalogError::Status {
                status: 503,
                url: "fake://list".into(),
            });
        }
        Ok(self.entries.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn fetch_detail(&self, name: &str) -> Result<Detail, CatalogError> {
        self.calls.lock().unwrap().push(format!("detail:{name}"));
        let gate = self.gates.lock().unwrap().get(name).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let found = self.details.lock().unwrap().get(name).cloned();
        found.ok_or_else(|| CatalogError::Status {
            status: 404,
            url: format!("fake://pokemon/{name}"),
        })
    }
}
