//! PokeAPI client

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::state::{Detail, Entity};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only access to the remote creature catalog. No caching happens here.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn list_entries(&self, limit: usize, offset: usize) -> Result<Vec<Entity>, CatalogError>;

    async fn fetch_detail(&self, name: &str) -> Result<Detail, CatalogError>;
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    height: u32,
    weight: u32,
    types: Vec<PokemonTypeSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    #[serde(default)]
    held_items: Vec<PokemonHeldItemSlot>,
    #[serde(default)]
    sprites: Option<PokemonSprites>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonHeldItemSlot {
    item: NamedResource,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct PokemonSprites {
    front_default: Option<String>,
}

pub struct PokeApi {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokefav/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>, CatalogError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Catalog for PokeApi {
    async fn list_entries(&self, limit: usize, offset: usize) -> Result<Vec<Entity>, CatalogError> {
        let url = format!("{}/pokemon", self.base_url);
        let query = [("limit", limit.to_string()), ("offset", offset.to_string())];
        let bytes = self.fetch_bytes(&url, &query).await?;
        parse_list(&bytes)
    }

    async fn fetch_detail(&self, name: &str) -> Result<Detail, CatalogError> {
        let url = format!("{}/pokemon/{name}", self.base_url);
        let bytes = self.fetch_bytes(&url, &[]).await?;
        parse_detail(name, &bytes)
    }
}

pub fn parse_list(bytes: &[u8]) -> Result<Vec<Entity>, CatalogError> {
    let response: ListResponse = serde_json::from_slice(bytes)?;
    Ok(response
        .results
        .into_iter()
        .map(|entry| Entity {
            name: entry.name,
            url: entry.url,
        })
        .collect())
}

/// Extract the fields the app uses from a `/pokemon/{name}` body.
///
/// The record is keyed by the requested `name`, not the name in the body.
pub fn parse_detail(name: &str, bytes: &[u8]) -> Result<Detail, CatalogError> {
    let response: PokemonResponse = serde_json::from_slice(bytes)?;
    Ok(Detail {
        name: name.to_string(),
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        height: response.height,
        weight: response.weight,
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
        held_items: response
            .held_items
            .into_iter()
            .map(|slot| slot.item.name)
            .collect(),
        sprite_url: response.sprites.and_then(|sprites| sprites.front_default),
    })
}
