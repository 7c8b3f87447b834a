//! PokéAPI client over reqwest.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{PokedexError, Result};

use super::{
    CatalogSource, EvolutionChainResponse, LookupKey, PageResponse, PokemonResponse,
    SpeciesResponse,
};

/// PokéAPI-backed catalog source
#[derive(Clone)]
pub struct PokeApiClient {
    client: Client,
    pokemon_url: String,
    species_url: String,
    /// Species responses keyed by URL; evolution chains revisit the same stages
    species_cache: Arc<RwLock<HashMap<String, SpeciesResponse>>>,
}

impl PokeApiClient {
    /// Create a client from configuration
    ///
    /// Uses the configured timeout for the whole request and a third of it
    /// for connecting.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout / 3)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            pokemon_url: config.pokemon_url(),
            species_url: config.species_url(),
            species_cache: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// GET a JSON resource. `what` names the resource for not-found errors.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        tracing::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            return Err(PokedexError::Api(format!(
                "{} {} for {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                url
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

impl CatalogSource for PokeApiClient {
    async fn list(&self, offset: u32, limit: u32) -> Result<PageResponse> {
        let url = format!("{}?limit={}&offset={}", self.pokemon_url, limit, offset);
        self.get_json(&url, "catalog page").await
    }

    async fn pokemon(&self, key: &LookupKey) -> Result<PokemonResponse> {
        let url = format!("{}/{}", self.pokemon_url, key.as_path_segment());
        self.get_json(&url, &key.to_string()).await
    }

    async fn species(&self, id: u32) -> Result<SpeciesResponse> {
        let url = format!("{}/{}/", self.species_url, id);
        self.species_at(&url).await
    }

    async fn species_at(&self, url: &str) -> Result<SpeciesResponse> {
        let cached = self.species_cache.read().get(url).cloned();
        if let Some(species) = cached {
            return Ok(species);
        }

        let species: SpeciesResponse = self.get_json(url, &format!("species {url}")).await?;
        self.species_cache
            .write()
            .insert(url.to_string(), species.clone());
        Ok(species)
    }

    async fn evolution_chain(&self, url: &str) -> Result<EvolutionChainResponse> {
        self.get_json(url, &format!("evolution chain {url}")).await
    }
}
