//! Upstream catalog API.
//!
//! This module defines the `CatalogSource` seam the rest of the crate fetches
//! through, the wire types it returns, and the reqwest-backed client that
//! talks to PokéAPI.

pub mod client;
pub mod types;

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use crate::error::{PokedexError, Result};

pub use client::PokeApiClient;
pub use types::{
    ChainLink, EvolutionChainResponse, NamedResource, PageResponse, PokemonResponse,
    SpeciesResponse,
};

/// Direct lookup key for a single record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    Id(u32),
    Name(String),
}

impl LookupKey {
    /// Parse user input: digits are an id, anything else a lowercased name.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PokedexError::Other("empty lookup".to_string()));
        }

        if s.chars().all(|c| c.is_ascii_digit()) {
            let id: u32 = s
                .parse()
                .map_err(|_| PokedexError::Other(format!("id '{s}' is out of range")))?;
            return Ok(LookupKey::Id(id));
        }

        Ok(LookupKey::Name(s.to_lowercase()))
    }

    /// Path segment used in the API URL
    pub fn as_path_segment(&self) -> String {
        match self {
            LookupKey::Id(id) => id.to_string(),
            LookupKey::Name(name) => name.clone(),
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "#{}", id),
            LookupKey::Name(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for LookupKey {
    type Err = PokedexError;

    fn from_str(s: &str) -> Result<Self> {
        LookupKey::parse(s)
    }
}

impl From<u32> for LookupKey {
    fn from(id: u32) -> Self {
        LookupKey::Id(id)
    }
}

/// Extract the numeric id encoded as the last path segment of a resource URL.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` yields `25`.
pub fn id_from_url(url: &str) -> Result<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| PokedexError::Api(format!("no numeric id in resource URL '{url}'")))
}

/// Generation number from a species' generation reference URL.
pub fn generation_of(species: &SpeciesResponse) -> Result<u8> {
    let id = id_from_url(&species.generation.url)?;
    u8::try_from(id)
        .map_err(|_| PokedexError::Api(format!("generation {id} out of range")))
}

/// Common interface for catalog backends
///
/// Implementations must map an upstream "does not exist" answer to
/// `PokedexError::NotFound` and every other failure to a transport error.
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of record summaries
    fn list(&self, offset: u32, limit: u32)
    -> impl Future<Output = Result<PageResponse>> + Send;

    /// Fetch the detail sub-resource for one record
    fn pokemon(&self, key: &LookupKey) -> impl Future<Output = Result<PokemonResponse>> + Send;

    /// Fetch the species sub-resource by id
    fn species(&self, id: u32) -> impl Future<Output = Result<SpeciesResponse>> + Send;

    /// Fetch a species sub-resource by its full URL
    fn species_at(&self, url: &str) -> impl Future<Output = Result<SpeciesResponse>> + Send;

    /// Fetch an evolution chain by its full URL
    fn evolution_chain(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<EvolutionChainResponse>> + Send;
}
