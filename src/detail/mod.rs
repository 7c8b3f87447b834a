//! Detail view for a single creature.
//!
//! Detail-only fields are fetched lazily and never stored in the record
//! store. `PokemonDetail` is assembled from the detail sub-resource, the
//! species sub-resource (optional; its failure only degrades the text
//! fields) and the resolved evolution chain.

pub mod evolution;
pub mod navigation;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::api::{CatalogSource, LookupKey, PokemonResponse, SpeciesResponse, generation_of};
use crate::catalog::weaknesses_for;
use crate::error::Result;
use crate::types::{Pokemon, image_url};

pub use evolution::{EvolutionStage, first_branch, resolve_chain};
pub use navigation::{DetailAction, DetailController, DetailKey, DetailView, Direction, key_to_action};

pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_ENGLISH_DESCRIPTION: &str = "No English description available.";
pub const UNKNOWN_HABITAT: &str = "unknown";

/// Highest base stat the stat bars are scaled against
pub const MAX_BASE_STAT: u32 = 255;

static FLAVOR_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\x0c]").expect("flavor text regex should be valid"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub base: u32,
}

impl Stat {
    /// Fill ratio for a stat bar, capped at 1
    pub fn ratio(&self) -> f64 {
        (self.base as f64 / MAX_BASE_STAT as f64).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub hidden: bool,
}

/// Everything the detail view shows for one creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<u8>,
    pub games: Vec<String>,
    /// Metres
    pub height_m: f64,
    /// Kilograms
    pub weight_kg: f64,
    pub stats: Vec<Stat>,
    pub abilities: Vec<Ability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cry_url: Option<String>,
    pub description: String,
    pub category: String,
    pub habitat: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub evolution: Vec<EvolutionStage>,
    pub weaknesses: Vec<String>,
}

impl PokemonDetail {
    /// Seed a detail view from an already-known store record
    pub fn seed(record: &Pokemon, image_base: &str) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            types: record.types.clone(),
            image_url: image_url(image_base, record.id),
            generation: record.generation,
            games: record.games.clone(),
            height_m: 0.0,
            weight_kg: 0.0,
            stats: Vec::new(),
            abilities: Vec::new(),
            cry_url: None,
            description: NO_DESCRIPTION.to_string(),
            category: String::new(),
            habitat: UNKNOWN_HABITAT.to_string(),
            color: None,
            evolution: Vec::new(),
            weaknesses: weaknesses_for(&record.types),
        }
    }

    /// Store record for this creature; partial when the species was missing
    pub fn to_record(&self) -> Pokemon {
        match self.generation {
            Some(_) => Pokemon {
                id: self.id,
                name: self.name.clone(),
                types: self.types.clone(),
                generation: self.generation,
                games: self.games.clone(),
            },
            None => Pokemon::partial(self.id, self.name.clone(), self.types.clone()),
        }
    }

    /// Overwrite with the fields of the detail sub-resource
    pub fn apply_detail(&mut self, detail: &PokemonResponse, image_base: &str) {
        self.id = detail.id;
        self.name = detail.name.clone();
        self.types = detail.type_names();
        self.image_url = image_url(image_base, detail.id);
        self.games = detail.game_names();
        self.height_m = detail.height as f64 / 10.0;
        self.weight_kg = detail.weight as f64 / 10.0;
        self.stats = detail
            .stats
            .iter()
            .map(|s| Stat {
                name: s.stat.name.clone(),
                base: s.base_stat,
            })
            .collect();
        self.abilities = detail
            .abilities
            .iter()
            .map(|a| Ability {
                name: a.ability.name.clone(),
                hidden: a.is_hidden,
            })
            .collect();
        self.cry_url = detail.cries.as_ref().and_then(|c| c.latest.clone());
        self.weaknesses = weaknesses_for(&self.types);
    }

    /// Overwrite the species-derived text fields. `None` means the species
    /// could not be fetched.
    pub fn apply_species(&mut self, species: Option<&SpeciesResponse>) {
        self.description = description(species);
        self.category = category(species);
        self.habitat = species
            .and_then(|s| s.habitat.as_ref())
            .map(|h| h.name.clone())
            .unwrap_or_else(|| UNKNOWN_HABITAT.to_string());
        self.color = species.and_then(|s| s.color.as_ref()).map(|c| c.name.clone());
        if let Some(generation) = species.and_then(|s| generation_of(s).ok()) {
            self.generation = Some(generation);
        }
    }
}

/// First English flavor text with line and page breaks flattened
pub fn description(species: Option<&SpeciesResponse>) -> String {
    let Some(species) = species else {
        return NO_DESCRIPTION.to_string();
    };
    species
        .flavor_text_entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| FLAVOR_BREAKS.replace_all(&entry.flavor_text, " ").into_owned())
        .unwrap_or_else(|| NO_ENGLISH_DESCRIPTION.to_string())
}

/// First English genus, empty when there is none
pub fn category(species: Option<&SpeciesResponse>) -> String {
    species
        .and_then(|s| s.genera.iter().find(|g| g.language.name == "en"))
        .map(|g| g.genus.clone())
        .unwrap_or_default()
}

/// Fetch and assemble the full detail for one creature.
///
/// The detail sub-resource is required. Species and evolution failures are
/// logged and leave their fields at the fallbacks.
pub async fn load_detail<S: CatalogSource>(
    source: &S,
    key: &LookupKey,
    image_base: &str,
) -> Result<PokemonDetail> {
    let response = source.pokemon(key).await?;
    let seed = Pokemon::partial(response.id, response.name.clone(), response.type_names());
    let mut detail = PokemonDetail::seed(&seed, image_base);
    detail.apply_detail(&response, image_base);

    let species = match source.species_at(&response.species.url).await {
        Ok(species) => Some(species),
        Err(e) => {
            tracing::warn!("species for {} unavailable: {}", response.name, e);
            None
        }
    };
    detail.apply_species(species.as_ref());

    if let Some(chain_url) = species
        .as_ref()
        .and_then(|s| s.evolution_chain.as_ref())
        .map(|c| c.url.as_str())
    {
        match resolve_chain(source, chain_url, image_base).await {
            Ok(stages) => detail.evolution = stages,
            Err(e) => tracing::warn!("evolution chain for {} unavailable: {}", response.name, e),
        }
    }

    Ok(detail)
}
