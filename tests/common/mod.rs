#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::process::{Command, Output};

use parking_lot::Mutex;
use tempfile::TempDir;

use pokedex::api::types::{
    AbilityEntry, ChainLink, Cries, EvolutionChainResponse, FlavorTextEntry, GameIndex, Genus,
    NamedResource, PageResponse, PokemonResponse, SpeciesResponse, StatEntry, TypeSlot,
    UrlResource,
};
use pokedex::api::{CatalogSource, LookupKey, id_from_url};
use pokedex::error::{PokedexError, Result};
use pokedex::fetch::FetchLimits;

pub const API_BASE: &str = "https://pokeapi.co/api/v2";
pub const IMAGE_BASE: &str = "https://img.example/";

/// Every request the fake has served, in order
#[derive(Debug, Clone, Default)]
pub struct RequestLog {
    pub lists: Vec<(u32, u32)>,
    pub pokemon: Vec<String>,
    pub species: Vec<u32>,
    pub chains: Vec<String>,
}

impl RequestLog {
    pub fn total(&self) -> usize {
        self.lists.len() + self.pokemon.len() + self.species.len() + self.chains.len()
    }
}

/// In-memory catalog of `size` synthetic creatures named `mon-{id}`.
///
/// Chains group ids in threes: 1→2→3, 4→5→6, and so on.
pub struct FakeCatalog {
    size: u32,
    failing: HashSet<u32>,
    broken_list: bool,
    broken_species: bool,
    forms: HashMap<String, (u32, u32)>,
    log: Mutex<RequestLog>,
}

impl FakeCatalog {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            failing: HashSet::new(),
            broken_list: false,
            broken_species: false,
            forms: HashMap::new(),
            log: Mutex::new(RequestLog::default()),
        }
    }

    /// Detail lookups for these ids fail with a transport error
    pub fn failing_on(mut self, ids: &[u32]) -> Self {
        self.failing.extend(ids.iter().copied());
        self
    }

    /// Every list request fails with a transport error
    pub fn with_broken_list(mut self) -> Self {
        self.broken_list = true;
        self
    }

    /// Every species lookup fails with a transport error
    pub fn with_broken_species(mut self) -> Self {
        self.broken_species = true;
        self
    }

    /// Serve an alternate form with its own id that points at `species_id`
    pub fn with_form(mut self, name: &str, form_id: u32, species_id: u32) -> Self {
        self.forms.insert(name.to_string(), (form_id, species_id));
        self
    }

    pub fn requests(&self) -> RequestLog {
        self.log.lock().clone()
    }

    pub fn clear_requests(&self) {
        *self.log.lock() = RequestLog::default();
    }

    fn form(&self, key: &LookupKey) -> Option<(&str, u32, u32)> {
        self.forms
            .iter()
            .find(|(name, (form_id, _))| match key {
                LookupKey::Id(id) => id == form_id,
                LookupKey::Name(wanted) => wanted == *name,
            })
            .map(|(name, (form_id, species_id))| (name.as_str(), *form_id, *species_id))
    }

    fn resolve(&self, key: &LookupKey) -> Option<u32> {
        let id = match key {
            LookupKey::Id(id) => *id,
            LookupKey::Name(name) => name.strip_prefix("mon-")?.parse().ok()?,
        };
        (1..=self.size).contains(&id).then_some(id)
    }
}

pub fn name_of(id: u32) -> String {
    format!("mon-{id}")
}

pub fn types_of(id: u32) -> Vec<String> {
    let mut types = vec![if id % 2 == 0 { "fire" } else { "water" }.to_string()];
    if id % 3 == 0 {
        types.push("flying".to_string());
    }
    types
}

pub fn generation_of_id(id: u32) -> u8 {
    match id {
        0..=151 => 1,
        152..=251 => 2,
        _ => 3,
    }
}

fn games_of(id: u32) -> Vec<&'static str> {
    match generation_of_id(id) {
        1 => vec!["red", "blue"],
        2 => vec!["gold", "silver"],
        _ => vec!["ruby", "sapphire"],
    }
}

fn resource(name: impl Into<String>, url: impl Into<String>) -> NamedResource {
    NamedResource {
        name: name.into(),
        url: url.into(),
    }
}

fn species_url(id: u32) -> String {
    format!("{API_BASE}/pokemon-species/{id}/")
}

fn chain_url(chain: u32) -> String {
    format!("{API_BASE}/evolution-chain/{chain}/")
}

fn english(name: &str) -> NamedResource {
    resource(name, format!("{API_BASE}/language/9/"))
}

pub fn pokemon_response(id: u32) -> PokemonResponse {
    let stat = |name: &str, base_stat: u32| StatEntry {
        base_stat,
        stat: resource(name, format!("{API_BASE}/stat/{name}/")),
    };

    PokemonResponse {
        id,
        name: name_of(id),
        types: types_of(id)
            .into_iter()
            .map(|t| TypeSlot {
                type_ref: resource(t.clone(), format!("{API_BASE}/type/{t}/")),
            })
            .collect(),
        stats: vec![
            stat("hp", 45),
            stat("attack", 49),
            stat("defense", 49),
            stat("special-attack", 65),
            stat("special-defense", 65),
            stat("speed", 45),
        ],
        abilities: vec![
            AbilityEntry {
                ability: resource("overgrow", format!("{API_BASE}/ability/65/")),
                is_hidden: false,
            },
            AbilityEntry {
                ability: resource("chlorophyll", format!("{API_BASE}/ability/34/")),
                is_hidden: true,
            },
        ],
        height: 7,
        weight: 69,
        species: resource(name_of(id), species_url(id)),
        cries: Some(Cries {
            latest: Some(format!("https://cries.example/{id}.ogg")),
        }),
        game_indices: games_of(id)
            .into_iter()
            .map(|g| GameIndex {
                version: resource(g, format!("{API_BASE}/version/{g}/")),
            })
            .collect(),
    }
}

/// A form shares its species' data under its own id and name
pub fn form_response(name: &str, form_id: u32, species_id: u32) -> PokemonResponse {
    PokemonResponse {
        id: form_id,
        name: name.to_string(),
        ..pokemon_response(species_id)
    }
}

pub fn species_response(id: u32) -> SpeciesResponse {
    let generation = generation_of_id(id);
    SpeciesResponse {
        id,
        name: name_of(id),
        generation: resource(
            format!("generation-{generation}"),
            format!("{API_BASE}/generation/{generation}/"),
        ),
        habitat: (id % 5 != 0).then(|| resource("grassland", format!("{API_BASE}/habitat/3/"))),
        color: Some(resource("green", format!("{API_BASE}/color/5/"))),
        flavor_text_entries: vec![
            FlavorTextEntry {
                flavor_text: format!("Entrée numéro {id}."),
                language: resource("fr", format!("{API_BASE}/language/5/")),
            },
            FlavorTextEntry {
                flavor_text: format!("Creature\nnumber\x0c{id}."),
                language: english("en"),
            },
        ],
        genera: vec![Genus {
            genus: "Seed Pokémon".to_string(),
            language: english("en"),
        }],
        evolution_chain: Some(UrlResource {
            url: chain_url((id - 1) / 3 + 1),
        }),
    }
}

impl CatalogSource for FakeCatalog {
    async fn list(&self, offset: u32, limit: u32) -> Result<PageResponse> {
        self.log.lock().lists.push((offset, limit));
        if self.broken_list {
            return Err(PokedexError::Api("list unavailable (status 503)".to_string()));
        }

        let end = offset.saturating_add(limit).min(self.size);
        let results = (offset + 1..=end)
            .map(|id| resource(name_of(id), format!("{API_BASE}/pokemon/{id}/")))
            .collect();
        Ok(PageResponse {
            count: self.size,
            results,
        })
    }

    async fn pokemon(&self, key: &LookupKey) -> Result<PokemonResponse> {
        self.log.lock().pokemon.push(key.to_string());
        if let Some((name, form_id, species_id)) = self.form(key) {
            return Ok(form_response(name, form_id, species_id));
        }
        let id = self
            .resolve(key)
            .ok_or_else(|| PokedexError::NotFound(key.to_string()))?;
        if self.failing.contains(&id) {
            return Err(PokedexError::Api(format!("{key}: status 500")));
        }
        Ok(pokemon_response(id))
    }

    async fn species(&self, id: u32) -> Result<SpeciesResponse> {
        self.log.lock().species.push(id);
        if self.broken_species {
            return Err(PokedexError::Api("species unavailable (status 503)".to_string()));
        }
        if !(1..=self.size).contains(&id) {
            return Err(PokedexError::NotFound(format!("#{id}")));
        }
        Ok(species_response(id))
    }

    async fn species_at(&self, url: &str) -> Result<SpeciesResponse> {
        let id = id_from_url(url)?;
        self.species(id).await
    }

    async fn evolution_chain(&self, url: &str) -> Result<EvolutionChainResponse> {
        self.log.lock().chains.push(url.to_string());
        let chain = id_from_url(url)?;
        let first = (chain - 1) * 3 + 1;
        let last = (first + 2).min(self.size);
        if first > self.size {
            return Err(PokedexError::NotFound(url.to_string()));
        }

        let mut link = ChainLink {
            species: resource(name_of(last), species_url(last)),
            evolves_to: Vec::new(),
        };
        for id in (first..last).rev() {
            link = ChainLink {
                species: resource(name_of(id), species_url(id)),
                evolves_to: vec![link],
            };
        }
        Ok(EvolutionChainResponse { chain: link })
    }
}

pub fn limits(page_size: u32, max_count: u32) -> FetchLimits {
    FetchLimits {
        page_size,
        max_count,
        batch_concurrency: 8,
    }
}

pub fn pokedex_binary() -> &'static str {
    env!("CARGO_BIN_EXE_pokedex")
}

/// Runs the binary with its config file inside a temp directory
pub struct PokedexTest {
    pub temp_dir: TempDir,
}

impl PokedexTest {
    pub fn new() -> Self {
        PokedexTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("Failed to write config");
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(pokedex_binary())
            .args(args)
            .env("POKEDEX_CONFIG", self.config_path())
            .env_remove("POKEDEX_API_URL")
            .env_remove("POKEDEX_PAGE_SIZE")
            .env("NO_COLOR", "1")
            .current_dir(self.temp_dir.path())
            .output()
            .expect("Failed to execute pokedex command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if output.status.success() {
            panic!(
                "Command {:?} should have failed\nstdout: {}",
                args,
                String::from_utf8_lossy(&output.stdout)
            );
        }
        String::from_utf8_lossy(&output.stderr).into_owned()
    }
}
