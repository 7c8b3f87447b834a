//! Core catalog record types.

use serde::{Deserialize, Serialize};

/// One catalog entry as kept in the record store.
///
/// `generation` and `games` come from the species/detail pair. A record
/// without a generation is partial: it was built before the species
/// sub-resource was merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u8>,
    #[serde(default)]
    pub games: Vec<String>,
}

impl Pokemon {
    /// A record with only identity and types known.
    pub fn partial(id: u32, name: impl Into<String>, types: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            types,
            generation: None,
            games: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.generation.is_some()
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    pub fn appeared_in(&self, game: &str) -> bool {
        self.games.iter().any(|g| g == game)
    }

    /// Fill in species-derived fields from a complete copy of the same record.
    ///
    /// Returns true if anything changed. Identity, name and types are never
    /// overwritten.
    pub fn absorb(&mut self, other: &Pokemon) -> bool {
        if self.id != other.id || self.is_complete() || !other.is_complete() {
            return false;
        }
        self.generation = other.generation;
        self.games = other.games.clone();
        true
    }
}

/// Image URL for a creature: zero-padded id under the artwork base URL.
pub fn image_url(base: &str, id: u32) -> String {
    format!("{base}{id:03}.png")
}
