//! Static catalog tables: type names, generations, game titles, and the
//! type weakness chart used by the detail view.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{PokedexError, Result};

pub const POKEMON_TYPES: &[&str] = &[
    "normal", "fighting", "flying", "poison", "ground", "rock", "bug", "ghost", "steel", "fire",
    "water", "grass", "electric", "psychic", "ice", "dragon", "dark", "fairy",
];

pub const GENERATIONS: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9];

pub const GAMES: &[&str] = &[
    "red",
    "blue",
    "yellow",
    "gold",
    "silver",
    "crystal",
    "ruby",
    "sapphire",
    "emerald",
    "firered",
    "leafgreen",
    "diamond",
    "pearl",
    "platinum",
    "heartgold",
    "soulsilver",
    "black",
    "white",
    "black-2",
    "white-2",
    "x",
    "y",
    "omega-ruby",
    "alpha-sapphire",
    "sun",
    "moon",
    "ultra-sun",
    "ultra-moon",
    "lets-go-pikachu",
    "lets-go-eevee",
    "sword",
    "shield",
    "brilliant-diamond",
    "shining-pearl",
    "legends-arceus",
    "scarlet",
    "violet",
];

static TYPE_WEAKNESSES: LazyLock<HashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    HashMap::from([
        ("normal", &["fighting"][..]),
        ("fire", &["water", "ground", "rock"][..]),
        ("water", &["electric", "grass"][..]),
        ("grass", &["fire", "ice", "poison", "flying", "bug"][..]),
        ("electric", &["ground"][..]),
        ("ice", &["fire", "fighting", "rock", "steel"][..]),
        ("fighting", &["flying", "psychic", "fairy"][..]),
        ("poison", &["ground", "psychic"][..]),
        ("ground", &["water", "grass", "ice"][..]),
        ("flying", &["electric", "ice", "rock"][..]),
        ("psychic", &["bug", "ghost", "dark"][..]),
        ("bug", &["fire", "flying", "rock"][..]),
        ("rock", &["water", "grass", "fighting", "ground", "steel"][..]),
        ("ghost", &["ghost", "dark"][..]),
        ("dragon", &["ice", "dragon", "fairy"][..]),
        ("dark", &["fighting", "bug", "fairy"][..]),
        ("steel", &["fire", "fighting", "ground"][..]),
        ("fairy", &["poison", "steel"][..]),
    ])
});

/// Weaknesses of a single type. Unknown types have none.
pub fn weaknesses_of(type_name: &str) -> &'static [&'static str] {
    TYPE_WEAKNESSES.get(type_name).copied().unwrap_or(&[])
}

/// Union of the weaknesses of every given type, deduplicated, in first-seen order.
pub fn weaknesses_for<S: AsRef<str>>(types: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in types {
        for weakness in weaknesses_of(t.as_ref()) {
            if !out.iter().any(|w| w == weakness) {
                out.push((*weakness).to_string());
            }
        }
    }
    out
}

pub fn parse_type(s: &str) -> Result<String> {
    let normalized = s.trim().to_lowercase();
    if POKEMON_TYPES.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(PokedexError::InvalidType(s.to_string()))
    }
}

pub fn parse_generation(s: &str) -> Result<u8> {
    s.trim()
        .parse::<u8>()
        .ok()
        .filter(|g| GENERATIONS.contains(g))
        .ok_or_else(|| PokedexError::InvalidGeneration(s.to_string()))
}

pub fn parse_game(s: &str) -> Result<String> {
    let normalized = s.trim().to_lowercase();
    if GAMES.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(PokedexError::InvalidGame(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_weakness_entry() {
        for t in POKEMON_TYPES {
            assert!(!weaknesses_of(t).is_empty(), "missing weaknesses for {t}");
        }
    }

    #[test]
    fn test_weaknesses_union_is_deduplicated() {
        // grass: fire ice poison flying bug; poison: ground psychic
        let w = weaknesses_for(&["grass", "poison"]);
        assert_eq!(
            w,
            vec!["fire", "ice", "poison", "flying", "bug", "ground", "psychic"]
        );

        // ground is listed by both
        let w = weaknesses_for(&["fire", "steel"]);
        assert_eq!(w, vec!["water", "ground", "rock", "fire", "fighting"]);
    }

    #[test]
    fn test_unknown_type_has_no_weaknesses() {
        assert!(weaknesses_for(&["shadow"]).is_empty());
        assert!(weaknesses_for::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(parse_type("Fire").unwrap(), "fire");
        assert!(parse_type("plasma").is_err());
        assert_eq!(parse_generation("9").unwrap(), 9);
        assert!(parse_generation("0").is_err());
        assert!(parse_generation("10").is_err());
        assert!(parse_generation("one").is_err());
        assert_eq!(parse_game("Black-2").unwrap(), "black-2");
        assert!(parse_game("stadium").is_err());
    }
}
