//! Terminal output for records and detail views.

use owo_colors::{AnsiColors, OwoColorize, Stream};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::types::Pokemon;

pub mod detail;

pub use detail::{format_detail, stat_bar};

/// Terminal color for a type badge
pub fn type_color(type_name: &str) -> AnsiColors {
    match type_name {
        "fire" | "fighting" => AnsiColors::Red,
        "water" | "dragon" => AnsiColors::Blue,
        "grass" | "bug" => AnsiColors::Green,
        "electric" | "ground" | "rock" => AnsiColors::Yellow,
        "ice" | "flying" => AnsiColors::BrightCyan,
        "poison" | "ghost" => AnsiColors::Magenta,
        "psychic" | "fairy" => AnsiColors::BrightMagenta,
        "dark" => AnsiColors::BrightBlack,
        "steel" | "normal" => AnsiColors::White,
        _ => AnsiColors::Default,
    }
}

/// Type name colored when stdout supports it
pub fn paint_type(type_name: &str) -> String {
    let color = type_color(type_name);
    type_name
        .if_supports_color(Stream::Stdout, |t| t.color(color))
        .to_string()
}

/// `#025` style id
pub fn format_id(id: u32) -> String {
    format!("#{id:03}")
}

#[derive(Tabled)]
struct PokemonRow {
    #[tabled(rename = "#")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Types")]
    types: String,
    #[tabled(rename = "Gen")]
    generation: String,
}

/// Records as a plain table
pub fn list_table(records: &[Pokemon]) -> String {
    let rows = records.iter().map(|p| PokemonRow {
        id: format_id(p.id),
        name: p.name.clone(),
        types: p.types.join("/"),
        generation: p.generation.map(|g| g.to_string()).unwrap_or_default(),
    });
    Table::new(rows).with(Style::sharp()).to_string()
}
