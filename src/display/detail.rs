use owo_colors::{OwoColorize, Stream};

use crate::detail::PokemonDetail;

use super::{format_id, paint_type};

const STAT_BAR_WIDTH: usize = 20;

/// Fixed-width bar for a fill ratio in `[0, 1]`
pub fn stat_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn heading(label: &str) -> String {
    label
        .if_supports_color(Stream::Stdout, |t| t.bold())
        .to_string()
}

/// Multi-line detail view
pub fn format_detail(detail: &PokemonDetail) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        format_id(detail.id).if_supports_color(Stream::Stdout, |t| t.cyan()),
        detail.name.if_supports_color(Stream::Stdout, |t| t.bold())
    ));
    if !detail.category.is_empty() {
        out.push_str(&format!("{}\n", detail.category));
    }

    let types: Vec<String> = detail.types.iter().map(|t| paint_type(t)).collect();
    out.push_str(&format!("Types: {}\n", types.join(", ")));
    if let Some(generation) = detail.generation {
        out.push_str(&format!("Generation: {generation}\n"));
    }
    out.push_str(&format!(
        "Height: {:.1} m  Weight: {:.1} kg\n",
        detail.height_m, detail.weight_kg
    ));
    out.push_str(&format!("Habitat: {}\n", detail.habitat));
    if let Some(color) = &detail.color {
        out.push_str(&format!("Color: {color}\n"));
    }
    out.push_str(&format!("Image: {}\n", detail.image_url));
    if let Some(cry) = &detail.cry_url {
        out.push_str(&format!("Cry: {cry}\n"));
    }

    out.push_str(&format!("\n{}\n", detail.description));

    if !detail.stats.is_empty() {
        out.push_str(&format!("\n{}\n", heading("Stats")));
        for stat in &detail.stats {
            out.push_str(&format!(
                "  {:<16} {:>3} {}\n",
                stat.name,
                stat.base,
                stat_bar(stat.ratio(), STAT_BAR_WIDTH)
            ));
        }
    }

    if !detail.abilities.is_empty() {
        out.push_str(&format!("\n{}\n", heading("Abilities")));
        for ability in &detail.abilities {
            let hidden = if ability.hidden { " (hidden)" } else { "" };
            out.push_str(&format!("  {}{}\n", ability.name, hidden));
        }
    }

    if !detail.weaknesses.is_empty() {
        let weaknesses: Vec<String> = detail.weaknesses.iter().map(|w| paint_type(w)).collect();
        out.push_str(&format!(
            "\n{} {}\n",
            heading("Weaknesses:"),
            weaknesses.join(", ")
        ));
    }

    if !detail.evolution.is_empty() {
        let stages: Vec<String> = detail
            .evolution
            .iter()
            .map(|s| format!("{} {}", format_id(s.id), s.name))
            .collect();
        out.push_str(&format!(
            "\n{} {}\n",
            heading("Evolution:"),
            stages.join(" -> ")
        ));
    }

    out
}
