use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::str::FromStr;

use crate::catalog::{
    GAMES, GENERATIONS, POKEMON_TYPES, parse_game, parse_generation, parse_type,
};
use crate::query::SortField;

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse the Pokémon catalog from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List creatures, optionally filtered and sorted
    #[command(visible_alias = "ls")]
    List {
        /// Name substring or exact id
        #[arg(short, long)]
        search: Option<String>,

        /// Keep creatures having any of these types (repeatable)
        #[arg(short = 't', long = "type", value_parser = parse_type_arg)]
        types: Vec<String>,

        /// Keep creatures introduced in any of these generations (repeatable)
        #[arg(short, long = "generation", value_parser = parse_generation_arg)]
        generations: Vec<u8>,

        /// Keep creatures that appeared in any of these games (repeatable)
        #[arg(long = "game", value_parser = parse_game_arg)]
        games: Vec<String>,

        /// Sort field: id or name
        #[arg(long, default_value = "id", value_parser = parse_sort_field)]
        sort: SortField,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Pages to load
        #[arg(short, long, default_value = "1")]
        pages: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one creature in detail
    #[command(visible_alias = "s")]
    Show {
        /// Id or name
        #[arg(value_parser = parse_lookup)]
        target: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the config file path
    Path,
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{ListOptions, cmd_config_path, cmd_config_show, cmd_list, cmd_show};

        match self {
            Commands::List {
                search,
                types,
                generations,
                games,
                sort,
                desc,
                pages,
                json,
            } => {
                cmd_list(ListOptions {
                    search,
                    types,
                    generations,
                    games,
                    sort,
                    descending: desc,
                    pages,
                    json,
                })
                .await
            }

            Commands::Show { target, json } => cmd_show(&target, json).await,

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Path => cmd_config_path(),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_type_arg(s: &str) -> Result<String, String> {
    parse_with_validation(
        s,
        |v| parse_type(v).map_err(|e| e.to_string()),
        "type",
        POKEMON_TYPES,
    )
}

fn parse_generation_arg(s: &str) -> Result<u8, String> {
    let valid: Vec<String> = GENERATIONS.iter().map(|g| g.to_string()).collect();
    let valid: Vec<&str> = valid.iter().map(String::as_str).collect();
    parse_with_validation(
        s,
        |v| parse_generation(v).map_err(|e| e.to_string()),
        "generation",
        &valid,
    )
}

fn parse_game_arg(s: &str) -> Result<String, String> {
    parse_with_validation(
        s,
        |v| parse_game(v).map_err(|e| e.to_string()),
        "game",
        GAMES,
    )
}

fn parse_sort_field(s: &str) -> Result<SortField, String> {
    parse_with_validation(
        s,
        |v| SortField::from_str(v).map_err(|e| e.to_string()),
        "sort field",
        SortField::ALL_STRINGS,
    )
}

fn parse_lookup(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Target cannot be empty".to_string());
    }
    Ok(s.trim().to_string())
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "pokedex", &mut io::stdout());
}
