use owo_colors::OwoColorize;

use super::{open_session, print_json};
use crate::api::CatalogSource;
use crate::app::{Command, DisplayStatus, Session, ViewModel};
use crate::config::Config;
use crate::display::list_table;
use crate::error::{PokedexError, Result};
use crate::query::{FilterSpec, SortDirection, SortField, SortSpec};

/// Options for `pokedex list`
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    pub types: Vec<String>,
    pub generations: Vec<u8>,
    pub games: Vec<String>,
    pub sort: SortField,
    pub descending: bool,
    /// Number of pages to show; each page past the first is one load-more trigger
    pub pages: u32,
    pub json: bool,
}

impl ListOptions {
    pub fn filter_spec(&self) -> FilterSpec {
        let direction = if self.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        FilterSpec {
            search_term: self.search.clone().unwrap_or_default(),
            types: self.types.clone(),
            generations: self.generations.clone(),
            games: self.games.clone(),
            sort: SortSpec::new(self.sort, direction),
        }
    }
}

/// Apply the options to a session and scroll `pages - 1` times
pub async fn run_list<S: CatalogSource>(
    session: &mut Session<S>,
    options: &ListOptions,
) -> ViewModel {
    session
        .dispatch(Command::ApplyFilter(options.filter_spec()))
        .await;

    for _ in 1..options.pages.max(1) {
        if !session.sentinel_visible().await {
            break;
        }
    }

    session.view_model()
}

/// List creatures
pub async fn cmd_list(options: ListOptions) -> Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;
    let vm = run_list(&mut session, &options).await;

    if let Some(batch) = vm.last_batch
        && batch.failed > 0
    {
        eprintln!(
            "{} {} of {} records failed to load",
            "warning:".yellow(),
            batch.failed,
            batch.requested
        );
    }

    if vm.items.is_empty()
        && let Some(error) = &session.state().last_error
    {
        return Err(PokedexError::Api(error.clone()));
    }

    if options.json {
        return print_json(&vm);
    }

    match &vm.status {
        DisplayStatus::Items | DisplayStatus::Loading => println!("{}", list_table(&vm.items)),
        DisplayStatus::NoMatches => println!("No Pokémon found matching your filters"),
        DisplayStatus::NotFound(term) => println!("No Pokémon named '{term}' exists"),
    }

    if vm.can_load_more && !vm.items.is_empty() {
        eprintln!(
            "{}",
            format!("{} shown; use --pages to load more", vm.items.len()).dimmed()
        );
    }

    Ok(())
}
