#[macro_use]
mod macros;

pub mod api;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod detail;
pub mod display;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod query;
pub mod store;
pub mod types;

pub use api::{CatalogSource, LookupKey, PokeApiClient};
pub use app::{AppState, Command, DisplayStatus, Event, Session, ViewModel, compute_view_model, reduce};
pub use config::Config;
pub use detail::{DetailController, DetailView, Direction, PokemonDetail, load_detail};
pub use error::{PokedexError, Result};
pub use fetch::{BatchReport, FetchCoordinator, FetchLimits, ItemFailure};
pub use loader::{LoadMore, SentinelWatch, TriggerContext, on_trigger};
pub use query::{FilterSpec, SortDirection, SortField, SortSpec};
pub use store::{MergeStats, RecordStore};
pub use types::Pokemon;
