//! View model derived from `AppState`.

use serde::Serialize;

use crate::detail::PokemonDetail;
use crate::fetch::BatchSummary;
use crate::loader::{LoadMore, on_trigger};
use crate::query::{self, SortField};
use crate::types::Pokemon;

use super::state::AppState;

/// What the list area should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "term", rename_all = "snake_case")]
pub enum DisplayStatus {
    Items,
    Loading,
    /// Filters are active but nothing matches
    NoMatches,
    /// A direct lookup for this term does not exist upstream
    NotFound(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub items: Vec<Pokemon>,
    pub status: DisplayStatus,
    pub loading: bool,
    pub search_loading: bool,
    pub navigation_loading: bool,
    /// Records resident in the store, displayed or not
    pub resident: usize,
    pub can_load_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_found: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_batch: Option<BatchSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<PokemonDetail>,
}

/// Ordered records to display for the current state.
///
/// With a filter active every match is shown. Browsing by id shows only the
/// contiguous range the active cursor covers; browsing by name shows the
/// first `visible` records.
pub fn display_list(state: &AppState) -> Vec<&Pokemon> {
    let matched = query::apply(state.store.records(), &state.filter);
    if state.filter.is_active() {
        return matched;
    }

    match state.filter.sort.field {
        SortField::Id => matched
            .into_iter()
            .filter(|p| state.in_browse_window(p.id))
            .collect(),
        SortField::Name => matched.into_iter().take(state.visible).collect(),
    }
}

fn display_status(state: &AppState, shown: usize) -> DisplayStatus {
    if shown > 0 {
        DisplayStatus::Items
    } else if state.loading || state.search_loading {
        DisplayStatus::Loading
    } else if let Some(term) = &state.not_found {
        DisplayStatus::NotFound(term.clone())
    } else {
        DisplayStatus::NoMatches
    }
}

/// Pure function: compute the view model from state
pub fn compute_view_model(state: &AppState) -> ViewModel {
    let items: Vec<Pokemon> = display_list(state).into_iter().cloned().collect();
    let status = display_status(state, items.len());

    let mut idle = state.trigger_context();
    idle.loading = false;
    let can_load_more = on_trigger(&idle, state.limits) != LoadMore::Noop;

    ViewModel {
        status,
        loading: state.loading,
        search_loading: state.search_loading,
        navigation_loading: state.navigation_loading(),
        resident: state.store.len(),
        can_load_more,
        not_found: state.not_found.clone(),
        last_batch: state.last_batch,
        detail: state
            .detail
            .as_ref()
            .filter(|d| d.is_open())
            .map(|d| d.working().clone()),
        items,
    }
}
