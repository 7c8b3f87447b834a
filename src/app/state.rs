//! Application state and its pure transitions.
//!
//! `AppState` holds everything the list and detail views depend on. It only
//! changes through `reduce`, which applies one `Event` and performs no I/O.
//! The async half lives in `Session`, which turns `Command`s into fetches and
//! feeds the outcomes back in as events.

use crate::api::LookupKey;
use crate::detail::{DetailKey, DetailView, Direction};
use crate::fetch::{
    BatchReport, BatchSummary, DescendingCursor, FetchLimits, ForwardCursor, PageRequest,
    merge_into_store,
};
use crate::loader::TriggerContext;
use crate::query::{FilterSpec, SortDirection};
use crate::store::RecordStore;
use crate::types::Pokemon;

/// User intents
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch whatever the current filter needs to show its first screen
    LoadInitial,
    /// The load-more sentinel fired
    RequestPage,
    ApplyFilter(FilterSpec),
    /// Clear criteria and the store, then reload the first page
    ResetFilters,
    OpenDetail(LookupKey),
    CloseDetail,
    NavigateDetail(Direction),
    JumpToEvolution(u32),
    DetailKey(DetailKey),
}

/// Outcomes fed to `reduce`
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LoadStarted,
    PageLoaded {
        page: PageRequest,
        direction: SortDirection,
        report: BatchReport,
    },
    PageFailed(String),
    CatalogLoaded(BatchReport),
    CatalogFailed(String),
    WindowExpanded(usize),
    FilterApplied(FilterSpec),
    FiltersReset,
    SearchStarted,
    SearchResolved(Pokemon),
    SearchNotFound(String),
    SearchFailed(String),
    RecordFetched(Pokemon),
    DetailOpened(DetailView),
    DetailNotFound(String),
    DetailFailed(String),
    DetailClosed,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub filter: FilterSpec,
    pub forward: ForwardCursor,
    pub descending: DescendingCursor,
    /// Records exposed while sorting by name without a filter
    pub visible: usize,
    pub loading: bool,
    pub search_loading: bool,
    /// Search term the upstream reported as unknown
    pub not_found: Option<String>,
    pub last_error: Option<String>,
    pub last_batch: Option<BatchSummary>,
    pub detail: Option<DetailView>,
    pub limits: FetchLimits,
}

impl AppState {
    pub fn new(limits: FetchLimits) -> Self {
        Self {
            store: RecordStore::new(),
            filter: FilterSpec::default(),
            forward: ForwardCursor::new(),
            descending: DescendingCursor::new(limits.max_count),
            visible: limits.page_size as usize,
            loading: false,
            search_loading: false,
            not_found: None,
            last_error: None,
            last_batch: None,
            detail: None,
            limits,
        }
    }

    pub fn navigation_loading(&self) -> bool {
        self.detail.as_ref().is_some_and(|d| d.navigation_loading)
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.search_loading || self.navigation_loading()
    }

    pub fn trigger_context(&self) -> TriggerContext {
        TriggerContext {
            loading: self.loading,
            filter_active: self.filter.is_active(),
            sort: self.filter.sort,
            forward: self.forward,
            descending: self.descending,
            visible: self.visible,
            resident: self.store.len(),
        }
    }

    /// No page has been requested yet for the current browse direction
    pub fn window_is_empty(&self) -> bool {
        match self.filter.sort.direction {
            SortDirection::Ascending => self.forward.covered() == 0,
            SortDirection::Descending => self.descending.floor() >= self.limits.max_count,
        }
    }

    /// Whether `id` lies in the contiguous range the active cursor covers
    pub fn in_browse_window(&self, id: u32) -> bool {
        match self.filter.sort.direction {
            SortDirection::Ascending => id >= 1 && id <= self.forward.covered(),
            SortDirection::Descending => {
                id > self.descending.floor() && id <= self.limits.max_count
            }
        }
    }

    /// Every catalog id is resident
    pub fn has_full_catalog(&self) -> bool {
        self.store.count_in_range(self.limits.max_count) >= self.limits.max_count as usize
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FetchLimits::default())
    }
}

fn record_batch(state: &mut AppState, report: BatchReport) {
    let summary = report.summary();
    merge_into_store(&mut state.store, report.records);
    if summary.requested > 0 {
        state.last_batch = Some(summary);
    }
}

/// Apply one event to the state (reducer pattern)
pub fn reduce(mut state: AppState, event: Event) -> AppState {
    match event {
        Event::LoadStarted => {
            state.loading = true;
            state.last_error = None;
        }
        Event::PageLoaded {
            page,
            direction,
            report,
        } => {
            state.loading = false;
            match direction {
                SortDirection::Ascending => state.forward.advance(page),
                SortDirection::Descending => state.descending.advance(page),
            }
            record_batch(&mut state, report);
        }
        Event::PageFailed(error) | Event::CatalogFailed(error) => {
            state.loading = false;
            state.last_error = Some(error);
        }
        Event::CatalogLoaded(report) => {
            state.loading = false;
            record_batch(&mut state, report);
        }
        Event::WindowExpanded(visible) => {
            state.visible = visible;
        }
        Event::FilterApplied(filter) => {
            state.filter = filter;
            state.visible = state.limits.page_size as usize;
            state.not_found = None;
        }
        Event::FiltersReset => {
            let limits = state.limits;
            let detail = state.detail.take();
            state = AppState::new(limits);
            state.detail = detail;
        }
        Event::SearchStarted => {
            state.search_loading = true;
            state.not_found = None;
        }
        Event::SearchResolved(record) => {
            state.search_loading = false;
            merge_into_store(&mut state.store, vec![record]);
        }
        Event::SearchNotFound(term) => {
            state.search_loading = false;
            state.not_found = Some(term);
        }
        Event::SearchFailed(error) => {
            state.search_loading = false;
            state.last_error = Some(error);
        }
        Event::RecordFetched(record) => {
            merge_into_store(&mut state.store, vec![record]);
        }
        Event::DetailOpened(view) => {
            state.detail = Some(view);
        }
        Event::DetailNotFound(target) => {
            state.not_found = Some(target);
        }
        Event::DetailFailed(error) => {
            state.last_error = Some(error);
        }
        Event::DetailClosed => {
            if let Some(view) = state.detail.as_mut() {
                view.close();
            }
        }
    }
    state
}
