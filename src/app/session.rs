//! Command execution.
//!
//! `Session` owns a catalog source and the application state. Each command
//! runs its fetches through the coordinator or the detail controller and
//! folds the outcome back into the state with `reduce`. Errors never escape
//! a command: they are logged and recorded in the state, and every loading
//! flag is cleared on the way out.

use crate::api::{CatalogSource, LookupKey};
use crate::config::Config;
use crate::detail::{DetailAction, DetailController, Direction, key_to_action};
use crate::fetch::{BatchReport, FetchCoordinator, FetchLimits, PageRequest};
use crate::loader::{LoadMore, SentinelWatch, on_trigger};
use crate::query::{SortDirection, SortField};

use super::state::{AppState, Command, Event, reduce};
use super::view::{ViewModel, compute_view_model};

pub struct Session<S> {
    source: S,
    state: AppState,
    image_base: String,
    watch: SentinelWatch,
}

impl<S: CatalogSource> Session<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self::with_limits(
            source,
            FetchLimits::from_config(config),
            config.image_base_url.clone(),
        )
    }

    pub fn with_limits(source: S, limits: FetchLimits, image_base: impl Into<String>) -> Self {
        Self {
            source,
            state: AppState::new(limits),
            image_base: image_base.into(),
            watch: SentinelWatch::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view_model(&self) -> ViewModel {
        compute_view_model(&self.state)
    }

    fn apply(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);
    }

    fn coordinator(&self) -> FetchCoordinator<'_, S> {
        FetchCoordinator::new(&self.source, self.state.limits)
    }

    pub async fn dispatch(&mut self, command: Command) {
        tracing::debug!("dispatch {:?}", command);

        match command {
            Command::LoadInitial => self.refresh().await,
            Command::RequestPage => self.load_more().await,
            Command::ApplyFilter(filter) => {
                self.apply(Event::FilterApplied(filter));
                self.refresh().await;
            }
            Command::ResetFilters => {
                self.apply(Event::FiltersReset);
                self.refresh().await;
            }
            Command::OpenDetail(key) => self.open_detail(key).await,
            Command::CloseDetail => self.apply(Event::DetailClosed),
            Command::NavigateDetail(direction) => self.navigate_detail(direction).await,
            Command::JumpToEvolution(id) => self.jump_to_evolution(id).await,
            Command::DetailKey(key) => {
                let Some(current) = self
                    .state
                    .detail
                    .as_ref()
                    .filter(|d| d.is_open())
                    .map(|d| d.working().id)
                else {
                    return;
                };
                match key_to_action(key, current) {
                    Some(DetailAction::Navigate(direction)) => {
                        self.navigate_detail(direction).await
                    }
                    Some(DetailAction::Close) => self.apply(Event::DetailClosed),
                    None => {}
                }
            }
        }
    }

    /// The load-more sentinel became visible. Returns true if it triggered.
    ///
    /// Repeated reports under unchanged conditions trigger once.
    pub async fn sentinel_visible(&mut self) -> bool {
        let key = self.state.trigger_context().key();
        if !self.watch.fire(key) {
            return false;
        }
        self.load_more().await;
        true
    }

    /// Fetch what the current filter needs before its output can be trusted
    async fn refresh(&mut self) {
        let filter = self.state.filter.clone();
        let needs_catalog = filter.needs_full_catalog() || filter.sort.field == SortField::Name;

        if needs_catalog && !self.state.has_full_catalog() {
            self.load_catalog().await;
        }

        if filter.is_search_only()
            && let Some(term) = filter.search()
        {
            self.search(term).await;
        }

        if !filter.is_active() && filter.sort.field == SortField::Id && self.state.window_is_empty()
        {
            self.load_more().await;
        }
    }

    async fn load_more(&mut self) {
        match on_trigger(&self.state.trigger_context(), self.state.limits) {
            LoadMore::Noop => {}
            LoadMore::FetchPage { page, direction } => self.request_page(page, direction).await,
            LoadMore::ExpandWindow { visible } => self.apply(Event::WindowExpanded(visible)),
        }
    }

    async fn request_page(&mut self, page: PageRequest, direction: SortDirection) {
        if (page.first_id()..=page.last_id()).all(|id| self.state.store.contains(id)) {
            tracing::debug!(
                "page offset={} limit={} already resident",
                page.offset,
                page.limit
            );
            self.apply(Event::PageLoaded {
                page,
                direction,
                report: BatchReport::default(),
            });
            return;
        }

        self.apply(Event::LoadStarted);
        let result = self.coordinator().fetch_page(page).await;
        match result {
            Ok(report) => self.apply(Event::PageLoaded {
                page,
                direction,
                report,
            }),
            Err(e) => {
                tracing::warn!(
                    "failed to fetch page offset={} limit={}: {}",
                    page.offset,
                    page.limit,
                    e
                );
                self.apply(Event::PageFailed(e.to_string()));
            }
        }
    }

    async fn load_catalog(&mut self) {
        self.apply(Event::LoadStarted);
        let result = self.coordinator().fetch_all(&self.state.store).await;
        match result {
            Ok(report) => self.apply(Event::CatalogLoaded(report)),
            Err(e) => {
                tracing::warn!("failed to fetch full catalog: {}", e);
                self.apply(Event::CatalogFailed(e.to_string()));
            }
        }
    }

    async fn search(&mut self, term: &str) {
        let key = match LookupKey::parse(term) {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("skipping direct lookup for '{}': {}", term, e);
                return;
            }
        };
        if self.state.store.lookup(&key).is_some() {
            return;
        }

        self.apply(Event::SearchStarted);
        let result = self.coordinator().fetch_one(&key).await;
        match result {
            Ok(record) => self.apply(Event::SearchResolved(record)),
            Err(e) if e.is_not_found() => {
                tracing::info!("'{}' not found upstream", term);
                self.apply(Event::SearchNotFound(term.to_string()));
            }
            Err(e) => {
                tracing::warn!("failed to find '{}': {}", term, e);
                self.apply(Event::SearchFailed(e.to_string()));
            }
        }
    }

    async fn open_detail(&mut self, key: LookupKey) {
        let record = match self.state.store.lookup(&key).cloned() {
            Some(record) => record,
            None => {
                let result = DetailController::new(&self.source, &self.image_base)
                    .load(&key)
                    .await;
                match result {
                    Ok(view) => {
                        self.apply(Event::RecordFetched(view.working().to_record()));
                        self.apply(Event::DetailOpened(view));
                        return;
                    }
                    Err(e) if e.is_not_found() => {
                        tracing::info!("cannot open {}: not found upstream", key);
                        self.apply(Event::DetailNotFound(key.to_string()));
                        return;
                    }
                    Err(e) => {
                        tracing::warn!("cannot open {}: {}", key, e);
                        self.apply(Event::DetailFailed(e.to_string()));
                        return;
                    }
                }
            }
        };

        let view = DetailController::new(&self.source, &self.image_base)
            .open(&record)
            .await;
        self.apply(Event::DetailOpened(view));
    }

    async fn navigate_detail(&mut self, direction: Direction) {
        let controller = DetailController::new(&self.source, &self.image_base);
        if let Some(view) = self.state.detail.as_mut().filter(|d| d.is_open()) {
            controller.navigate(view, direction).await;
        }
    }

    async fn jump_to_evolution(&mut self, id: u32) {
        let controller = DetailController::new(&self.source, &self.image_base);
        if let Some(view) = self.state.detail.as_mut().filter(|d| d.is_open()) {
            controller.jump_to_evolution(view, id).await;
        }
    }
}
