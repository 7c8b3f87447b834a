//! Detail view state and in-view navigation.
//!
//! A `DetailView` remembers the detail it was opened with. Navigation
//! replaces the working detail by fetching neighbours or evolution stages
//! directly; closing discards all of that and restores the original.

use serde::{Deserialize, Serialize};

use crate::api::{CatalogSource, LookupKey};
use crate::error::Result;
use crate::types::Pokemon;

use super::{PokemonDetail, load_detail};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Neighbouring id, or `None` below id 1
    pub fn step(self, id: u32) -> Option<u32> {
        match self {
            Direction::Previous => id.checked_sub(1).filter(|&prev| prev >= 1),
            Direction::Next => id.checked_add(1),
        }
    }
}

/// Keys the detail view reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKey {
    Left,
    Right,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Navigate(Direction),
    Close,
}

/// Map a key press to a detail action. Left is suppressed at id 1.
pub fn key_to_action(key: DetailKey, current_id: u32) -> Option<DetailAction> {
    match key {
        DetailKey::Left if current_id > 1 => Some(DetailAction::Navigate(Direction::Previous)),
        DetailKey::Left => None,
        DetailKey::Right => Some(DetailAction::Navigate(Direction::Next)),
        DetailKey::Escape => Some(DetailAction::Close),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    origin: PokemonDetail,
    working: PokemonDetail,
    open: bool,
    /// A navigation fetch is in flight
    pub navigation_loading: bool,
    /// Last navigation failure, cleared by the next successful load
    pub error: Option<String>,
}

impl DetailView {
    pub fn new(detail: PokemonDetail) -> Self {
        Self {
            origin: detail.clone(),
            working: detail,
            open: true,
            navigation_loading: false,
            error: None,
        }
    }

    /// The detail the view was opened with
    pub fn origin(&self) -> &PokemonDetail {
        &self.origin
    }

    /// The detail currently shown
    pub fn working(&self) -> &PokemonDetail {
        &self.working
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Id to fetch for a navigation step, if the step is allowed
    pub fn target(&self, direction: Direction) -> Option<u32> {
        direction.step(self.working.id)
    }

    /// Id to fetch for an evolution jump; `None` when already shown
    pub fn evolution_target(&self, id: u32) -> Option<u32> {
        (id != self.working.id).then_some(id)
    }

    pub fn replace(&mut self, detail: PokemonDetail) {
        self.working = detail;
        self.error = None;
    }

    /// Restore the original detail and close
    pub fn close(&mut self) {
        self.working = self.origin.clone();
        self.open = false;
        self.navigation_loading = false;
        self.error = None;
    }
}

/// Fetches on behalf of a detail view
pub struct DetailController<'a, S> {
    source: &'a S,
    image_base: &'a str,
}

impl<'a, S: CatalogSource> DetailController<'a, S> {
    pub fn new(source: &'a S, image_base: &'a str) -> Self {
        Self { source, image_base }
    }

    /// Open a view seeded with `record`, then load the extended fields.
    ///
    /// If the extended fetch fails the view still opens with the seed and
    /// the error recorded.
    pub async fn open(&self, record: &Pokemon) -> DetailView {
        match load_detail(self.source, &LookupKey::Id(record.id), self.image_base).await {
            Ok(detail) => DetailView::new(detail),
            Err(e) => {
                tracing::warn!("failed to load detail for #{}: {}", record.id, e);
                let mut view = DetailView::new(PokemonDetail::seed(record, self.image_base));
                view.error = Some(e.to_string());
                view
            }
        }
    }

    /// Open a view for a creature not yet in the store.
    ///
    /// Unlike `open`, a failed detail fetch is returned so the caller can
    /// tell a missing creature from a transport failure.
    pub async fn load(&self, key: &LookupKey) -> Result<DetailView> {
        let detail = load_detail(self.source, key, self.image_base).await?;
        Ok(DetailView::new(detail))
    }

    /// Step to the neighbouring id. Returns false when the step is guarded
    /// and nothing was fetched.
    pub async fn navigate(&self, view: &mut DetailView, direction: Direction) -> bool {
        match view.target(direction) {
            Some(id) => {
                self.load_into(view, id).await;
                true
            }
            None => false,
        }
    }

    /// Show an evolution stage. No-op when it is already shown.
    pub async fn jump_to_evolution(&self, view: &mut DetailView, target: u32) -> bool {
        match view.evolution_target(target) {
            Some(id) => {
                self.load_into(view, id).await;
                true
            }
            None => false,
        }
    }

    async fn load_into(&self, view: &mut DetailView, id: u32) {
        view.navigation_loading = true;

        match load_detail(self.source, &LookupKey::Id(id), self.image_base).await {
            Ok(detail) => view.replace(detail),
            Err(e) if e.is_not_found() => {
                tracing::info!("no creature with id {}", id);
                view.error = Some(e.to_string());
            }
            Err(e) => {
                tracing::warn!("failed to navigate to #{}: {}", id, e);
                view.error = Some(e.to_string());
            }
        }

        view.navigation_loading = false;
    }
}
