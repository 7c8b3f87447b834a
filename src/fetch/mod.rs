//! Fetch coordinator.
//!
//! Retrieves pages and single records from a `CatalogSource` and turns them
//! into store records. Page items are resolved as an explicit fan-out: every
//! item's detail and species requests run concurrently, each item yields its
//! own success or failure, and the successes are ordered by id before they
//! reach the store so completion order never matters.

pub mod cursor;

use futures::FutureExt;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::api::{
    CatalogSource, LookupKey, NamedResource, PokemonResponse, SpeciesResponse, generation_of,
    id_from_url,
};
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::store::{MergeStats, RecordStore};
use crate::types::Pokemon;

pub use cursor::{DescendingCursor, ForwardCursor, PageRequest};

/// Pagination and batching limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    pub page_size: u32,
    pub max_count: u32,
    pub batch_concurrency: usize,
}

impl FetchLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            max_count: config.max_count,
            batch_concurrency: config.batch_concurrency,
        }
    }
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A record that could not be resolved within a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    pub id: Option<u32>,
    pub name: String,
    pub error: String,
}

/// Outcome of a batch: the resolved records plus per-item failures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Resolved records ordered by id
    pub records: Vec<Pokemon>,
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty() && !self.records.is_empty()
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            requested: self.records.len() + self.failures.len(),
            loaded: self.records.len(),
            failed: self.failures.len(),
        }
    }

    fn extend(&mut self, other: BatchReport) {
        self.records.extend(other.records);
        self.failures.extend(other.failures);
        self.records.sort_by_key(|p| p.id);
    }
}

/// Counts from the most recent batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub requested: usize,
    pub loaded: usize,
    pub failed: usize,
}

/// Build a store record from the detail and species sub-resources
pub fn build_record(detail: &PokemonResponse, species: &SpeciesResponse) -> Result<Pokemon> {
    Ok(Pokemon {
        id: detail.id,
        name: detail.name.clone(),
        types: detail.type_names(),
        generation: Some(generation_of(species)?),
        games: detail.game_names(),
    })
}

/// Species id referenced by a detail response
fn species_id_of(detail: &PokemonResponse) -> Result<u32> {
    id_from_url(&detail.species.url)
}

/// Append records whose id is not yet stored
pub fn merge_into_store(store: &mut RecordStore, records: Vec<Pokemon>) -> MergeStats {
    let stats = store.merge(records);
    tracing::debug!(
        "merged {} new, {} completed, {} skipped; store holds {}",
        stats.added,
        stats.completed,
        stats.skipped,
        store.len()
    );
    stats
}

/// Issues page and record fetches against a catalog source
pub struct FetchCoordinator<'a, S> {
    source: &'a S,
    limits: FetchLimits,
}

impl<'a, S: CatalogSource> FetchCoordinator<'a, S> {
    pub fn new(source: &'a S, limits: FetchLimits) -> Self {
        Self { source, limits }
    }

    pub fn limits(&self) -> FetchLimits {
        self.limits
    }

    /// Fetch one page of summaries and resolve every item concurrently.
    ///
    /// Fails only if the summary list itself cannot be fetched. Item
    /// failures are logged and reported, never retried.
    pub async fn fetch_page(&self, page: PageRequest) -> Result<BatchReport> {
        let listing = self.source.list(page.offset, page.limit).await?;
        let report = self.resolve_all(&listing.results).await;

        tracing::info!(
            "page offset={} limit={}: {} loaded, {} failed",
            page.offset,
            page.limit,
            report.records.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Resolve a single record directly by id or name.
    ///
    /// An unknown id or name yields `PokedexError::NotFound`.
    pub async fn fetch_one(&self, key: &LookupKey) -> Result<Pokemon> {
        let detail = self.source.pokemon(key).await?;
        let species = self.source.species_at(&detail.species.url).await?;
        build_record(&detail, &species)
    }

    /// Fetch detail and species for one id in parallel.
    ///
    /// The species is requested by the same id. Alternate forms carry a
    /// different species id; for those the species referenced by the detail
    /// is fetched afterwards.
    pub async fn fetch_record(&self, id: u32) -> Result<Pokemon> {
        let key = LookupKey::Id(id);
        let (detail, species) = futures::try_join!(
            self.source.pokemon(&key),
            self.source.species(id).map(Ok::<_, PokedexError>)
        )?;

        let species = match species {
            Ok(species) if species.id == species_id_of(&detail)? => species,
            Err(e) if !e.is_not_found() => return Err(e),
            _ => self.source.species_at(&detail.species.url).await?,
        };
        build_record(&detail, &species)
    }

    /// Fetch every catalog record missing from `store`.
    ///
    /// Lists the whole catalog in one request, then resolves missing ids in
    /// waves of `batch_concurrency` lookups.
    pub async fn fetch_all(&self, store: &RecordStore) -> Result<BatchReport> {
        let listing = self.source.list(0, self.limits.max_count).await?;

        let missing: Vec<&NamedResource> = listing
            .results
            .iter()
            .filter(|summary| match id_from_url(&summary.url) {
                Ok(id) => !store.contains(id),
                Err(_) => true,
            })
            .collect();

        tracing::info!(
            "full catalog fetch: {} listed, {} missing",
            listing.results.len(),
            missing.len()
        );

        let mut report = BatchReport::default();
        for wave in missing.chunks(self.limits.batch_concurrency.max(1)) {
            let wave: Vec<NamedResource> = wave.iter().map(|s| (*s).clone()).collect();
            report.extend(self.resolve_all(&wave).await);
        }
        Ok(report)
    }

    /// Fan out over summaries, fan in per-item results
    async fn resolve_all(&self, summaries: &[NamedResource]) -> BatchReport {
        let results = join_all(summaries.iter().map(|s| self.resolve_summary(s))).await;

        let mut report = BatchReport::default();
        for result in results {
            match result {
                Ok(record) => report.records.push(record),
                Err(failure) => {
                    tracing::warn!(
                        "failed to fetch {} ({}): {}",
                        failure.name,
                        failure
                            .id
                            .map(|id| format!("#{id}"))
                            .unwrap_or_else(|| "no id".to_string()),
                        failure.error
                    );
                    report.failures.push(failure);
                }
            }
        }
        report.records.sort_by_key(|p| p.id);
        report
    }

    async fn resolve_summary(
        &self,
        summary: &NamedResource,
    ) -> std::result::Result<Pokemon, ItemFailure> {
        let id = id_from_url(&summary.url).map_err(|e| ItemFailure {
            id: None,
            name: summary.name.clone(),
            error: e.to_string(),
        })?;

        self.fetch_record(id).await.map_err(|e| ItemFailure {
            id: Some(id),
            name: summary.name.clone(),
            error: e.to_string(),
        })
    }
}
