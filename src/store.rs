//! In-memory record store.
//!
//! Append-only collection of fetched records keyed by id. Records are kept in
//! arrival order; an id index guarantees at most one record per id.

use std::collections::HashMap;

use unicase::UniCase;

use crate::api::LookupKey;
use crate::types::Pokemon;

/// Counts from one merge call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Records whose id was not present before
    pub added: usize,
    /// Existing partial records completed by the merge
    pub completed: usize,
    /// Records dropped because the id was already present
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Pokemon>,
    index: HashMap<u32, usize>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: u32) -> Option<&Pokemon> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    /// Case-insensitive exact name lookup
    pub fn find_by_name(&self, name: &str) -> Option<&Pokemon> {
        let wanted = UniCase::new(name.trim());
        self.records
            .iter()
            .find(|p| UniCase::new(p.name.as_str()) == wanted)
    }

    pub fn lookup(&self, key: &LookupKey) -> Option<&Pokemon> {
        match key {
            LookupKey::Id(id) => self.get(*id),
            LookupKey::Name(name) => self.find_by_name(name),
        }
    }

    /// All records in arrival order
    pub fn records(&self) -> &[Pokemon] {
        &self.records
    }

    /// Number of records with ids in `1..=max`
    pub fn count_in_range(&self, max: u32) -> usize {
        self.index.keys().filter(|&&id| id >= 1 && id <= max).count()
    }

    /// Merge fetched records.
    ///
    /// New ids are appended. An existing partial record absorbs the
    /// species-derived fields of a complete record with the same id; any
    /// other duplicate is skipped. Input order decides arrival order, so
    /// callers sort batches by id first when completion order varies.
    pub fn merge<I>(&mut self, incoming: I) -> MergeStats
    where
        I: IntoIterator<Item = Pokemon>,
    {
        let mut stats = MergeStats::default();

        for record in incoming {
            match self.index.get(&record.id) {
                Some(&i) => {
                    if self.records[i].absorb(&record) {
                        stats.completed += 1;
                    } else {
                        stats.skipped += 1;
                    }
                }
                None => {
                    self.index.insert(record.id, self.records.len());
                    self.records.push(record);
                    stats.added += 1;
                }
            }
        }

        stats
    }

    /// Drop every record. Only used by an explicit filter reset.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }
}
