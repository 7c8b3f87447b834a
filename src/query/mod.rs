//! Filter and sort engine for catalog records.
//!
//! A `FilterSpec` is turned into a `RecordQuery`: every populated field
//! becomes an OR-group of filters, and all groups are AND-composed. An empty
//! spec skips filtering entirely and only sorts.

use serde::{Deserialize, Serialize};

use crate::types::Pokemon;

pub mod sort;

pub use sort::{SortDirection, SortField, SortSpec, compare_names, sort_records};

/// User-chosen search, filter and sort criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Name substring or exact id
    #[serde(default)]
    pub search_term: String,
    /// Matches records having any of these types
    #[serde(default)]
    pub types: Vec<String>,
    /// Matches records whose generation is listed
    #[serde(default)]
    pub generations: Vec<u8>,
    /// Matches records that appeared in any of these games
    #[serde(default)]
    pub games: Vec<String>,
    #[serde(default)]
    pub sort: SortSpec,
}

impl FilterSpec {
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn search(&self) -> Option<&str> {
        let term = self.search_term.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Any criterion besides sort is populated
    pub fn is_active(&self) -> bool {
        self.search().is_some()
            || !self.types.is_empty()
            || !self.generations.is_empty()
            || !self.games.is_empty()
    }

    /// The search term is the only populated criterion
    pub fn is_search_only(&self) -> bool {
        self.search().is_some()
            && self.types.is_empty()
            && self.generations.is_empty()
            && self.games.is_empty()
    }

    /// A criterion other than search is populated; these must be evaluated
    /// against the full catalog.
    pub fn needs_full_catalog(&self) -> bool {
        !self.types.is_empty() || !self.generations.is_empty() || !self.games.is_empty()
    }

    /// Build the executable query for this spec
    pub fn to_query(&self) -> RecordQuery {
        let mut builder = RecordQueryBuilder::new().with_sort(self.sort);

        if let Some(term) = self.search() {
            builder = builder.with_filter(Box::new(SearchFilter::new(term)));
        }

        builder = builder.with_or_filters(
            self.types
                .iter()
                .map(|t| Box::new(TypeFilter::new(t)) as Box<dyn RecordFilter>)
                .collect(),
        );
        builder = builder.with_or_filters(
            self.generations
                .iter()
                .map(|&g| Box::new(GenerationFilter::new(g)) as Box<dyn RecordFilter>)
                .collect(),
        );
        builder = builder.with_or_filters(
            self.games
                .iter()
                .map(|g| Box::new(GameFilter::new(g)) as Box<dyn RecordFilter>)
                .collect(),
        );

        builder.build()
    }
}

/// Filter and sort `records` by `spec`. Pure; never fetches.
pub fn apply<'a>(records: &'a [Pokemon], spec: &FilterSpec) -> Vec<&'a Pokemon> {
    spec.to_query().apply(records)
}

/// Trait for record filters
pub trait RecordFilter: Send + Sync {
    fn matches(&self, record: &Pokemon) -> bool;
}

/// Case-insensitive name substring, or exact id when the term is numeric
pub struct SearchFilter {
    needle: String,
    id: Option<u32>,
}

impl SearchFilter {
    pub fn new(term: &str) -> Self {
        let term = term.trim();
        Self {
            needle: term.to_lowercase(),
            id: term.parse().ok(),
        }
    }
}

impl RecordFilter for SearchFilter {
    fn matches(&self, record: &Pokemon) -> bool {
        record.name.to_lowercase().contains(&self.needle) || self.id == Some(record.id)
    }
}

pub struct TypeFilter {
    type_name: String,
}

impl TypeFilter {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_lowercase(),
        }
    }
}

impl RecordFilter for TypeFilter {
    fn matches(&self, record: &Pokemon) -> bool {
        record.has_type(&self.type_name)
    }
}

/// Partial records never match: their generation is unknown.
pub struct GenerationFilter {
    generation: u8,
}

impl GenerationFilter {
    pub fn new(generation: u8) -> Self {
        Self { generation }
    }
}

impl RecordFilter for GenerationFilter {
    fn matches(&self, record: &Pokemon) -> bool {
        record.generation == Some(self.generation)
    }
}

/// Partial records never match: their game list is not yet known.
pub struct GameFilter {
    game: String,
}

impl GameFilter {
    pub fn new(game: &str) -> Self {
        Self {
            game: game.to_lowercase(),
        }
    }
}

impl RecordFilter for GameFilter {
    fn matches(&self, record: &Pokemon) -> bool {
        record.is_complete() && record.appeared_in(&self.game)
    }
}

/// Builder for a record query
pub struct RecordQueryBuilder {
    filters: Vec<Box<dyn RecordFilter>>,
    or_filter_groups: Vec<Vec<Box<dyn RecordFilter>>>,
    sort: SortSpec,
    limit: Option<usize>,
}

impl RecordQueryBuilder {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            or_filter_groups: Vec::new(),
            sort: SortSpec::default(),
            limit: None,
        }
    }

    /// Add a filter to the query (AND composition)
    pub fn with_filter(mut self, filter: Box<dyn RecordFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a group of filters that will be OR-composed together.
    /// Empty groups are ignored.
    pub fn with_or_filters(mut self, filters: Vec<Box<dyn RecordFilter>>) -> Self {
        if !filters.is_empty() {
            self.or_filter_groups.push(filters);
        }
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn build(self) -> RecordQuery {
        RecordQuery {
            filters: self.filters,
            or_filter_groups: self.or_filter_groups,
            sort: self.sort,
            limit: self.limit,
        }
    }
}

impl Default for RecordQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Executable query configuration
pub struct RecordQuery {
    filters: Vec<Box<dyn RecordFilter>>,
    or_filter_groups: Vec<Vec<Box<dyn RecordFilter>>>,
    sort: SortSpec,
    limit: Option<usize>,
}

impl RecordQuery {
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty() || !self.or_filter_groups.is_empty()
    }

    pub fn matches(&self, record: &Pokemon) -> bool {
        self.filters.iter().all(|f| f.matches(record))
            && self
                .or_filter_groups
                .iter()
                .all(|group| group.iter().any(|f| f.matches(record)))
    }

    /// Filter, stably sort, then truncate to the limit
    pub fn apply<'a>(&self, records: &'a [Pokemon]) -> Vec<&'a Pokemon> {
        let mut out: Vec<&Pokemon> = if self.has_filters() {
            records.iter().filter(|r| self.matches(r)).collect()
        } else {
            records.iter().collect()
        };

        sort_records(&mut out, self.sort);

        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mon(id: u32, name: &str, types: &[&str], generation: u8, games: &[&str]) -> Pokemon {
        Pokemon {
            id,
            name: name.to_string(),
            types: types.iter().map(|s| s.to_string()).collect(),
            generation: Some(generation),
            games: games.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn ids(records: &[&Pokemon]) -> Vec<u32> {
        records.iter().map(|p| p.id).collect()
    }

    fn abc() -> Vec<Pokemon> {
        vec![
            mon(1, "a", &["fire"], 1, &["red"]),
            mon(2, "b", &["water"], 1, &["blue"]),
            mon(3, "c", &["fire"], 2, &["gold"]),
        ]
    }

    #[test]
    fn test_and_across_fields() {
        let records = abc();
        let spec = FilterSpec {
            types: vec!["fire".to_string()],
            generations: vec![1],
            ..Default::default()
        };
        assert_eq!(ids(&apply(&records, &spec)), vec![1]);
    }

    #[test]
    fn test_or_within_field() {
        let records = abc();
        let spec = FilterSpec {
            types: vec!["fire".to_string(), "water".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&apply(&records, &spec)), vec![1, 2, 3]);

        let spec = FilterSpec {
            games: vec!["blue".to_string(), "gold".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&apply(&records, &spec)), vec![2, 3]);
    }

    #[test]
    fn test_each_field_independently_required() {
        let records = abc();
        let spec = FilterSpec {
            types: vec!["water".to_string()],
            generations: vec![2],
            ..Default::default()
        };
        assert!(apply(&records, &spec).is_empty());
    }

    #[test]
    fn test_search_matches_name_substring_or_exact_id() {
        let records = vec![
            mon(25, "pikachu", &["electric"], 1, &[]),
            mon(26, "raichu", &["electric"], 1, &[]),
            mon(172, "pichu", &["electric"], 2, &[]),
        ];

        let by_name = FilterSpec {
            search_term: "CHU".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&records, &by_name)), vec![25, 26, 172]);

        let by_id = FilterSpec {
            search_term: "26".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&records, &by_id)), vec![26]);
    }

    #[test]
    fn test_empty_spec_only_sorts() {
        let records = vec![mon(3, "c", &[], 1, &[]), mon(1, "a", &[], 1, &[])];
        let spec = FilterSpec::default().with_sort(SortSpec::new(
            SortField::Id,
            SortDirection::Descending,
        ));
        assert!(!spec.is_active());
        assert_eq!(ids(&apply(&records, &spec)), vec![3, 1]);
    }

    #[test]
    fn test_partial_records_excluded_from_generation_and_game_filters() {
        let mut records = abc();
        records.push(Pokemon::partial(4, "d", vec!["fire".to_string()]));

        let by_type = FilterSpec {
            types: vec!["fire".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&apply(&records, &by_type)), vec![1, 3, 4]);

        let by_gen = FilterSpec {
            types: vec!["fire".to_string()],
            generations: vec![1, 2],
            ..Default::default()
        };
        assert_eq!(ids(&apply(&records, &by_gen)), vec![1, 3]);
    }

    #[test]
    fn test_spec_mode_predicates() {
        let search = FilterSpec {
            search_term: "  pika ".to_string(),
            ..Default::default()
        };
        assert!(search.is_active());
        assert!(search.is_search_only());
        assert!(!search.needs_full_catalog());
        assert_eq!(search.search(), Some("pika"));

        let blank = FilterSpec {
            search_term: "   ".to_string(),
            ..Default::default()
        };
        assert!(!blank.is_active());

        let typed = FilterSpec {
            search_term: "pika".to_string(),
            types: vec!["electric".to_string()],
            ..Default::default()
        };
        assert!(!typed.is_search_only());
        assert!(typed.needs_full_catalog());
    }

    #[test]
    fn test_query_limit() {
        let records = abc();
        let query = RecordQueryBuilder::new().with_limit(2).build();
        assert_eq!(ids(&query.apply(&records)), vec![1, 2]);
    }
}
