//! Sort functions for catalog records.
//!
//! Sorting is stable: records with equal keys keep their input order in both
//! directions.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicase::UniCase;

use crate::types::Pokemon;

/// Sort field for the display list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Id,
    Name,
}

impl SortField {
    /// All valid string representations of this enum.
    pub const ALL_STRINGS: &[&str] = &["id", "name"];
}

enum_display_fromstr!(
    SortField,
    crate::error::PokedexError::InvalidSortField,
    {
        Id => "id" | "number",
        Name => "name",
    }
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

enum_display_fromstr!(
    SortDirection,
    crate::error::PokedexError::InvalidSortDirection,
    {
        Ascending => "asc" | "ascending",
        Descending => "desc" | "descending",
    }
);

impl SortDirection {
    /// Apply this direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn compare(&self, a: &Pokemon, b: &Pokemon) -> Ordering {
        let ordering = match self.field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => compare_names(&a.name, &b.name),
        };
        self.direction.apply(ordering)
    }
}

/// Case-insensitive name comparison.
///
/// Names are case-folded and then compared by code point, not by locale
/// collation: accented letters sort after `z`. Upstream names are ASCII
/// slugs, so this matches alphabetical order for the catalog.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    UniCase::new(a).cmp(&UniCase::new(b))
}

/// Sort records in place by the given spec
pub fn sort_records(records: &mut [&Pokemon], spec: SortSpec) {
    records.sort_by(|a, b| spec.compare(a, b));
}
