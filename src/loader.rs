//! Load-more trigger.
//!
//! The view layer reports that the last rendered item became visible; this
//! module decides what that means for the current mode. The decision itself
//! is pure. `SentinelWatch` models the re-armable watcher so rapid repeated
//! visibility reports can't start overlapping fetches.

use crate::fetch::{DescendingCursor, FetchLimits, ForwardCursor, PageRequest};
use crate::query::{SortDirection, SortField, SortSpec};

/// What a load-more trigger should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMore {
    /// Nothing to do: a fetch is running, the list is complete, or the
    /// cursor is exhausted
    Noop,
    /// Fetch the next page for the given direction
    FetchPage {
        page: PageRequest,
        direction: SortDirection,
    },
    /// Expose more already-resident records (name sort)
    ExpandWindow { visible: usize },
}

/// Inputs the trigger decision depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerContext {
    pub loading: bool,
    pub filter_active: bool,
    pub sort: SortSpec,
    pub forward: ForwardCursor,
    pub descending: DescendingCursor,
    /// Records currently exposed by the name-sort window
    pub visible: usize,
    /// Records resident in the store
    pub resident: usize,
}

impl TriggerContext {
    /// Identity of the watcher's arming conditions
    pub fn key(&self) -> TriggerKey {
        TriggerKey {
            loading: self.loading,
            filter_active: self.filter_active,
            sort: self.sort,
            forward_end: self.forward.covered(),
            descending_floor: self.descending.floor(),
            visible: self.visible,
        }
    }
}

/// Decide what a visible sentinel should do
pub fn on_trigger(ctx: &TriggerContext, limits: FetchLimits) -> LoadMore {
    if ctx.loading || ctx.filter_active {
        return LoadMore::Noop;
    }

    match (ctx.sort.field, ctx.sort.direction) {
        (SortField::Name, _) => {
            if ctx.visible >= ctx.resident {
                return LoadMore::Noop;
            }
            let visible = (ctx.visible + limits.page_size as usize).min(ctx.resident);
            LoadMore::ExpandWindow { visible }
        }
        (SortField::Id, SortDirection::Ascending) => ctx
            .forward
            .next_page(limits.page_size, limits.max_count)
            .map_or(LoadMore::Noop, |page| LoadMore::FetchPage {
                page,
                direction: SortDirection::Ascending,
            }),
        (SortField::Id, SortDirection::Descending) => ctx
            .descending
            .next_page(limits.page_size)
            .map_or(LoadMore::Noop, |page| LoadMore::FetchPage {
                page,
                direction: SortDirection::Descending,
            }),
    }
}

/// Values whose change tears down and re-arms the watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerKey {
    pub loading: bool,
    pub filter_active: bool,
    pub sort: SortSpec,
    pub forward_end: u32,
    pub descending_floor: u32,
    pub visible: usize,
}

/// Re-armable visibility watcher.
///
/// Fires at most once per arming. It is disarmed while a fetch is in flight
/// and re-armed whenever the trigger conditions change.
#[derive(Debug, Clone, Default)]
pub struct SentinelWatch {
    armed_for: Option<TriggerKey>,
    fired: bool,
}

impl SentinelWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to the current conditions. Returns true if the watcher was
    /// torn down and recreated.
    pub fn rearm(&mut self, key: TriggerKey) -> bool {
        if key.loading {
            let was_armed = self.armed_for.is_some();
            self.armed_for = None;
            self.fired = false;
            return was_armed;
        }
        if self.armed_for == Some(key) {
            return false;
        }
        self.armed_for = Some(key);
        self.fired = false;
        true
    }

    /// The sentinel became visible. Returns true if the trigger should run.
    pub fn fire(&mut self, key: TriggerKey) -> bool {
        self.rearm(key);
        if self.armed_for.is_none() || self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn is_armed(&self) -> bool {
        self.armed_for.is_some() && !self.fired
    }
}
