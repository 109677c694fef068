//! Grid controller.
//!
//! Ties the pure pieces together for one page activation:
//!
//! 1. the incoming URL map is decoded into the initial state
//! 2. user input is turned into [`GridAction`]s (text filters debounced)
//! 3. every committed change yields [`Effects`]: a replace-style navigation
//!    when the encoded state changed, and a fetch when the derived query
//!    changed
//! 4. fetch results are applied latest-request-wins
//!
//! The controller never performs I/O; the host executes the effects.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::time::{Duration, Instant};

use grid_model::{GridState, PeoplePage, Person, QuerySpec, SerializedState};
use tracing::{debug, info};

use crate::codec::{decode, encode};
use crate::columns::{filter_rows, sort_rows};
use crate::config::GridConfig;
use crate::debounce::Debouncer;
use crate::fetch::{FetchRequest, FetchStatus, FetchTracker, Resolution};
use crate::query::derive_query;
use crate::transition::{GridAction, enforce_full_name_sort, page_count, reduce};

/// Replace the current URL query with `search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub search: SerializedState,
    /// Always true: edits replace the history entry instead of pushing one.
    pub replace: bool,
}

/// Work the host must perform after a state change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    pub navigate: Option<Navigation>,
    pub fetch: Option<FetchRequest>,
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        self.navigate.is_none() && self.fetch.is_none()
    }

    /// Combine with later effects; the later ones supersede.
    fn then(self, later: Effects) -> Effects {
        Effects {
            navigate: later.navigate.or(self.navigate),
            fetch: later.fetch.or(self.fetch),
        }
    }
}

/// A debounced text input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterTarget {
    Global,
    Column(String),
}

impl FilterTarget {
    fn into_action(self, value: String) -> GridAction {
        match self {
            Self::Global => GridAction::SetGlobalFilter(value),
            Self::Column(id) => GridAction::SetColumnFilter { id, value },
        }
    }
}

/// Owns the grid state for one page activation.
#[derive(Debug)]
pub struct GridController {
    state: GridState,
    committed: SerializedState,
    inputs: BTreeMap<FilterTarget, Debouncer<String>>,
    debounce: Duration,
    client_filtering: bool,
    fetch: FetchTracker,
}

impl GridController {
    /// Start a page activation from the incoming URL parameters.
    ///
    /// Returns the initial effects: the first fetch, plus a navigation when
    /// the URL was not already in canonical form.
    pub fn activate(serialized: &SerializedState, config: &GridConfig) -> (Self, Effects) {
        let state = enforce_full_name_sort(decode(serialized));
        info!(
            page = state.page_index,
            page_size = state.page_size,
            filters = state.column_filters.len(),
            "activating grid"
        );

        let mut controller = Self {
            state,
            committed: serialized.clone(),
            inputs: BTreeMap::new(),
            debounce: config.debounce(),
            client_filtering: config.client_filtering,
            fetch: FetchTracker::new(),
        };
        let effects = controller.commit();
        (controller, effects)
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Query derived from the current state.
    pub fn query(&self) -> QuerySpec {
        derive_query(&self.state)
    }

    /// Apply an action immediately.
    pub fn dispatch(&mut self, action: GridAction) -> Effects {
        let next = reduce(self.state.clone(), action, self.fetch.total());
        if next == self.state {
            return Effects::default();
        }
        self.state = next;
        self.commit()
    }

    /// Record a keystroke in the global filter box.
    pub fn input_global_filter(&mut self, text: impl Into<String>, now: Instant) {
        self.input(FilterTarget::Global, text, now);
    }

    /// Record a keystroke in a column filter box.
    pub fn input_column_filter(
        &mut self,
        id: impl Into<String>,
        text: impl Into<String>,
        now: Instant,
    ) {
        self.input(FilterTarget::Column(id.into()), text, now);
    }

    /// Record a keystroke; it is committed once the input has been quiet for
    /// the debounce window.
    pub fn input(&mut self, target: FilterTarget, text: impl Into<String>, now: Instant) {
        let delay = self.debounce;
        self.inputs
            .entry(target)
            .or_insert_with(|| Debouncer::new(delay))
            .push(text.into(), now);
    }

    /// Text typed into an input but not yet committed.
    pub fn pending_input(&self, target: &FilterTarget) -> Option<&str> {
        self.inputs
            .get(target)
            .and_then(Debouncer::pending)
            .map(String::as_str)
    }

    /// Earliest instant at which [`poll`](Self::poll) will commit something.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inputs.values().filter_map(Debouncer::deadline).min()
    }

    /// Commit every input whose debounce window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Effects {
        let due: Vec<(FilterTarget, String)> = self
            .inputs
            .iter_mut()
            .filter_map(|(target, debouncer)| {
                debouncer.poll(now).map(|value| (target.clone(), value))
            })
            .collect();
        self.inputs.retain(|_, debouncer| debouncer.is_pending());

        due.into_iter().fold(Effects::default(), |effects, (target, value)| {
            debug!(?target, "committing debounced input");
            let action = target.into_action(value);
            effects.then(self.dispatch(action))
        })
    }

    /// Apply a fetch result.
    ///
    /// Stale results are dropped. A successful result updates the known
    /// total; if the current page is now past the end it is clamped, which
    /// may produce new effects.
    pub fn resolve<E: Display>(&mut self, seq: u64, result: Result<PeoplePage, E>) -> Effects {
        if self.fetch.resolve(seq, result) == Resolution::Stale {
            return Effects::default();
        }
        let Some(total) = self.fetch.total() else {
            return Effects::default();
        };
        let index = self.state.page_index;
        if index > 0 && u64::from(index) >= page_count(total, self.state.page_size) {
            debug!(page = index, total, "page out of range, clamping");
            return self.dispatch(GridAction::GoToPage(index));
        }
        Effects::default()
    }

    /// Re-issue the current query after a failure (or to refresh).
    pub fn retry(&mut self) -> Option<FetchRequest> {
        self.fetch.retry()
    }

    pub fn status(&self) -> &FetchStatus {
        self.fetch.status()
    }

    /// Number of pages, once a total is known.
    pub fn page_count(&self) -> Option<u64> {
        self.fetch
            .total()
            .map(|total| page_count(total, self.state.page_size))
    }

    /// Rows of the loaded page, client-filtered when enabled, then sorted.
    pub fn visible_rows(&self) -> Vec<Person> {
        let Some(page) = self.fetch.status().page() else {
            return Vec::new();
        };
        let mut rows = if self.client_filtering {
            filter_rows(&page.rows, &self.state)
        } else {
            page.rows.clone()
        };
        sort_rows(&mut rows, &self.state.sorting, &self.state.column_filters);
        rows
    }

    fn commit(&mut self) -> Effects {
        let encoded = encode(&self.state);
        let navigate = if encoded == self.committed {
            None
        } else {
            debug!(search = %encoded.to_query_string(), "replacing URL state");
            self.committed = encoded.clone();
            Some(Navigation {
                search: encoded,
                replace: true,
            })
        };
        let fetch = self.fetch.begin(derive_query(&self.state));
        Effects { navigate, fetch }
    }
}
