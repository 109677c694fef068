//! Pure state transitions.
//!
//! Every change to a [`GridState`] goes through [`reduce`], which applies one
//! [`GridAction`] and then the full-name filter/sort coupling. The individual
//! `apply_*`/`set_*` functions are exposed for callers that compose their own
//! transitions.

use grid_model::{ColumnFilter, ColumnSort, FULL_NAME_COLUMN, GridState};
use tracing::debug;

/// A user intent against the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
    /// Replace the global filter text.
    SetGlobalFilter(String),
    /// Set (or clear, with an empty value) one column filter.
    SetColumnFilter { id: String, value: String },
    /// Replace the sort specification.
    SetSorting(Vec<ColumnSort>),
    /// Header click: unsorted -> ascending -> descending -> unsorted.
    ToggleSort(String),
    /// Jump to a 0-based page.
    GoToPage(u32),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    /// Change the number of rows per page.
    SetPageSize(u32),
    /// Drop the global filter and all column filters.
    ResetFilters,
}

/// Apply one action and the full-name coupling.
///
/// `total` is the last known match count from the data source; page moves
/// are clamped against it when present.
pub fn reduce(state: GridState, action: GridAction, total: Option<u64>) -> GridState {
    debug!(?action, "applying grid action");

    let next = match action {
        GridAction::SetGlobalFilter(text) => apply_global_filter(state, text),
        GridAction::SetColumnFilter { id, value } => apply_column_filter(state, &id, value),
        GridAction::SetSorting(sorting) => apply_sorting(state, sorting),
        GridAction::ToggleSort(id) => toggle_sort(state, &id),
        GridAction::GoToPage(index) => set_page(state, index, total),
        GridAction::FirstPage => set_page(state, 0, total),
        GridAction::PreviousPage => {
            let index = state.page_index.saturating_sub(1);
            set_page(state, index, total)
        }
        GridAction::NextPage => {
            let index = state.page_index.saturating_add(1);
            set_page(state, index, total)
        }
        GridAction::LastPage => match total {
            Some(total) => {
                let last = last_page_index(total, state.page_size);
                set_page(state, last, Some(total))
            }
            None => state,
        },
        GridAction::SetPageSize(size) => set_page_size(state, size),
        GridAction::ResetFilters => reset_filters(state),
    };

    enforce_full_name_sort(next)
}

/// Replace the global filter. A changed filter returns to the first page.
pub fn apply_global_filter(mut state: GridState, text: impl Into<String>) -> GridState {
    let text = text.into();
    if state.global_filter == text {
        return state;
    }
    state.global_filter = text;
    state.page_index = 0;
    state
}

/// Upsert a column filter, removing it when `value` is empty.
///
/// An existing filter keeps its position. A changed filter returns to the
/// first page.
pub fn apply_column_filter(
    mut state: GridState,
    id: &str,
    value: impl Into<String>,
) -> GridState {
    let value = value.into();
    let position = state.column_filters.iter().position(|f| f.id == id);

    match (position, value.is_empty()) {
        (Some(i), true) => {
            state.column_filters.remove(i);
        }
        (Some(i), false) => {
            if state.column_filters[i].value == value {
                return state;
            }
            state.column_filters[i].value = value;
        }
        (None, true) => return state,
        (None, false) => state.column_filters.push(ColumnFilter::new(id, value)),
    }

    state.page_index = 0;
    state
}

/// Replace the sort specification wholesale. Repeated ids keep the first.
pub fn apply_sorting(mut state: GridState, sorting: Vec<ColumnSort>) -> GridState {
    let mut deduped: Vec<ColumnSort> = Vec::with_capacity(sorting.len());
    for sort in sorting {
        if !deduped.iter().any(|s| s.id == sort.id) {
            deduped.push(sort);
        }
    }
    state.sorting = deduped;
    state
}

fn toggle_sort(state: GridState, id: &str) -> GridState {
    let sorting = match state.sorting.first() {
        Some(current) if current.id == id && !current.desc => vec![ColumnSort::desc(id)],
        Some(current) if current.id == id => Vec::new(),
        _ => vec![ColumnSort::asc(id)],
    };
    apply_sorting(state, sorting)
}

/// Move to a page, clamped to the known page range.
pub fn set_page(mut state: GridState, index: u32, total: Option<u64>) -> GridState {
    state.page_index = match total {
        Some(total) => index.min(last_page_index(total, state.page_size)),
        None => index,
    };
    state
}

/// Change the page size and return to the first page. Zero is ignored.
pub fn set_page_size(mut state: GridState, size: u32) -> GridState {
    if size == 0 {
        return state;
    }
    if state.page_size != size {
        state.page_size = size;
        state.page_index = 0;
    }
    state
}

fn reset_filters(mut state: GridState) -> GridState {
    if state.has_filters() {
        state.global_filter.clear();
        state.column_filters.clear();
        state.page_index = 0;
    }
    state
}

/// Number of pages needed for `total` rows.
pub fn page_count(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size))
}

fn last_page_index(total: u64, page_size: u32) -> u32 {
    let last = page_count(total, page_size).saturating_sub(1);
    u32::try_from(last).unwrap_or(u32::MAX)
}

/// Filtering by full name forces an ascending full-name sort.
///
/// Fires whenever a non-empty `fullName` column filter is present and the
/// primary sort is on some other column (or there is no sort).
pub fn enforce_full_name_sort(mut state: GridState) -> GridState {
    let filtering_full_name = state
        .column_filter(FULL_NAME_COLUMN)
        .is_some_and(|v| !v.is_empty());
    let sorted_by_full_name = state
        .sorting
        .first()
        .is_some_and(|s| s.id == FULL_NAME_COLUMN);

    if filtering_full_name && !sorted_by_full_name {
        debug!("full-name filter active, forcing full-name sort");
        state.sorting = vec![ColumnSort::asc(FULL_NAME_COLUMN)];
    }
    state
}
