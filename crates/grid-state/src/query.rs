//! Server query derivation.

use grid_model::{GridState, QuerySpec};

/// Derive the outgoing query from the grid state.
///
/// Search terms are the non-empty column filter values in order, followed
/// by the global filter when set.
pub fn derive_query(state: &GridState) -> QuerySpec {
    let mut search_terms: Vec<String> = state
        .column_filters
        .iter()
        .filter(|f| !f.value.is_empty())
        .map(|f| f.value.clone())
        .collect();

    if !state.global_filter.is_empty() {
        search_terms.push(state.global_filter.clone());
    }

    QuerySpec {
        search_terms,
        limit: state.page_size,
        offset: u64::from(state.page_index) * u64::from(state.page_size),
    }
}
