//! Conversion between [`GridState`] and its URL form.
//!
//! Decoding is total: every field falls back to its default when absent or
//! malformed, so a hand-edited or stale URL can never break the page.

use grid_model::{
    ColumnFilter, ColumnSort, DEFAULT_PAGE_SIZE, GridState, SerializedState, keys,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Build a [`GridState`] from URL parameters.
///
/// `page` is 1-based in the URL and 0-based in the state. Duplicate column
/// ids keep their first occurrence; empty column filter values are dropped.
pub fn decode(serialized: &SerializedState) -> GridState {
    let global_filter = serialized
        .get(keys::GLOBAL_FILTER)
        .unwrap_or_default()
        .to_string();

    let mut column_filters: Vec<ColumnFilter> =
        parse_json_list(keys::COLUMN_FILTERS, serialized.get(keys::COLUMN_FILTERS));
    column_filters.retain(|f| !f.value.is_empty());
    dedup_by_id(&mut column_filters, |f| f.id.as_str());

    let mut sorting: Vec<ColumnSort> =
        parse_json_list(keys::SORTING, serialized.get(keys::SORTING));
    dedup_by_id(&mut sorting, |s| s.id.as_str());

    GridState {
        global_filter,
        column_filters,
        sorting,
        page_index: decode_page_index(serialized.get(keys::PAGE)),
        page_size: decode_page_size(serialized.get(keys::PAGE_SIZE)),
    }
}

/// Render a [`GridState`] as URL parameters, omitting default fields.
pub fn encode(state: &GridState) -> SerializedState {
    let mut out = SerializedState::new();

    if !state.global_filter.is_empty() {
        out.insert(keys::GLOBAL_FILTER, state.global_filter.as_str());
    }
    if state.page_index > 0 {
        out.insert(keys::PAGE, (u64::from(state.page_index) + 1).to_string());
    }
    if state.page_size != DEFAULT_PAGE_SIZE {
        out.insert(keys::PAGE_SIZE, state.page_size.to_string());
    }
    if !state.sorting.is_empty()
        && let Some(json) = to_json(keys::SORTING, &state.sorting)
    {
        out.insert(keys::SORTING, json);
    }
    if !state.column_filters.is_empty()
        && let Some(json) = to_json(keys::COLUMN_FILTERS, &state.column_filters)
    {
        out.insert(keys::COLUMN_FILTERS, json);
    }

    out
}

fn decode_page_index(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };
    match raw.parse::<u64>() {
        Ok(page) => u32::try_from(page.saturating_sub(1)).unwrap_or(u32::MAX),
        Err(e) => {
            warn!(key = keys::PAGE, value = raw, error = %e, "ignoring malformed page");
            0
        }
    }
}

fn decode_page_size(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_PAGE_SIZE;
    };
    match raw.parse::<u32>() {
        Ok(0) => {
            warn!(key = keys::PAGE_SIZE, "ignoring zero page size");
            DEFAULT_PAGE_SIZE
        }
        Ok(size) => size,
        Err(e) => {
            warn!(key = keys::PAGE_SIZE, value = raw, error = %e, "ignoring malformed page size");
            DEFAULT_PAGE_SIZE
        }
    }
}

fn parse_json_list<T: DeserializeOwned>(key: &str, raw: Option<&str>) -> Vec<T> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<T>>(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(key, error = %e, "ignoring malformed list parameter");
            Vec::new()
        }
    }
}

fn to_json<T: Serialize + ?Sized>(key: &str, value: &T) -> Option<String> {
    serde_json::to_string(value)
        .map_err(|e| warn!(key, error = %e, "failed to serialize list parameter"))
        .ok()
}

fn dedup_by_id<T>(items: &mut Vec<T>, id: impl Fn(&T) -> &str) {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    items.retain(|item| {
        let key = id(item);
        if seen.iter().any(|s| s == key) {
            false
        } else {
            seen.push(key.to_string());
            true
        }
    });
}
