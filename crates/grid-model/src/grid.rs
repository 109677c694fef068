//! Grid query state.

use serde::{Deserialize, Serialize};

/// Page size used when the URL does not carry one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page sizes offered by the pager.
pub const PAGE_SIZE_OPTIONS: [u32; 5] = [10, 20, 30, 40, 50];

/// Column id of the computed `firstName lastName` column.
pub const FULL_NAME_COLUMN: &str = "fullName";

/// A filter value bound to one column.
///
/// Serialized as `{"id": ..., "value": ...}` inside the `columnFilters` URL
/// parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    /// Column id.
    pub id: String,
    /// Filter text.
    pub value: String,
}

impl ColumnFilter {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Sort direction for one column.
///
/// Serialized as `{"id": ..., "desc": ...}` inside the `sorting` URL
/// parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    /// Column id.
    pub id: String,
    /// Descending when true.
    pub desc: bool,
}

impl ColumnSort {
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }
}

/// Canonical query state of the grid.
///
/// Column filter ids are unique, sort ids are unique, and `page_size` is
/// never zero. The state is only changed through the controller transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    /// Free-text filter applied across all columns.
    pub global_filter: String,
    /// Per-column filters, in insertion order.
    pub column_filters: Vec<ColumnFilter>,
    /// Sort specification, highest priority first.
    pub sorting: Vec<ColumnSort>,
    /// 0-based page index.
    pub page_index: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            global_filter: String::new(),
            column_filters: Vec::new(),
            sorting: Vec::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GridState {
    /// Filter value for a column, if one is set.
    pub fn column_filter(&self, id: &str) -> Option<&str> {
        self.column_filters
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.value.as_str())
    }

    /// Whether any filter (global or per-column) is active.
    pub fn has_filters(&self) -> bool {
        !self.global_filter.is_empty() || self.column_filters.iter().any(|f| !f.value.is_empty())
    }

    /// Sort entry for a column, if the column is sorted.
    pub fn sort_for(&self, id: &str) -> Option<&ColumnSort> {
        self.sorting.iter().find(|s| s.id == id)
    }
}
