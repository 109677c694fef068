//! Query handed to the data source.

use serde::{Deserialize, Serialize};

/// Server query derived from a [`GridState`](crate::GridState).
///
/// Never stored; recomputed whenever the state changes. Two equal specs
/// describe the same request, which is what fetch deduplication relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Non-empty column filter values in order, then the global filter.
    pub search_terms: Vec<String>,
    /// Rows per page.
    pub limit: u32,
    /// Number of rows to skip.
    pub offset: u64,
}

impl QuerySpec {
    /// Terms joined into the single `q` string the source understands.
    pub fn search_query(&self) -> String {
        self.search_terms.join(" ").trim().to_string()
    }

    /// Whether the query carries any search terms.
    pub fn is_search(&self) -> bool {
        !self.search_query().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_joins_terms() {
        let spec = QuerySpec {
            search_terms: vec!["ann".to_string(), "smith ".to_string()],
            limit: 10,
            offset: 0,
        };
        assert_eq!(spec.search_query(), "ann smith");
        assert!(spec.is_search());
    }

    #[test]
    fn empty_terms_is_plain_listing() {
        let spec = QuerySpec {
            search_terms: Vec::new(),
            limit: 10,
            offset: 20,
        };
        assert_eq!(spec.search_query(), "");
        assert!(!spec.is_search());
    }
}
