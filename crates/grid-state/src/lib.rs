//! Grid state controller.
//!
//! Owns the grid query state and everything that policy depends on:
//!
//! - `codec` - [`decode`]/[`encode`] between [`GridState`] and the URL map
//! - `query` - [`derive_query`], the sole input to the data source
//! - `transition` - pure `(GridState, GridAction) -> GridState` transitions
//! - `rank` - tiered fuzzy ranking
//! - `columns` - column model, per-column filters and row sorting
//! - `debounce` - last-value-wins input debouncing
//! - `fetch` - request sequencing with latest-request-wins
//! - `controller` - [`GridController`], which ties the pieces together
//! - `config` - [`GridConfig`] loaded from TOML
//!
//! [`GridState`]: grid_model::GridState

pub mod codec;
pub mod columns;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod query;
pub mod rank;
pub mod transition;

pub use codec::{decode, encode};
pub use columns::{Column, FilterFn, filter_rows, sort_rows};
pub use config::GridConfig;
pub use controller::{Effects, FilterTarget, GridController, Navigation};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use error::ConfigError;
pub use fetch::{FetchRequest, FetchStatus, FetchTracker, Resolution};
pub use query::derive_query;
pub use rank::{Ranking, compare_rankings, rank_item};
pub use transition::{
    GridAction, apply_column_filter, apply_global_filter, apply_sorting,
    enforce_full_name_sort, page_count, reduce, set_page, set_page_size,
};
