//! Data model for the people grid.
//!
//! - [`GridState`] is the canonical query state of one grid page activation.
//! - [`QuerySpec`] is derived from it and handed to the data source.
//! - [`SerializedState`] is the URL-facing representation of the state.
//! - [`Person`] and [`PeoplePage`] are what the data source returns.

pub mod grid;
pub mod person;
pub mod query;
pub mod serialized;

pub use grid::{
    ColumnFilter, ColumnSort, DEFAULT_PAGE_SIZE, FULL_NAME_COLUMN, GridState, PAGE_SIZE_OPTIONS,
};
pub use person::{PeoplePage, Person};
pub use query::QuerySpec;
pub use serialized::{SerializedState, keys};
