//! People data source for the grid.
//!
//! [`DataSource`] is the seam between the grid controller and the network:
//! it turns a [`QuerySpec`](grid_model::QuerySpec) into one page of people.
//! [`DummyJsonSource`] is the HTTP implementation backed by the public
//! DummyJSON users API.

pub mod dummyjson;
pub mod error;
pub mod source;

pub use dummyjson::DummyJsonSource;
pub use error::{FetchError, Result};
pub use source::{DataSource, Fetched, run_fetch};
