//! The data source seam.

use std::future::Future;

use grid_model::{PeoplePage, QuerySpec};
use grid_state::FetchRequest;
use tracing::debug;

use crate::error::Result;

/// Something that can serve one page of people for a query.
///
/// Implementations must return at most `query.limit` rows and report the
/// full match count in [`PeoplePage::total`].
pub trait DataSource {
    fn fetch(&self, query: &QuerySpec) -> impl Future<Output = Result<PeoplePage>> + Send;
}

/// A completed request, ready for
/// [`GridController::resolve`](grid_state::GridController::resolve).
#[derive(Debug)]
pub struct Fetched {
    pub seq: u64,
    pub result: Result<PeoplePage>,
}

/// Execute a request issued by the controller.
pub async fn run_fetch<S: DataSource>(source: &S, request: FetchRequest) -> Fetched {
    debug!(seq = request.seq, "running fetch");
    let result = source.fetch(&request.query).await;
    Fetched {
        seq: request.seq,
        result,
    }
}
