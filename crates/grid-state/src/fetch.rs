//! Fetch sequencing with latest-request-wins.
//!
//! Each issued request carries a monotonically increasing sequence number.
//! A result is applied only if its sequence number is still the latest one
//! issued; anything older is discarded on arrival.

use std::fmt::Display;

use grid_model::{PeoplePage, QuerySpec};
use tracing::{debug, warn};

/// A request the host should send to the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: QuerySpec,
}

/// State of the latest request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing issued yet.
    #[default]
    Idle,
    /// Latest request in flight.
    Loading,
    /// Latest request succeeded.
    Loaded(PeoplePage),
    /// Latest request failed; the user may retry.
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn page(&self) -> Option<&PeoplePage> {
        match self {
            Self::Loaded(page) => Some(page),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What happened to a resolved result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result belonged to the latest request and was applied.
    Applied,
    /// A newer request was issued since; the result was dropped.
    Stale,
}

/// Tracks issued requests and the status of the latest one.
#[derive(Debug, Clone, Default)]
pub struct FetchTracker {
    last_seq: u64,
    latest: Option<FetchRequest>,
    status: FetchStatus,
    total: Option<u64>,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a request for `query` unless it equals the latest issued query.
    pub fn begin(&mut self, query: QuerySpec) -> Option<FetchRequest> {
        if self.latest.as_ref().is_some_and(|r| r.query == query) {
            return None;
        }
        Some(self.issue(query))
    }

    /// Re-issue the latest query under a new sequence number.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        let query = self.latest.as_ref()?.query.clone();
        Some(self.issue(query))
    }

    fn issue(&mut self, query: QuerySpec) -> FetchRequest {
        self.last_seq += 1;
        let request = FetchRequest {
            seq: self.last_seq,
            query,
        };
        debug!(seq = request.seq, query = ?request.query, "issuing fetch");
        self.latest = Some(request.clone());
        self.status = FetchStatus::Loading;
        request
    }

    /// Whether `seq` is the latest issued request.
    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest.as_ref().is_some_and(|r| r.seq == seq)
    }

    /// Apply a result if it belongs to the latest request.
    pub fn resolve<E: Display>(&mut self, seq: u64, result: Result<PeoplePage, E>) -> Resolution {
        if !self.is_latest(seq) {
            debug!(seq, latest = self.last_seq, "discarding stale fetch result");
            return Resolution::Stale;
        }

        self.status = match result {
            Ok(page) => {
                debug!(seq, rows = page.rows.len(), total = page.total, "fetch applied");
                self.total = Some(page.total);
                FetchStatus::Loaded(page)
            }
            Err(e) => {
                warn!(seq, error = %e, "fetch failed");
                FetchStatus::Failed(e.to_string())
            }
        };
        Resolution::Applied
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// The latest issued request.
    pub fn latest(&self) -> Option<&FetchRequest> {
        self.latest.as_ref()
    }

    /// Match count from the most recent successful result.
    pub fn total(&self) -> Option<u64> {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use grid_model::Person;

    use super::*;

    fn query(offset: u64) -> QuerySpec {
        QuerySpec {
            search_terms: Vec::new(),
            limit: 10,
            offset,
        }
    }

    fn page(first_id: u64, total: u64) -> PeoplePage {
        PeoplePage {
            rows: vec![Person {
                id: first_id,
                first_name: "A".into(),
                last_name: "B".into(),
                email: "a@b".into(),
            }],
            total,
        }
    }

    #[test]
    fn identical_query_is_not_reissued() {
        let mut tracker = FetchTracker::new();
        let first = tracker.begin(query(0)).unwrap();
        assert_eq!(first.seq, 1);
        assert!(tracker.begin(query(0)).is_none());
        assert_eq!(tracker.begin(query(10)).unwrap().seq, 2);
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut tracker = FetchTracker::new();
        let a = tracker.begin(query(0)).unwrap();
        let b = tracker.begin(query(10)).unwrap();

        assert_eq!(
            tracker.resolve::<String>(b.seq, Ok(page(11, 30))),
            Resolution::Applied
        );
        assert_eq!(
            tracker.resolve::<String>(a.seq, Ok(page(1, 30))),
            Resolution::Stale
        );
        assert_eq!(tracker.status().page().unwrap().rows[0].id, 11);
    }

    #[test]
    fn failure_is_surfaced_and_retry_reissues() {
        let mut tracker = FetchTracker::new();
        let a = tracker.begin(query(0)).unwrap();
        tracker.resolve(a.seq, Err::<PeoplePage, _>("connection refused"));
        assert_eq!(tracker.status().error(), Some("connection refused"));

        let retry = tracker.retry().unwrap();
        assert_eq!(retry.query, query(0));
        assert!(retry.seq > a.seq);
        assert!(tracker.status().is_loading());

        // The failed attempt can no longer land.
        assert_eq!(
            tracker.resolve::<String>(a.seq, Ok(page(1, 5))),
            Resolution::Stale
        );
    }

    #[test]
    fn retry_without_request_is_none() {
        assert!(FetchTracker::new().retry().is_none());
    }

    #[test]
    fn total_survives_later_failure() {
        let mut tracker = FetchTracker::new();
        let a = tracker.begin(query(0)).unwrap();
        tracker.resolve::<String>(a.seq, Ok(page(1, 42)));
        let b = tracker.begin(query(10)).unwrap();
        tracker.resolve(b.seq, Err::<PeoplePage, _>("timeout"));
        assert_eq!(tracker.total(), Some(42));
    }
}
