//! `fetch_page` against a canned source.

use std::sync::Mutex;

use grid_cli::report::fetch_page;
use grid_model::{PeoplePage, Person, QuerySpec};
use grid_source::{DataSource, FetchError};
use grid_state::GridConfig;

/// Returns canned pages and records every query it receives.
struct CannedSource {
    people: Vec<Person>,
    failure: Option<u16>,
    seen: Mutex<Vec<QuerySpec>>,
}

impl CannedSource {
    fn new(names: &[(&str, &str)]) -> Self {
        let people = names
            .iter()
            .zip(1..)
            .map(|(&(first, last), id)| Person {
                id,
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: format!("{}@example.com", first.to_lowercase()),
            })
            .collect();
        Self {
            people,
            failure: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen(&self) -> Vec<QuerySpec> {
        self.seen.lock().unwrap().clone()
    }
}

impl DataSource for CannedSource {
    async fn fetch(&self, query: &QuerySpec) -> Result<PeoplePage, FetchError> {
        self.seen.lock().unwrap().push(query.clone());
        if let Some(status) = self.failure {
            return Err(FetchError::Status {
                status,
                body: "maintenance".to_string(),
            });
        }
        let rows = self
            .people
            .iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();
        Ok(PeoplePage {
            rows,
            total: self.people.len() as u64,
        })
    }
}

#[tokio::test]
async fn full_name_filter_sorts_page_by_rank() {
    let source = CannedSource::new(&[
        ("Zara", "Brown"),
        ("Bob", "Brown"),
        ("Anna", "Bobson"),
        ("Rob", "Taylor"),
    ]);
    let report = fetch_page(
        &source,
        "columnFilters=%5B%7B%22id%22%3A%22fullName%22%2C%22value%22%3A%22bob%22%7D%5D",
        &GridConfig::default(),
    )
    .await
    .unwrap();

    let names: Vec<String> = report.rows.iter().map(Person::full_name).collect();
    // "Bob Brown" starts with the query, "Anna Bobson" has a word starting
    // with it, the rest only match loosely or not at all.
    assert_eq!(names[0], "Bob Brown");
    assert_eq!(names[1], "Anna Bobson");
    assert_eq!(source.seen()[0].search_terms, vec!["bob"]);
    assert!(report.search.get("sorting").is_some());
}

#[tokio::test]
async fn client_filtering_drops_non_matching_rows() {
    let source = CannedSource::new(&[("Ann", "Lee"), ("Kim", "Park"), ("Joann", "Smith")]);
    let config = GridConfig {
        client_filtering: true,
        ..GridConfig::default()
    };
    let report = fetch_page(&source, "globalFilter=ann", &config).await.unwrap();

    let ids: Vec<u64> = report.rows.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn out_of_range_page_settles_on_last_page() {
    let names: Vec<(&str, &str)> = vec![("A", "A"); 15];
    let source = CannedSource::new(&names);
    let report = fetch_page(&source, "page=9", &GridConfig::default())
        .await
        .unwrap();

    assert_eq!(report.page_index, 1);
    assert_eq!(report.page_count, 2);
    assert_eq!(report.rows.len(), 5);
    assert_eq!(source.seen().len(), 2);
    insta::assert_snapshot!(report.search.to_query_string(), @"page=2");
}

#[tokio::test]
async fn server_failure_suggests_retry() {
    let mut source = CannedSource::new(&[("Ann", "Lee")]);
    source.failure = Some(503);
    let error = fetch_page(&source, "", &GridConfig::default())
        .await
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "fetch people (temporary failure, retrying may help)"
    );
    let cause = error.downcast_ref::<FetchError>().unwrap();
    assert!(matches!(cause, FetchError::Status { status: 503, .. }));
}

#[tokio::test]
async fn client_failure_has_no_retry_hint() {
    let mut source = CannedSource::new(&[("Ann", "Lee")]);
    source.failure = Some(404);
    let error = fetch_page(&source, "", &GridConfig::default())
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "fetch people");
    assert_eq!(source.seen().len(), 1);
}
