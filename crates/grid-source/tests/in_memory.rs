//! Drives the controller against an in-memory source.

use std::time::Duration;

use grid_model::{PeoplePage, Person, QuerySpec, SerializedState};
use grid_source::{DataSource, FetchError, run_fetch};
use grid_state::{GridAction, GridConfig, GridController};

/// Serves pages from a fixed list; requests with a non-zero offset are
/// delayed so they can be overtaken.
struct InMemorySource {
    people: Vec<Person>,
    slow_offset: Option<u64>,
}

impl InMemorySource {
    fn new(count: u64) -> Self {
        let people = (1..=count)
            .map(|id| Person {
                id,
                first_name: format!("First{id}"),
                last_name: format!("Last{id}"),
                email: format!("user{id}@example.com"),
            })
            .collect();
        Self {
            people,
            slow_offset: None,
        }
    }
}

impl DataSource for InMemorySource {
    async fn fetch(&self, query: &QuerySpec) -> Result<PeoplePage, FetchError> {
        if self.slow_offset == Some(query.offset) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        let search = query.search_query().to_lowercase();
        let matching: Vec<&Person> = self
            .people
            .iter()
            .filter(|p| search.is_empty() || p.full_name().to_lowercase().contains(&search))
            .collect();
        let skip = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let rows = matching
            .iter()
            .skip(skip)
            .take(query.limit as usize)
            .map(|p| (*p).clone())
            .collect();
        Ok(PeoplePage {
            rows,
            total: matching.len() as u64,
        })
    }
}

#[tokio::test]
async fn first_fetch_populates_rows() {
    let source = InMemorySource::new(25);
    let (mut controller, effects) = GridController::activate(
        &SerializedState::from_query_string("page=3"),
        &GridConfig::default(),
    );

    let fetched = run_fetch(&source, effects.fetch.unwrap()).await;
    controller.resolve(fetched.seq, fetched.result);

    let ids: Vec<u64> = controller.visible_rows().iter().map(|p| p.id).collect();
    assert_eq!(ids, (21..=25).collect::<Vec<_>>());
    assert_eq!(controller.page_count(), Some(3));
}

#[tokio::test]
async fn overtaken_request_is_discarded() {
    let mut source = InMemorySource::new(30);
    source.slow_offset = Some(0);
    let (mut controller, effects) =
        GridController::activate(&SerializedState::new(), &GridConfig::default());

    let first = effects.fetch.unwrap();
    let second = controller.dispatch(GridAction::NextPage).fetch.unwrap();

    let (a, b) = tokio::join!(run_fetch(&source, first), run_fetch(&source, second));
    // Apply in arrival order: the fast second request lands first.
    controller.resolve(b.seq, b.result);
    controller.resolve(a.seq, a.result);

    assert_eq!(controller.visible_rows()[0].id, 11);
    assert_eq!(controller.state().page_index, 1);
}

#[tokio::test]
async fn past_the_end_page_is_clamped_and_refetched() {
    let source = InMemorySource::new(12);
    let (mut controller, effects) = GridController::activate(
        &SerializedState::from_query_string("page=7"),
        &GridConfig::default(),
    );

    let fetched = run_fetch(&source, effects.fetch.unwrap()).await;
    let effects = controller.resolve(fetched.seq, fetched.result);
    assert_eq!(controller.state().page_index, 1);
    assert_eq!(
        effects.navigate.unwrap().search.to_query_string(),
        "page=2"
    );

    let fetched = run_fetch(&source, effects.fetch.unwrap()).await;
    controller.resolve(fetched.seq, fetched.result);
    let ids: Vec<u64> = controller.visible_rows().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![11, 12]);
}
