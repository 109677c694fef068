//! Reports behind each gridctl command.
//!
//! Everything here is independent of the terminal so it can be tested
//! directly; `render` turns reports into tables.

use anyhow::{Context, Result, bail};
use grid_model::{GridState, Person, QuerySpec, SerializedState};
use grid_source::{DataSource, Fetched, run_fetch};
use grid_state::{
    GridAction, GridConfig, GridController, Ranking, compare_rankings, decode, derive_query,
    encode, enforce_full_name_sort, rank_item, reduce,
};
use tracing::{info, instrument, warn};

/// Fetch rounds allowed per command: the initial request plus follow-ups
/// after a page clamp.
const MAX_FETCH_ROUNDS: usize = 3;

/// Decoded (and possibly transformed) grid state.
#[derive(Debug, Clone)]
pub struct StateReport {
    pub state: GridState,
    pub query: QuerySpec,
    /// Canonical URL form of `state`.
    pub search: SerializedState,
    /// Whether `search` differs from the input.
    pub changed: bool,
}

/// Decode `query`, apply `actions` in order and describe the result.
pub fn inspect_state(
    query: &str,
    actions: impl IntoIterator<Item = GridAction>,
    total: Option<u64>,
) -> StateReport {
    let input = SerializedState::from_query_string(query);
    let state = actions
        .into_iter()
        .fold(enforce_full_name_sort(decode(&input)), |state, action| {
            reduce(state, action, total)
        });
    let search = encode(&state);
    StateReport {
        query: derive_query(&state),
        changed: search != input,
        search,
        state,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub candidate: String,
    pub ranking: Ranking,
}

/// Rank `candidates` against `query`, best first, ties in string order.
///
/// Candidates below the match threshold are dropped unless `include_misses`.
pub fn rank_candidates(
    query: &str,
    candidates: impl IntoIterator<Item = String>,
    include_misses: bool,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|candidate| RankedCandidate {
            ranking: rank_item(&candidate, query),
            candidate,
        })
        .filter(|r| include_misses || r.ranking.passed)
        .collect();
    ranked.sort_by(|a, b| {
        compare_rankings(&a.ranking, &b.ranking).then_with(|| a.candidate.cmp(&b.candidate))
    });
    ranked
}

/// One fetched page as the grid would show it.
#[derive(Debug, Clone)]
pub struct PageReport {
    /// Canonical URL form of the final state.
    pub search: SerializedState,
    pub query: QuerySpec,
    pub rows: Vec<Person>,
    pub total: u64,
    pub page_index: u32,
    pub page_count: u64,
}

/// Run a grid activation for `query` against `source` until the page settles.
///
/// # Errors
///
/// Returns the source error when a fetch fails, noting when the failure is
/// one a retry may get past.
#[instrument(skip(source, config))]
pub async fn fetch_page<S: DataSource>(
    source: &S,
    query: &str,
    config: &GridConfig,
) -> Result<PageReport> {
    let (mut controller, effects) =
        GridController::activate(&SerializedState::from_query_string(query), config);
    if let Some(navigation) = &effects.navigate {
        info!(search = %navigation.search.to_query_string(), "normalized URL state");
    }

    let mut pending = effects.fetch;
    let mut rounds = 0;
    while let Some(request) = pending.take() {
        rounds += 1;
        if rounds > MAX_FETCH_ROUNDS {
            bail!("page did not settle after {MAX_FETCH_ROUNDS} fetches");
        }
        let Fetched { seq, result } = run_fetch(source, request).await;
        match result {
            Ok(page) => {
                let effects = controller.resolve::<String>(seq, Ok(page));
                if let Some(navigation) = &effects.navigate {
                    info!(search = %navigation.search.to_query_string(), "page clamped");
                }
                pending = effects.fetch;
            }
            Err(error) => {
                let retryable = error.is_retryable();
                warn!(error = %error, retryable, message = error.user_message(), "fetch failed");
                let hint = if retryable {
                    " (temporary failure, retrying may help)"
                } else {
                    ""
                };
                return Err(error).context(format!("fetch people{hint}"));
            }
        }
    }

    let total = controller.status().page().map_or(0, |page| page.total);
    Ok(PageReport {
        search: encode(controller.state()),
        query: controller.query(),
        rows: controller.visible_rows(),
        total,
        page_index: controller.state().page_index,
        page_count: controller.page_count().unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use grid_model::{ColumnSort, FULL_NAME_COLUMN};

    use super::*;

    #[test]
    fn inspect_state_applies_actions_in_order() {
        let report = inspect_state(
            "?page=4",
            [
                GridAction::SetColumnFilter {
                    id: "lastName".into(),
                    value: "smith".into(),
                },
                GridAction::GoToPage(1),
            ],
            None,
        );
        assert_eq!(report.state.page_index, 1);
        assert_eq!(report.query.search_terms, vec!["smith"]);
        assert_eq!(report.query.offset, 10);
        assert!(report.changed);
    }

    #[test]
    fn inspect_state_reports_canonical_input_unchanged() {
        let report = inspect_state("globalFilter=ann&pageSize=20", [], None);
        assert!(!report.changed);
        insta::assert_snapshot!(report.search.to_query_string(), @"globalFilter=ann&pageSize=20");
    }

    #[test]
    fn inspect_state_applies_full_name_coupling() {
        let report = inspect_state(
            "",
            [GridAction::SetColumnFilter {
                id: FULL_NAME_COLUMN.into(),
                value: "ann".into(),
            }],
            None,
        );
        assert_eq!(report.state.sorting, vec![ColumnSort::asc(FULL_NAME_COLUMN)]);
    }

    #[test]
    fn ranking_orders_best_first_with_string_tie_break() {
        let candidates = ["Bob Smith", "Ann Lee", "Annie Hall", "Dan Ann", "Zed"]
            .map(String::from);
        let ranked = rank_candidates("ann", candidates, false);
        let names: Vec<&str> = ranked.iter().map(|r| r.candidate.as_str()).collect();
        assert_eq!(names, vec!["Ann Lee", "Annie Hall", "Dan Ann"]);
    }

    #[test]
    fn ranking_can_keep_misses() {
        let ranked = rank_candidates("xyz", vec!["abc".to_string()], true);
        assert_eq!(ranked.len(), 1);
        assert!(!ranked[0].ranking.passed);
    }
}
