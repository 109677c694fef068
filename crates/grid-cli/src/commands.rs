//! Command implementations for `gridctl`.

use anyhow::{Context, Result};
use grid_model::PAGE_SIZE_OPTIONS;
use grid_source::DummyJsonSource;
use grid_state::{GridAction, GridConfig};
use tracing::{info, warn};

use grid_cli::render::{page_summary, people_table, ranking_table, state_table};
use grid_cli::report::{fetch_page, inspect_state, rank_candidates};

use crate::cli::{ActionArgs, FetchArgs, RankArgs, StateArgs};

pub fn run_state(args: StateArgs) -> Result<()> {
    let report = inspect_state(&args.query, actions_from_args(args.actions), args.total);
    println!("{}", state_table(&report));
    let search = report.search.to_query_string();
    if search.is_empty() {
        println!("URL: (default state)");
    } else {
        println!("URL: ?{search}");
    }
    if report.changed {
        println!("(URL rewritten)");
    }
    Ok(())
}

pub fn run_rank(args: RankArgs) -> Result<()> {
    let ranked = rank_candidates(&args.query, args.candidates, args.all);
    if ranked.is_empty() {
        println!("No candidates match `{}`.", args.query);
        return Ok(());
    }
    println!("{}", ranking_table(&ranked));
    Ok(())
}

pub fn run_fetch(args: &FetchArgs, mut config: GridConfig) -> Result<()> {
    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    config.client_filtering |= args.client_filter;

    let source = DummyJsonSource::from_config(&config).context("create people source")?;
    info!(base_url = source.base_url(), "fetching people");
    let runtime = runtime()?;
    let report = runtime.block_on(fetch_page(&source, &args.query, &config))?;

    let sorting = grid_state::decode(&report.search).sorting;
    println!("{}", people_table(&report.rows, &sorting));
    println!("{}", page_summary(&report));
    Ok(())
}

pub fn run_people(config: &GridConfig) -> Result<()> {
    let source = DummyJsonSource::from_config(config).context("create people source")?;
    let runtime = runtime()?;
    let page = runtime
        .block_on(source.list_people())
        .context("list people")?;
    println!("{}", people_table(&page.rows, &[]));
    println!("Showing {} of {} people", page.rows.len(), page.total);
    Ok(())
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")
}

/// Actions in application order: reset, filters, sorting, page size, page.
fn actions_from_args(args: ActionArgs) -> Vec<GridAction> {
    let mut actions = Vec::new();
    if args.reset_filters {
        actions.push(GridAction::ResetFilters);
    }
    if let Some(text) = args.global_filter {
        actions.push(GridAction::SetGlobalFilter(text));
    }
    actions.extend(args.filters.into_iter().map(|filter| GridAction::SetColumnFilter {
        id: filter.id,
        value: filter.value,
    }));
    if args.no_sort {
        actions.push(GridAction::SetSorting(Vec::new()));
    } else if !args.sorting.is_empty() {
        actions.push(GridAction::SetSorting(args.sorting));
    }
    if let Some(size) = args.page_size {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            warn!(size, options = ?PAGE_SIZE_OPTIONS, "page size is not one of the grid's options");
        }
        actions.push(GridAction::SetPageSize(size));
    }
    if let Some(page) = args.page {
        actions.push(GridAction::GoToPage(page.saturating_sub(1)));
    }
    actions
}
