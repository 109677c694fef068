//! Terminal tables for gridctl output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use grid_model::{ColumnSort, Person};
use grid_state::Column;

use crate::report::{PageReport, RankedCandidate, StateReport};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Grid rows with one column per grid column, sort markers in the header.
pub fn people_table(rows: &[Person], sorting: &[ColumnSort]) -> Table {
    let mut table = Table::new();
    table.set_header(
        Column::ALL
            .into_iter()
            .map(|column| header_cell(&column_label(column, sorting))),
    );
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for person in rows {
        table.add_row(
            Column::ALL
                .into_iter()
                .map(|column| Cell::new(column.value(person))),
        );
    }
    table
}

/// Key/value view of a decoded state and its derived query.
pub fn state_table(report: &StateReport) -> Table {
    let state = &report.state;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);

    let filters = state
        .column_filters
        .iter()
        .map(|f| format!("{}={}", f.id, f.value))
        .collect::<Vec<_>>()
        .join(", ");
    let sorting = state
        .sorting
        .iter()
        .map(|s| format!("{} {}", s.id, if s.desc { "desc" } else { "asc" }))
        .collect::<Vec<_>>()
        .join(", ");

    table.add_row(vec![Cell::new("global filter"), value_cell(&state.global_filter)]);
    table.add_row(vec![Cell::new("column filters"), value_cell(&filters)]);
    table.add_row(vec![Cell::new("sorting"), value_cell(&sorting)]);
    table.add_row(vec![
        Cell::new("page"),
        Cell::new(u64::from(state.page_index) + 1),
    ]);
    table.add_row(vec![Cell::new("page size"), Cell::new(state.page_size)]);
    table.add_row(vec![
        Cell::new("search"),
        value_cell(&report.query.search_query()),
    ]);
    table.add_row(vec![Cell::new("limit"), Cell::new(report.query.limit)]);
    table.add_row(vec![Cell::new("offset"), Cell::new(report.query.offset)]);
    table
}

pub fn ranking_table(ranked: &[RankedCandidate]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Candidate"),
        header_cell("Rank"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for entry in ranked {
        let matched = if entry.ranking.passed {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(&entry.candidate),
            Cell::new(format!("{:.3}", entry.ranking.rank)),
            matched,
        ]);
    }
    table
}

/// One-line pager summary, e.g. `Page 2 of 21 (208 people)`.
pub fn page_summary(report: &PageReport) -> String {
    format!(
        "Page {} of {} ({} {})",
        u64::from(report.page_index) + 1,
        report.page_count.max(1),
        report.total,
        if report.total == 1 { "person" } else { "people" }
    )
}

fn column_label(column: Column, sorting: &[ColumnSort]) -> String {
    match sorting.iter().find(|s| s.id == column.id()) {
        Some(sort) if sort.desc => format!("{} ▼", column.header()),
        Some(_) => format!("{} ▲", column.header()),
        None => column.header().to_string(),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        Cell::new("-").fg(Color::DarkGrey)
    } else {
        Cell::new(value)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
