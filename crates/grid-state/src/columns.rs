//! Column model, per-column filtering and row sorting.

use std::borrow::Cow;
use std::cmp::Ordering;

use grid_model::{ColumnFilter, ColumnSort, FULL_NAME_COLUMN, GridState, Person};

use crate::rank::{compare_rankings, rank_item};

/// A grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    FirstName,
    LastName,
    FullName,
    Email,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 5] = [
        Column::Id,
        Column::FirstName,
        Column::LastName,
        Column::FullName,
        Column::Email,
    ];

    /// Column id as used in URL state.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::FullName => FULL_NAME_COLUMN,
            Self::Email => "email",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Header label.
    pub const fn header(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstName",
            Self::LastName => "Last Name",
            Self::FullName => "Full Name",
            Self::Email => "Email",
        }
    }

    /// Filter function bound to this column.
    pub const fn filter_fn(self) -> FilterFn {
        match self {
            Self::Id => FilterFn::EqualsString,
            Self::FirstName => FilterFn::IncludesStringSensitive,
            Self::LastName | Self::Email => FilterFn::IncludesString,
            Self::FullName => FilterFn::Fuzzy,
        }
    }

    /// Display value of this column for a row.
    pub fn value(self, person: &Person) -> Cow<'_, str> {
        match self {
            Self::Id => Cow::Owned(person.id.to_string()),
            Self::FirstName => Cow::Borrowed(&person.first_name),
            Self::LastName => Cow::Borrowed(&person.last_name),
            Self::FullName => Cow::Owned(person.full_name()),
            Self::Email => Cow::Borrowed(&person.email),
        }
    }
}

/// How a column filter value is matched against a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFn {
    /// Case-insensitive equality.
    EqualsString,
    /// Case-sensitive substring.
    IncludesStringSensitive,
    /// Case-insensitive substring.
    IncludesString,
    /// Fuzzy rank passes the subsequence threshold.
    Fuzzy,
}

impl FilterFn {
    pub fn matches(self, value: &str, filter: &str) -> bool {
        match self {
            Self::EqualsString => value.to_lowercase() == filter.to_lowercase(),
            Self::IncludesStringSensitive => value.contains(filter),
            Self::IncludesString => value.to_lowercase().contains(&filter.to_lowercase()),
            Self::Fuzzy => rank_item(value, filter).passed,
        }
    }
}

/// Whether a row passes every column filter. Unknown column ids are ignored.
pub fn row_matches_filters(person: &Person, filters: &[ColumnFilter]) -> bool {
    filters.iter().filter(|f| !f.value.is_empty()).all(|f| {
        Column::from_id(&f.id)
            .is_none_or(|column| column.filter_fn().matches(&column.value(person), &f.value))
    })
}

/// Whether any column fuzzy-matches the global filter.
pub fn row_matches_global(person: &Person, global_filter: &str) -> bool {
    global_filter.is_empty()
        || Column::ALL
            .into_iter()
            .any(|column| FilterFn::Fuzzy.matches(&column.value(person), global_filter))
}

/// Rows passing the state's column and global filters, in input order.
pub fn filter_rows(rows: &[Person], state: &GridState) -> Vec<Person> {
    rows.iter()
        .filter(|p| row_matches_filters(p, &state.column_filters))
        .filter(|p| row_matches_global(p, &state.global_filter))
        .cloned()
        .collect()
}

/// Stable multi-key sort of `rows`.
///
/// Fuzzy columns with an active filter compare by rank against that filter,
/// best match first; ties and unfiltered fuzzy columns fall back to
/// case-sensitive comparison of the display string. `id` compares
/// numerically. Unknown sort ids are ignored.
pub fn sort_rows(rows: &mut [Person], sorting: &[ColumnSort], filters: &[ColumnFilter]) {
    let keys: Vec<(Column, bool, Option<&str>)> = sorting
        .iter()
        .filter_map(|sort| {
            let column = Column::from_id(&sort.id)?;
            let filter = filters
                .iter()
                .find(|f| f.id == sort.id && !f.value.is_empty())
                .map(|f| f.value.as_str());
            Some((column, sort.desc, filter))
        })
        .collect();

    if keys.is_empty() {
        return;
    }

    rows.sort_by(|a, b| {
        for &(column, desc, filter) in &keys {
            let ordering = compare_by_column(column, filter, a, b);
            let ordering = if desc { ordering.reverse() } else { ordering };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn compare_by_column(column: Column, filter: Option<&str>, a: &Person, b: &Person) -> Ordering {
    match column {
        Column::Id => a.id.cmp(&b.id),
        _ => {
            let left = column.value(a);
            let right = column.value(b);
            let by_rank = match (column.filter_fn(), filter) {
                (FilterFn::Fuzzy, Some(query)) => {
                    compare_rankings(&rank_item(&left, query), &rank_item(&right, query))
                }
                _ => Ordering::Equal,
            };
            by_rank.then_with(|| left.cmp(&right))
        }
    }
}
