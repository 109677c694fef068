//! Tiered fuzzy ranking.
//!
//! A candidate is ranked against a query by the best tier it reaches:
//!
//! | Tier                      | Rank        |
//! |---------------------------|-------------|
//! | case-sensitive equal      | 7           |
//! | equal (case-insensitive)  | 6           |
//! | starts with               | 5           |
//! | a word starts with        | 4           |
//! | contains                  | 3           |
//! | acronym contains          | 2           |
//! | in-order subsequence      | 1 .. 2      |
//! | no match                  | 0           |
//!
//! Subsequence matches add `1 / spread` to the base tier, where `spread` is
//! the distance between the first and last matched character, so compact
//! matches outrank scattered ones.

use std::cmp::Ordering;

/// Rank values per tier.
pub mod tier {
    pub const CASE_SENSITIVE_EQUAL: f64 = 7.0;
    pub const EQUAL: f64 = 6.0;
    pub const STARTS_WITH: f64 = 5.0;
    pub const WORD_STARTS_WITH: f64 = 4.0;
    pub const CONTAINS: f64 = 3.0;
    pub const ACRONYM: f64 = 2.0;
    pub const MATCHES: f64 = 1.0;
    pub const NO_MATCH: f64 = 0.0;
}

/// Result of ranking one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranking {
    /// Tier value, see [`tier`].
    pub rank: f64,
    /// Whether the rank reaches the subsequence tier.
    pub passed: bool,
}

impl Ranking {
    pub fn no_match() -> Self {
        Self {
            rank: tier::NO_MATCH,
            passed: false,
        }
    }
}

/// Rank `candidate` against `query`.
pub fn rank_item(candidate: &str, query: &str) -> Ranking {
    let rank = match_rank(candidate, query);
    Ranking {
        rank,
        passed: rank >= tier::MATCHES,
    }
}

/// Order two rankings best first. Equal ranks compare equal.
pub fn compare_rankings(a: &Ranking, b: &Ranking) -> Ordering {
    b.rank.total_cmp(&a.rank)
}

fn match_rank(candidate: &str, query: &str) -> f64 {
    if query.chars().count() > candidate.chars().count() {
        return tier::NO_MATCH;
    }
    if candidate == query {
        return tier::CASE_SENSITIVE_EQUAL;
    }

    let candidate = candidate.to_lowercase();
    let query = query.to_lowercase();

    if candidate == query {
        return tier::EQUAL;
    }
    if candidate.starts_with(&query) {
        return tier::STARTS_WITH;
    }
    if candidate.contains(&format!(" {query}")) {
        return tier::WORD_STARTS_WITH;
    }
    if candidate.contains(&query) {
        return tier::CONTAINS;
    }
    if query.chars().count() == 1 {
        return tier::NO_MATCH;
    }
    if acronym(&candidate).contains(&query) {
        return tier::ACRONYM;
    }

    closeness_rank(&candidate, &query)
}

/// First letter of every word, splitting on spaces and hyphens.
fn acronym(s: &str) -> String {
    s.split(' ')
        .flat_map(|word| word.split('-'))
        .filter_map(|part| part.chars().next())
        .collect()
}

fn closeness_rank(candidate: &str, query: &str) -> f64 {
    let haystack: Vec<char> = candidate.chars().collect();
    let needle: Vec<char> = query.chars().collect();

    // 1-based position just past the match, searching from `from`.
    let find = |c: char, from: usize| -> Option<usize> {
        haystack
            .get(from..)?
            .iter()
            .position(|&h| h == c)
            .map(|i| from + i + 1)
    };

    let Some((&first_char, rest)) = needle.split_first() else {
        return tier::NO_MATCH;
    };
    let Some(first) = find(first_char, 0) else {
        return tier::NO_MATCH;
    };

    let mut last = first;
    let mut in_order = 1usize;
    for &c in rest {
        match find(c, last) {
            Some(position) => {
                last = position;
                in_order += 1;
            }
            None => return tier::NO_MATCH,
        }
    }

    let spread = (last - first).max(1) as f64;
    let in_order_ratio = in_order as f64 / needle.len() as f64;
    tier::MATCHES + in_order_ratio * (1.0 / spread)
}
