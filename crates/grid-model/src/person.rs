//! Records returned by the people listing.

use serde::{Deserialize, Serialize};

/// One person row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Person {
    /// Display value of the `fullName` column.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeoplePage {
    /// Rows of the requested page, at most `limit` of them.
    pub rows: Vec<Person>,
    /// Number of matching rows irrespective of pagination.
    pub total: u64,
}

impl PeoplePage {
    /// Number of pages of `limit` rows needed to show `total` rows.
    pub fn page_count(&self, limit: u32) -> u64 {
        if limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_with_space() {
        let person = Person {
            id: 1,
            first_name: "Emily".to_string(),
            last_name: "Johnson".to_string(),
            email: "emily.johnson@x.dummyjson.com".to_string(),
        };
        assert_eq!(person.full_name(), "Emily Johnson");
    }

    #[test]
    fn page_count_rounds_up() {
        let page = PeoplePage {
            rows: Vec::new(),
            total: 208,
        };
        assert_eq!(page.page_count(10), 21);
        assert_eq!(page.page_count(0), 0);
        assert_eq!(PeoplePage::default().page_count(10), 0);
    }

    #[test]
    fn person_reads_camel_case_and_ignores_extra_fields() {
        let json = r#"{"id":3,"firstName":"Sophia","lastName":"Brown","email":"s@b.com","age":42}"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.first_name, "Sophia");
        assert_eq!(person.id, 3);
    }
}
