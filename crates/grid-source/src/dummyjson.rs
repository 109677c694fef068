//! DummyJSON users API client.
//!
//! `GET {base}/users` lists everyone; `GET {base}/users/search?q=...` runs a
//! free-text search. Both take `limit` and `skip` and answer with
//! `{users, total, skip, limit}`.

use std::time::Duration;

use grid_model::{PeoplePage, Person, QuerySpec};
use grid_state::GridConfig;
use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{FetchError, Result};
use crate::source::DataSource;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("grid-source/", env!("CARGO_PKG_VERSION"));

/// HTTP source backed by the DummyJSON users API.
#[derive(Debug, Clone)]
pub struct DummyJsonSource {
    client: reqwest::Client,
    base_url: String,
}

impl DummyJsonSource {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self> {
        Self::new(config.base_url.as_str(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for `query`: the search endpoint when it carries search terms,
    /// the plain list otherwise.
    pub fn request_url(&self, query: &QuerySpec) -> Result<Url> {
        let search = query.search_query();
        let limit = query.limit.to_string();
        let skip = query.offset.to_string();
        let mut params = vec![("limit", limit.as_str()), ("skip", skip.as_str())];

        let endpoint = if search.is_empty() {
            format!("{}/users", self.base_url)
        } else {
            params.push(("q", search.as_str()));
            format!("{}/users/search", self.base_url)
        };

        Url::parse_with_params(&endpoint, &params)
            .map_err(|source| FetchError::InvalidUrl { url: endpoint, source })
    }

    /// Fetch the default, unfiltered listing.
    pub async fn list_people(&self) -> Result<PeoplePage> {
        let endpoint = format!("{}/users", self.base_url);
        let url = Url::parse(&endpoint)
            .map_err(|source| FetchError::InvalidUrl { url: endpoint, source })?;
        self.get(url).await
    }

    async fn get(&self, url: Url) -> Result<PeoplePage> {
        debug!("Fetching people from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_page(&body)
    }
}

impl DataSource for DummyJsonSource {
    async fn fetch(&self, query: &QuerySpec) -> Result<PeoplePage> {
        let url = self.request_url(query)?;
        let mut page = self.get(url).await?;

        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        if page.rows.len() > limit {
            warn!(
                rows = page.rows.len(),
                limit, "source returned more rows than requested, truncating"
            );
            page.rows.truncate(limit);
        }
        Ok(page)
    }
}

/// Response body of both user endpoints.
#[derive(Debug, Deserialize)]
struct UsersResponse {
    users: Vec<Person>,
    total: u64,
    #[serde(default)]
    skip: u64,
    #[serde(default)]
    limit: u64,
}

fn parse_page(body: &str) -> Result<PeoplePage> {
    let response: UsersResponse = serde_json::from_str(body).map_err(FetchError::Decode)?;
    debug!(
        rows = response.users.len(),
        total = response.total,
        skip = response.skip,
        limit = response.limit,
        "decoded users response"
    );
    Ok(PeoplePage {
        rows: response.users,
        total: response.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> DummyJsonSource {
        DummyJsonSource::new(base, Duration::from_secs(5)).unwrap()
    }

    fn query(terms: &[&str], limit: u32, offset: u64) -> QuerySpec {
        QuerySpec {
            search_terms: terms.iter().map(ToString::to_string).collect(),
            limit,
            offset,
        }
    }

    #[test]
    fn plain_list_url() {
        let url = source("https://dummyjson.com/")
            .request_url(&query(&[], 20, 40))
            .unwrap();
        assert_eq!(url.as_str(), "https://dummyjson.com/users?limit=20&skip=40");
    }

    #[test]
    fn search_url_joins_terms() {
        let url = source("https://dummyjson.com")
            .request_url(&query(&["johnson", "emily"], 10, 0))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://dummyjson.com/users/search?limit=10&skip=0&q=johnson+emily"
        );
    }

    #[test]
    fn blank_terms_use_plain_list() {
        let url = source("https://dummyjson.com")
            .request_url(&query(&["  "], 10, 0))
            .unwrap();
        assert_eq!(url.path(), "/users");
    }

    #[test]
    fn bad_base_url_is_reported() {
        let err = source("not a url").request_url(&query(&[], 10, 0)).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn parses_users_response() {
        let body = r#"{
            "users": [
                {"id": 1, "firstName": "Emily", "lastName": "Johnson",
                 "email": "emily.johnson@x.dummyjson.com", "age": 28},
                {"id": 2, "firstName": "Michael", "lastName": "Williams",
                 "email": "michael.williams@x.dummyjson.com"}
            ],
            "total": 208,
            "skip": 0,
            "limit": 2
        }"#;
        let page = parse_page(body).unwrap();
        assert_eq!(page.total, 208);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[0].full_name(), "Emily Johnson");
    }

    #[test]
    fn rejects_unexpected_body() {
        let err = parse_page(r#"{"message": "oops"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
