//! GitHub API data types.
//!
//! Raw wire shapes for the two sources the pipeline reads: the GraphQL
//! pinned-items query and the REST listing/search endpoints. Each struct
//! carries only the fields the pipeline needs, which keeps deserialization
//! resilient to API additions.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Language name to byte count, as reported by the per-repo languages
/// endpoint. BTreeMap keeps iteration deterministic, so equal byte counts
/// rank in name order.
pub type LanguageByteMap = BTreeMap<String, u64>;

/// Repository owner, shared by both wire shapes.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    /// Owner login (user or organization).
    pub login: String,
}

/// A pinned repository node from the GraphQL pinned-items query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedRepo {
    pub name: String,
    pub description: Option<String>,
    /// Canonical repository URL.
    pub url: String,
    pub homepage_url: Option<String>,
    pub stargazer_count: u32,
    pub fork_count: u32,
    pub updated_at: DateTime<Utc>,
    pub owner: RepoOwner,
}

impl PinnedRepo {
    /// REST languages endpoint for this repository. The GraphQL schema we
    /// query does not expose the language byte breakdown, so it is always
    /// resolved through REST.
    #[must_use]
    pub fn languages_url(&self, api_root: &str) -> String {
        format!("{}/repos/{}/{}/languages", api_root, self.owner.login, self.name)
    }
}

/// GraphQL response envelope.
///
/// GraphQL reports application-level failures in `errors` inside a 200
/// response; `data` may be null alongside them.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
}

/// `data` payload of the pinned-items query.
#[derive(Debug, Deserialize)]
pub struct PinnedItemsData {
    /// Null when the login does not exist.
    pub user: Option<PinnedItemsUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedItemsUser {
    pub pinned_items: PinnedItemsConnection,
}

#[derive(Debug, Deserialize)]
pub struct PinnedItemsConnection {
    /// Individual nodes may be null; callers skip those.
    #[serde(default)]
    pub nodes: Vec<Option<PinnedRepo>>,
}

/// A repository from the REST listing and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RestRepo {
    pub name: String,
    pub description: Option<String>,
    /// HTML URL to the repository.
    pub html_url: String,
    pub homepage: Option<String>,
    /// Primary language as reported by the platform; used as the fallback
    /// when the byte breakdown is unavailable.
    pub language: Option<String>,
    /// Fully-qualified languages endpoint for this repository.
    pub languages_url: String,
    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
    pub owner: RepoOwner,
}

/// Envelope of the repository search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub items: Vec<RestRepo>,
}
