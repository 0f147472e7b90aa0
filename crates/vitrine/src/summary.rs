//! Canonical output shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{PinnedRepo, RestRepo};
use crate::languages::LanguageEntry;

/// A normalized repository record, identical across all output artifacts.
///
/// Absent description/homepage serialize as explicit `null` so the schema
/// is uniform; field names are the wire contract of the consuming site and
/// deliberately mix cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "homepageUrl")]
    pub homepage_url: Option<String>,
    pub languages: Vec<LanguageEntry>,
    pub topics: Vec<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl RepoSummary {
    /// Normalize a pinned-item node. The pinned source exposes no topics
    /// field, so `topics` is always empty here.
    #[must_use]
    pub fn from_pinned(repo: &PinnedRepo, languages: Vec<LanguageEntry>) -> Self {
        Self {
            name: repo.name.clone(),
            description: repo.description.clone(),
            url: repo.url.clone(),
            homepage_url: repo.homepage_url.clone(),
            languages,
            topics: Vec::new(),
            stargazers_count: repo.stargazer_count,
            forks_count: repo.fork_count,
            updated_at: repo.updated_at,
        }
    }

    /// Normalize a REST listing/search record.
    #[must_use]
    pub fn from_rest(repo: &RestRepo, languages: Vec<LanguageEntry>) -> Self {
        Self {
            name: repo.name.clone(),
            description: repo.description.clone(),
            url: repo.html_url.clone(),
            homepage_url: repo.homepage.clone(),
            languages,
            topics: repo.topics.clone(),
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            updated_at: repo.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned_fixture() -> PinnedRepo {
        serde_json::from_value(serde_json::json!({
            "name": "voxel-forge",
            "description": null,
            "url": "https://github.com/jmreyes/voxel-forge",
            "homepageUrl": null,
            "stargazerCount": 42,
            "forkCount": 7,
            "updatedAt": "2024-11-02T10:00:00Z",
            "owner": { "login": "jmreyes" }
        }))
        .unwrap()
    }

    fn rest_fixture() -> RestRepo {
        serde_json::from_value(serde_json::json!({
            "name": "dotfiles",
            "description": "Machine setup",
            "html_url": "https://github.com/jmreyes/dotfiles",
            "homepage": "https://jmreyes.dev",
            "language": "Shell",
            "languages_url": "https://api.github.com/repos/jmreyes/dotfiles/languages",
            "fork": false,
            "topics": ["dotfiles", "nix"],
            "stargazers_count": 3,
            "forks_count": 1,
            "updated_at": "2023-06-15T08:30:00Z",
            "owner": { "login": "jmreyes" }
        }))
        .unwrap()
    }

    #[test]
    fn pinned_normalization_has_empty_topics() {
        let summary =
            RepoSummary::from_pinned(&pinned_fixture(), vec![LanguageEntry::new("Rust")]);
        assert!(summary.topics.is_empty());
        assert_eq!(summary.url, "https://github.com/jmreyes/voxel-forge");
        assert_eq!(summary.stargazers_count, 42);
        assert_eq!(summary.forks_count, 7);
    }

    #[test]
    fn rest_normalization_carries_topics_and_homepage() {
        let summary = RepoSummary::from_rest(&rest_fixture(), Vec::new());
        assert_eq!(summary.topics, vec!["dotfiles", "nix"]);
        assert_eq!(summary.homepage_url.as_deref(), Some("https://jmreyes.dev"));
        assert_eq!(summary.url, "https://github.com/jmreyes/dotfiles");
    }

    #[test]
    fn absent_optionals_serialize_as_explicit_null() {
        let summary = RepoSummary::from_pinned(&pinned_fixture(), Vec::new());
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value["description"].is_null());
        assert!(value["homepageUrl"].is_null());
        // Keys must be present, not omitted.
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("description"));
        assert!(obj.contains_key("homepageUrl"));
    }

    #[test]
    fn timestamps_round_trip_byte_identically() {
        let summary = RepoSummary::from_rest(&rest_fixture(), Vec::new());
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["updated_at"], "2023-06-15T08:30:00Z");
    }
}
