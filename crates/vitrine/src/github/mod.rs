//! GitHub API integration: client, raw wire types, and errors.

pub mod client;
pub mod error;
pub mod types;

pub use client::{GitHubClient, GITHUB_API, GITHUB_GRAPHQL};
pub use error::GitHubError;
pub use types::{
    GraphQlErrorEntry, GraphQlResponse, LanguageByteMap, PinnedItemsData, PinnedRepo, RepoOwner,
    RestRepo, SearchResults,
};
