//! GitHub API error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors surfaced by [`GitHubClient`](super::GitHubClient).
///
/// `Status` carries the HTTP status code, its canonical reason phrase, and
/// the request URL so top-level failures are diagnosable from the message
/// alone. GraphQL reports application-level errors inside a 200 response;
/// those surface as `GraphQl`.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("{status} {status_text} ({url})")]
    Status {
        status: u16,
        status_text: String,
        url: String,
    },

    #[error("GraphQL error: {}", messages.join("; "))]
    GraphQl { messages: Vec<String> },

    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GitHubError {
    /// Build a `Status` error, resolving the canonical reason phrase.
    pub(crate) fn status(status: u16, url: &str) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();
        GitHubError::Status {
            status,
            status_text,
            url: url.to_string(),
        }
    }
}
