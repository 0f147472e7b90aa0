//! GitHub API client.
//!
//! A thin authenticated wrapper over the [`HttpTransport`] boundary with
//! two operations: JSON GET against the REST API and GraphQL POST. No
//! retries and no pagination walking; callers decide fallback behavior.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::GitHubError;
use super::types::GraphQlResponse;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// REST API root.
pub const GITHUB_API: &str = "https://api.github.com";

/// GraphQL endpoint.
pub const GITHUB_GRAPHQL: &str = "https://api.github.com/graphql";

/// User agent sent with every request; GitHub rejects requests without one.
const USER_AGENT: &str = "vitrine";

/// Request timeout for the default transport.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub API client.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client backed by a real reqwest transport.
    pub fn new(token: Option<String>) -> Result<Self, GitHubError> {
        let transport = ReqwestTransport::with_timeout(REQUEST_TIMEOUT)?;
        Ok(Self::with_transport(token, Arc::new(transport)))
    }

    /// Create a client over an explicit transport. Tests use this with an
    /// in-memory mock.
    pub fn with_transport(token: Option<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport, token }
    }

    fn base_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Accept".to_string(), "application/vnd.github+json".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    fn decode<T: DeserializeOwned>(url: &str, response: &HttpResponse) -> Result<T, GitHubError> {
        serde_json::from_slice(&response.body).map_err(|source| GitHubError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// GET a REST endpoint and deserialize its JSON body.
    ///
    /// Non-2xx statuses fail with [`GitHubError::Status`] carrying the
    /// status code, reason phrase, and URL.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GitHubError> {
        let response = self
            .transport
            .send(HttpRequest {
                method: HttpMethod::Get,
                url: url.to_string(),
                headers: self.base_headers(),
                body: None,
            })
            .await?;

        if !response.is_success() {
            return Err(GitHubError::status(response.status, url));
        }

        Self::decode(url, &response)
    }

    /// POST a GraphQL query and return the deserialized `data` payload.
    ///
    /// A non-empty `errors` array fails with [`GitHubError::GraphQl`] even
    /// when the HTTP status was 200.
    pub async fn post_graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, GitHubError> {
        let payload = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let mut headers = self.base_headers();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));

        let response = self
            .transport
            .send(HttpRequest {
                method: HttpMethod::Post,
                url: GITHUB_GRAPHQL.to_string(),
                headers,
                body: Some(payload.to_string().into_bytes()),
            })
            .await?;

        if !response.is_success() {
            return Err(GitHubError::status(response.status, GITHUB_GRAPHQL));
        }

        let envelope: GraphQlResponse<T> = Self::decode(GITHUB_GRAPHQL, &response)?;
        if !envelope.errors.is_empty() {
            return Err(GitHubError::GraphQl {
                messages: envelope.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        envelope.data.ok_or_else(|| GitHubError::GraphQl {
            messages: vec!["response carried no data".to_string()],
        })
    }
}
