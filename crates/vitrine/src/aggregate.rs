//! The aggregation pipeline.
//!
//! Three linear flows run one after another, each `fetch list -> filter ->
//! truncate -> fan-out language resolve -> normalize -> write`: pinned
//! projects (GraphQL), recent personal repositories (REST listing, feeding
//! the hero language set), and recent external contributions (REST search).
//! Flows are independent; running them sequentially keeps the total number
//! of simultaneous requests bounded and predictable.

use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::artifact::{
    ensure_dir, write_json, ArtifactError, HeroLanguagesDoc, CONTRIBUTIONS_FILE,
    HERO_LANGUAGES_FILE, PINNED_REPOS_FILE,
};
use crate::fanout::map_bounded;
use crate::github::{
    GitHubClient, GitHubError, LanguageByteMap, PinnedItemsData, PinnedRepo, RestRepo,
    SearchResults, GITHUB_API,
};
use crate::languages::{select_languages, LanguageEntry, TOP_LANGUAGES_PER_REPO};
use crate::summary::RepoSummary;

/// Most recently updated non-fork personal repos feeding the hero set.
pub const RECENT_PERSONAL_REPOS_FOR_HERO: usize = 3;

/// Most recent external contributions kept.
pub const RECENT_CONTRIBUTIONS: usize = 3;

/// In-flight cap for per-repository language lookups. Kept low to stay
/// clear of secondary rate limits.
pub const LANGUAGE_FANOUT: usize = 6;

/// Page size for the REST listing and search calls.
pub const REST_PAGE_SIZE: u32 = 100;

/// Pinned-items query. The schema exposes no language breakdown on pinned
/// nodes, so languages are resolved through REST afterwards.
const PINNED_QUERY: &str = r#"
query ($login: String!) {
  user(login: $login) {
    pinnedItems(first: 6, types: [REPOSITORY]) {
      nodes {
        ... on Repository {
          name
          description
          url
          homepageUrl
          stargazerCount
          forkCount
          updatedAt
          owner { login }
        }
      }
    }
  }
}
"#;

/// Knobs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// In-flight cap for language lookups.
    pub fanout: usize,
    /// Languages kept per repository.
    pub top_languages: usize,
    /// Personal repos feeding the hero language set.
    pub hero_repos: usize,
    /// External contributions kept.
    pub contributions: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            fanout: LANGUAGE_FANOUT,
            top_languages: TOP_LANGUAGES_PER_REPO,
            hero_repos: RECENT_PERSONAL_REPOS_FOR_HERO,
            contributions: RECENT_CONTRIBUTIONS,
        }
    }
}

/// Counts per written artifact, for the caller's summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub pinned: usize,
    pub hero_languages: usize,
    pub contributed: usize,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Fetch(#[from] GitHubError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Fetch the account's pinned repositories. Null nodes (non-repository
/// pinned items) are skipped. A GraphQL failure here is fatal for the run.
pub async fn fetch_pinned(
    client: &GitHubClient,
    username: &str,
) -> Result<Vec<PinnedRepo>, GitHubError> {
    let data: PinnedItemsData = client
        .post_graphql(PINNED_QUERY, serde_json::json!({ "login": username }))
        .await?;

    Ok(data
        .user
        .map(|user| user.pinned_items.nodes)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect())
}

/// List the account's most recently updated non-fork repositories.
pub async fn recent_personal_repos(
    client: &GitHubClient,
    username: &str,
    limit: usize,
) -> Result<Vec<RestRepo>, GitHubError> {
    let url = format!("{GITHUB_API}/users/{username}/repos?per_page={REST_PAGE_SIZE}&sort=updated");
    let repos: Vec<RestRepo> = client.get_json(&url).await?;
    Ok(repos.into_iter().filter(|r| !r.fork).take(limit).collect())
}

/// Search the most recently updated repositories the account contributed
/// to, excluding the account's own (contributor search surfaces those too).
pub async fn recent_contributions(
    client: &GitHubClient,
    username: &str,
    limit: usize,
) -> Result<Vec<RestRepo>, GitHubError> {
    let url = format!(
        "{GITHUB_API}/search/repositories?q=contributor:{username}&sort=updated&per_page={REST_PAGE_SIZE}"
    );
    let results: SearchResults = client.get_json(&url).await?;
    Ok(results
        .items
        .into_iter()
        .filter(|r| r.owner.login != username)
        .take(limit)
        .collect())
}

/// Resolve one repository's ranked language list.
///
/// A lookup failure degrades to the reported primary language (or nothing)
/// instead of aborting the run.
async fn resolve_languages(
    client: &GitHubClient,
    url: &str,
    fallback: Option<&str>,
    max: usize,
) -> Vec<LanguageEntry> {
    match client.get_json::<LanguageByteMap>(url).await {
        Ok(bytes) => select_languages(&bytes, fallback, max),
        Err(err) => {
            warn!(url, error = %err, "language lookup failed, using primary language");
            match fallback {
                Some(name) => vec![LanguageEntry::new(name)],
                None => Vec::new(),
            }
        }
    }
}

/// Normalize pinned nodes, resolving each node's languages through the
/// bounded fan-out. Pinned nodes report no primary language, so there is
/// no fallback.
pub async fn pinned_summaries(
    client: &GitHubClient,
    pinned: Vec<PinnedRepo>,
    options: &GenerateOptions,
) -> Vec<RepoSummary> {
    let client = client.clone();
    let max = options.top_languages;
    map_bounded(pinned, options.fanout, move |repo| {
        let client = client.clone();
        async move {
            let url = repo.languages_url(GITHUB_API);
            let languages = resolve_languages(&client, &url, None, max).await;
            RepoSummary::from_pinned(&repo, languages)
        }
    })
    .await
}

/// Normalize REST records, resolving languages with the repo's reported
/// primary language as fallback.
pub async fn rest_summaries(
    client: &GitHubClient,
    repos: Vec<RestRepo>,
    options: &GenerateOptions,
) -> Vec<RepoSummary> {
    let client = client.clone();
    let max = options.top_languages;
    map_bounded(repos, options.fanout, move |repo| {
        let client = client.clone();
        async move {
            let languages = resolve_languages(
                &client,
                &repo.languages_url,
                repo.language.as_deref(),
                max,
            )
            .await;
            RepoSummary::from_rest(&repo, languages)
        }
    })
    .await
}

/// The deduplicated union of every resolved language name across the given
/// summaries, sorted lexicographically. This is a set union over the
/// per-repo ranked lists, not a concatenation.
pub fn hero_languages(summaries: &[RepoSummary]) -> Vec<LanguageEntry> {
    let names: BTreeSet<&str> = summaries
        .iter()
        .flat_map(|s| s.languages.iter())
        .map(|l| l.name.as_str())
        .collect();
    names.into_iter().map(LanguageEntry::new).collect()
}

/// Run the full pipeline and write the three artifacts into `out_dir`.
///
/// Flows run sequentially; each artifact is written as soon as its flow
/// completes, so a later failure does not roll back earlier files.
pub async fn generate(
    client: &GitHubClient,
    username: &str,
    out_dir: &Path,
    options: &GenerateOptions,
) -> Result<GenerateReport, GenerateError> {
    ensure_dir(out_dir)?;

    let pinned = fetch_pinned(client, username).await?;
    info!(count = pinned.len(), "fetched pinned repositories");
    let pinned_docs = pinned_summaries(client, pinned, options).await;
    write_json(out_dir, PINNED_REPOS_FILE, &pinned_docs)?;

    let personal = recent_personal_repos(client, username, options.hero_repos).await?;
    info!(count = personal.len(), "fetched recent personal repositories");
    let personal_docs = rest_summaries(client, personal, options).await;
    let hero = hero_languages(&personal_docs);
    write_json(
        out_dir,
        HERO_LANGUAGES_FILE,
        &HeroLanguagesDoc {
            languages: hero.clone(),
        },
    )?;

    let contributed = recent_contributions(client, username, options.contributions).await?;
    info!(count = contributed.len(), "fetched recent contributions");
    let contributed_docs = rest_summaries(client, contributed, options).await;
    write_json(out_dir, CONTRIBUTIONS_FILE, &contributed_docs)?;

    Ok(GenerateReport {
        pinned: pinned_docs.len(),
        hero_languages: hero.len(),
        contributed: contributed_docs.len(),
    })
}
