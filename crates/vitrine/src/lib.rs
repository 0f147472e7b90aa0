//! Vitrine - GitHub footprint aggregation.
//!
//! Aggregates an account's public GitHub footprint (pinned projects,
//! recently-updated personal repositories, recent external contributions)
//! into normalized JSON artifacts consumed at site-build time.
//!
//! # Example
//!
//! ```ignore
//! use vitrine::{generate, GenerateOptions, GitHubClient};
//!
//! let client = GitHubClient::new(Some(token))?;
//! let report = generate(&client, "jmreyes", "public".as_ref(), &GenerateOptions::default()).await?;
//! println!("{} pinned repos", report.pinned);
//! ```

pub mod aggregate;
pub mod artifact;
pub mod fanout;
pub mod github;
pub mod http;
pub mod languages;
pub mod summary;

pub use aggregate::{generate, GenerateError, GenerateOptions, GenerateReport};
pub use artifact::{
    ArtifactError, HeroLanguagesDoc, CONTRIBUTIONS_FILE, HERO_LANGUAGES_FILE, PINNED_REPOS_FILE,
};
pub use fanout::map_bounded;
pub use github::{GitHubClient, GitHubError};
pub use languages::{select_languages, LanguageEntry};
pub use summary::RepoSummary;
