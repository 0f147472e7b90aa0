//! Output artifacts.
//!
//! Three JSON documents written to the output directory, pretty-printed
//! with two-space indentation. The consuming site reads them verbatim at
//! build time.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::languages::LanguageEntry;

/// Pinned repository summaries.
pub const PINNED_REPOS_FILE: &str = "repos.json";

/// Hero language set derived from recent personal repositories.
pub const HERO_LANGUAGES_FILE: &str = "github-languages.json";

/// Recent external contribution summaries.
pub const CONTRIBUTIONS_FILE: &str = "contributions.json";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The hero-languages document: `{ "languages": [ { "name": ... } ] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroLanguagesDoc {
    pub languages: Vec<LanguageEntry>,
}

/// Create the output directory if it does not exist. Idempotent.
pub fn ensure_dir(dir: &Path) -> Result<(), ArtifactError> {
    fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Serialize `value` and write it to `dir/name`.
pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<(), ArtifactError> {
    let path = dir.join(name);
    let body = serde_json::to_string_pretty(value).map_err(|source| ArtifactError::Encode {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, body).map_err(|source| ArtifactError::Io { path, source })
}
