//! The generate command: preflight, fetch, write, report.

use std::path::PathBuf;

use console::Term;
use vitrine::{generate, GenerateOptions, GitHubClient};

use crate::config::Config;

/// CLI flags for the generate command; unset flags default from config.
pub(crate) struct GenerateArgs {
    pub(crate) username: Option<String>,
    pub(crate) out_dir: Option<PathBuf>,
    pub(crate) concurrency: Option<usize>,
}

/// Fully-resolved inputs after merging flags, config, and environment.
struct Inputs {
    username: String,
    token: String,
    out_dir: PathBuf,
    concurrency: usize,
}

/// Merge CLI flags with config defaults, failing on missing credentials.
///
/// Both the username and the token are preflight requirements: the
/// pinned-items flow is GraphQL and GraphQL always needs a token.
fn resolve_inputs(args: &GenerateArgs, config: &Config) -> Result<Inputs, String> {
    let username = args
        .username
        .clone()
        .or_else(|| config.github_username())
        .ok_or_else(|| {
            "Missing GitHub username: pass --username, set VITRINE_GITHUB_USERNAME (or \
             GITHUB_USERNAME), or configure [github].username"
                .to_string()
        })?;

    let token = config.github_token().ok_or_else(|| {
        "Missing GitHub token (required for pinned repos via GraphQL): set \
         VITRINE_GITHUB_TOKEN (or GITHUB_TOKEN), or configure [github].token"
            .to_string()
    })?;

    Ok(Inputs {
        username,
        token,
        out_dir: args.out_dir.clone().unwrap_or_else(|| config.output.dir.clone()),
        concurrency: args.concurrency.unwrap_or(config.fetch.concurrency),
    })
}

pub(crate) async fn handle_generate(
    args: GenerateArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = resolve_inputs(&args, config)?;

    let client = GitHubClient::new(Some(inputs.token))?;
    let options = GenerateOptions {
        fanout: inputs.concurrency,
        ..GenerateOptions::default()
    };

    let report = generate(&client, &inputs.username, &inputs.out_dir, &options).await?;

    if Term::stdout().is_term() {
        println!(
            "✔ GitHub JSON generated in {} ({} pinned, {} hero languages, {} contributions)",
            inputs.out_dir.display(),
            report.pinned,
            report.hero_languages,
            report.contributed,
        );
    } else {
        tracing::info!(
            out_dir = %inputs.out_dir.display(),
            pinned = report.pinned,
            hero_languages = report.hero_languages,
            contributed = report.contributed,
            "GitHub JSON generated"
        );
    }

    Ok(())
}
