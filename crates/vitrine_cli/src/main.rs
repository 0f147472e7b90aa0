//! Vitrine CLI - generates the site's GitHub JSON artifacts.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(version)]
#[command(about = "Aggregates a GitHub footprint into site-build JSON artifacts")]
#[command(
    long_about = "Vitrine fetches an account's pinned repositories, most recently updated \
personal repositories, and recent external contributions from GitHub, ranks each \
repository's languages, and writes three normalized JSON documents for the site build."
)]
#[command(after_long_help = r#"EXAMPLES
    Generate the artifacts into ./public:
        $ vitrine generate

    Generate for another account into a custom directory:
        $ vitrine generate --username octocat --out-dir dist/data

    Generate shell completions:
        $ vitrine completions zsh > ~/.zfunc/_vitrine

CONFIGURATION
    Vitrine reads configuration from:
      1. ~/.config/vitrine/config.toml (or $XDG_CONFIG_HOME/vitrine/config.toml)
      2. ./vitrine.toml
      3. Environment variables (VITRINE_* prefix, e.g., VITRINE_GITHUB_TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    VITRINE_GITHUB_USERNAME   GitHub login to aggregate
    VITRINE_GITHUB_TOKEN      GitHub personal access token
    VITRINE_OUTPUT_DIR        Output directory (default: public)
    VITRINE_FETCH_CONCURRENCY Maximum concurrent language lookups (default: 6)

    The unprefixed GITHUB_USERNAME and GITHUB_TOKEN are honored when the
    prefixed forms are absent.
"#)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch GitHub data and write the JSON artifacts
    Generate {
        /// GitHub login to aggregate (default from config)
        #[arg(short, long)]
        username: Option<String>,

        /// Output directory for the JSON artifacts (default from config or "public")
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Maximum concurrent language lookups (default from config or 6)
        #[arg(short = 'c', long)]
        concurrency: Option<usize>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Structured logging for non-TTY (CI) runs; a TTY gets a summary line
    // from the command handler instead.
    if !Term::stdout().is_term() {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("vitrine=info,vitrine_cli=info"));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            username,
            out_dir,
            concurrency,
        } => {
            let args = commands::generate::GenerateArgs {
                username,
                out_dir,
                concurrency,
            };
            if let Err(err) = commands::generate::handle_generate(args, &config).await {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
        Commands::Completions { shell } => {
            commands::meta::handle_completions(shell);
        }
    }
}
