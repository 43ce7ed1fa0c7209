use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use persona_builder::config::{Config, ConfigOverrides};
use persona_builder::core::build_with_options;
use persona_builder::reddit::{parse_username, RedditClient};
use persona_builder::report::{self, ReportFormat};

#[derive(Parser)]
#[command(name = "persona-builder")]
#[command(about = "Build a user persona from a Reddit profile URL")]
struct Args {
    /// URL to the Reddit user profile
    profile_url: String,

    /// Output file name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Items fetched per listing (1-100)
    #[arg(long)]
    limit: Option<u32>,

    /// Number of key topics to report
    #[arg(long)]
    top_words: Option<usize>,

    /// Number of subreddits to report
    #[arg(long)]
    top_communities: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let username = parse_username(&args.profile_url)?;

    let overrides = ConfigOverrides {
        limit: args.limit,
        top_words: args.top_words,
        top_communities: args.top_communities,
    };
    let config =
        Config::load_with(args.config.as_deref(), &overrides).context("Failed to load config")?;

    let client = RedditClient::new(&config).context("Failed to create HTTP client")?;
    let (posts, comments) = client
        .fetch_history(&username)
        .await
        .with_context(|| format!("Failed to fetch history for u/{}", username))?;

    let persona = build_with_options(&username, &posts, &comments, config.build_options());

    let contents = report::render(&persona, args.format)?;
    let outfile = args
        .output
        .unwrap_or_else(|| report::default_output_path(&username, args.format));
    report::write_report(&outfile, &contents)
        .with_context(|| format!("Failed to write {}", outfile.display()))?;

    info!(path = %outfile.display(), "report written");
    println!("Persona written to {}", outfile.display());
    Ok(())
}
