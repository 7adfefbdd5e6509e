use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

/// Subpulse: historical topic trends for Reddit communities.
///
/// Collects a community's historical posts from a public archive,
/// classifies each post into a topic by keyword matching, pre-aggregates
/// chart-ready counts, and serves them as an interactive dashboard.
#[derive(Parser)]
#[command(name = "subpulse", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect historical posts from the archive API
    Collect {
        /// Start of the date range (YYYY-MM-DD, inclusive)
        #[arg(long)]
        since: String,

        /// End of the date range (YYYY-MM-DD, inclusive)
        #[arg(long)]
        until: String,
    },

    /// Assign a topic to every collected post
    Classify,

    /// Build the summary document from classified posts
    Aggregate {
        /// How many top posts to keep in the summary
        #[arg(long, default_value = "15")]
        top_posts: usize,
    },

    /// Run collect, classify, and aggregate back to back
    Run {
        /// Start of the date range (YYYY-MM-DD, inclusive)
        #[arg(long)]
        since: String,

        /// End of the date range (YYYY-MM-DD, inclusive)
        #[arg(long)]
        until: String,

        /// How many top posts to keep in the summary
        #[arg(long, default_value = "15")]
        top_posts: usize,
    },

    /// Serve the dashboard for the aggregated summary
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Show pipeline status (which artifacts exist, row counts)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("subpulse=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = subpulse::config::Config::load()?;

    match cli.command {
        Commands::Collect { since, until } => {
            collect(&config, &since, &until).await?;
        }

        Commands::Classify => {
            classify(&config)?;
        }

        Commands::Aggregate { top_posts } => {
            aggregate(&config, top_posts)?;
        }

        Commands::Run {
            since,
            until,
            top_posts,
        } => {
            collect(&config, &since, &until).await?;
            classify(&config)?;
            aggregate(&config, top_posts)?;
            println!(
                "\n{}",
                "Pipeline complete. Run `subpulse serve` to open the dashboard.".bold()
            );
        }

        Commands::Serve { port, bind } => {
            subpulse::web::run_server(&config.summary_path(), port, &bind).await?;
        }

        Commands::Status => {
            subpulse::status::show(&config)?;
        }
    }

    Ok(())
}

async fn collect(config: &subpulse::config::Config, since: &str, until: &str) -> Result<()> {
    config.require_subreddit()?;

    let since_ts = day_start(since)?;
    // `until` is an inclusive date, so the cutoff is the next day's start.
    let until_ts = day_start(until)? + 86_400;

    println!(
        "Collecting r/{} posts from {} to {}...",
        config.subreddit, since, until
    );

    let client = subpulse::archive::client::ArchiveClient::new(&config.archive_url)?;
    let out_path = config.raw_posts_path();

    let stats =
        subpulse::pipeline::collect::run(&client, &config.subreddit, since_ts, until_ts, &out_path)
            .await?;

    println!("\n{}", "Collection complete.".bold());
    println!("  Posts collected: {}", stats.collected);
    if stats.duplicates > 0 {
        println!("  Duplicates dropped: {}", stats.duplicates);
    }
    if stats.skipped > 0 {
        println!("  Unusable rows skipped: {}", stats.skipped);
    }
    println!("  Written to: {}", out_path.display());
    Ok(())
}

fn classify(config: &subpulse::config::Config) -> Result<()> {
    let dictionary = config.load_dictionary()?;
    info!(topics = dictionary.len(), "Loaded keyword dictionary");

    println!("Classifying posts into {} topics...", dictionary.len());

    let stats = subpulse::pipeline::classify::run(
        &config.raw_posts_path(),
        &config.classified_posts_path(),
        &dictionary,
    )?;

    println!("\n{}", "Classification complete.".bold());
    println!("  Posts classified: {}", stats.classified);
    if stats.skipped > 0 {
        println!("  Malformed rows skipped: {}", stats.skipped);
    }
    println!("  Written to: {}", config.classified_posts_path().display());
    Ok(())
}

fn aggregate(config: &subpulse::config::Config, top_posts: usize) -> Result<()> {
    println!("Aggregating classified posts...");

    subpulse::pipeline::aggregate::run(
        &config.classified_posts_path(),
        &config.summary_path(),
        top_posts,
    )?;

    println!("\n{}", "Aggregation complete.".bold());
    println!("  Written to: {}", config.summary_path().display());
    Ok(())
}

/// Parse a YYYY-MM-DD date into the unix timestamp of its UTC midnight.
fn day_start(date: &str) -> Result<i64> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{date}' — expected YYYY-MM-DD"))?;
    Ok(NaiveDateTime::new(parsed, NaiveTime::MIN)
        .and_utc()
        .timestamp())
}
