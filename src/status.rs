// System status: which pipeline artifacts exist and how big they are.

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::store::csv;
use crate::summary::document::Summary;

/// Print pipeline artifact status: raw posts, classified posts, summary.
pub fn show(config: &Config) -> Result<()> {
    println!("{}", "=== Subpulse Status ===".bold());
    if config.subreddit.is_empty() {
        println!("  Subreddit:  {}", "not configured".yellow());
    } else {
        println!("  Subreddit:  r/{}", config.subreddit);
    }
    println!("  Data dir:   {}", config.data_dir.display());
    println!();

    let raw = config.raw_posts_path();
    if raw.exists() {
        match csv::count_rows(&raw) {
            Ok(count) => println!("  collected:  {} ({count} rows)", "ok".green()),
            Err(e) => println!("  collected:  {} ({e:#})", "unreadable".red()),
        }
    } else {
        println!("  collected:  {}", "missing, run `subpulse collect`".dimmed());
    }

    let classified = config.classified_posts_path();
    if classified.exists() {
        match csv::count_rows(&classified) {
            Ok(count) => println!("  classified: {} ({count} rows)", "ok".green()),
            Err(e) => println!("  classified: {} ({e:#})", "unreadable".red()),
        }
    } else {
        println!("  classified: {}", "missing, run `subpulse classify`".dimmed());
    }

    let summary_path = config.summary_path();
    if summary_path.exists() {
        match Summary::load(&summary_path) {
            Ok(summary) => println!(
                "  aggregated: {} ({} posts, {} to {})",
                "ok".green(),
                summary.metadata.total_posts,
                summary.metadata.date_range.start,
                summary.metadata.date_range.end,
            ),
            Err(e) => println!("  aggregated: {} ({e:#})", "unreadable".red()),
        }
    } else {
        println!("  aggregated: {}", "missing, run `subpulse aggregate`".dimmed());
    }

    Ok(())
}
