// Colored terminal output for pipeline stage recaps.
//
// This module handles all terminal-specific formatting: colors, tables,
// distribution bars. The pipeline stages delegate here after finishing.

use std::collections::BTreeMap;

use colored::Colorize;

use crate::store::models::ClassifiedPost;
use crate::summary::document::Summary;

/// Posts-per-year recap printed after a collection run.
pub fn display_posts_per_year(posts_per_year: &BTreeMap<i32, u64>) {
    if posts_per_year.is_empty() {
        println!("No posts collected for this range.");
        return;
    }

    println!("\n{}", "Posts per year:".bold());
    for (year, count) in posts_per_year {
        println!("  {year}: {count} posts");
    }
}

/// Topic distribution table printed after classification.
pub fn display_topic_distribution(posts: &[ClassifiedPost]) {
    if posts.is_empty() {
        println!("No posts classified.");
        return;
    }

    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for post in posts {
        *counts.entry(post.topic.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(&str, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total = posts.len() as f64;
    let bar_width: usize = 20;

    println!("\n{}", "Topic Distribution:".bold());
    for (topic, count) in ranked {
        let share = count as f64 / total;
        let filled = (share * bar_width as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(bar_width.saturating_sub(filled))
        );

        let colored_bar = if share >= 0.25 {
            bar.bright_green()
        } else if share >= 0.10 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        println!(
            "  {:<20} {} {:>5} posts ({:>5.2}%)",
            topic,
            colored_bar,
            count,
            share * 100.0
        );
    }
}

/// Headline recap printed after aggregation.
pub fn display_summary_overview(summary: &Summary) {
    println!("\n{}", "=== Summary ===".bold());
    println!("  Total posts:   {}", summary.metadata.total_posts);
    println!(
        "  Date range:    {} to {}",
        summary.metadata.date_range.start, summary.metadata.date_range.end
    );
    println!(
        "  Top topic:     {} ({:.1}% of posts)",
        summary.insights.top_topic.name.bold(),
        summary.insights.top_topic.percentage
    );
    println!("  Topics:        {}", summary.insights.topics_tracked);
    println!("  Years:         {}", summary.insights.years_analyzed);

    if !summary.insights.trending_topics.is_empty() {
        println!("\n{}", "Trending topics:".bold());
        for trend in &summary.insights.trending_topics {
            let arrow = if trend.trend == "up" {
                "UP".green().to_string()
            } else {
                "DOWN".red().to_string()
            };
            println!(
                "  {:<20} {} {:.0}%",
                trend.topic,
                arrow,
                trend.growth_rate.abs()
            );
        }
    }

    if !summary.insights.top_authors.is_empty() {
        println!("\n{}", "Most active authors:".bold());
        for author in &summary.insights.top_authors {
            println!("  {:<24} {} posts", author.author, author.count);
        }
    }
}
