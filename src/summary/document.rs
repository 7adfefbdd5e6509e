// The aggregate summary document — chart-ready counts derived from
// classified posts, regenerated wholesale on each pipeline run.
//
// Grouping maps are BTreeMaps so serialization order is sorted and the
// same input always produces the same document. The presenter never
// recomputes anything: every view it offers is a lookup in here.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::insights::{self, Insights};
use super::keywords;
use crate::output::truncate_chars;
use crate::store::models::ClassifiedPost;

/// Title length cap in top-post rows.
const TOP_POST_TITLE_CHARS: usize = 100;

/// Fixed color per topic for the share-of-total chart.
const TOPIC_COLORS: &[(&str, &str)] = &[
    ("Traffic", "#ef4444"),
    ("Housing_Rent", "#f59e0b"),
    ("Food", "#10b981"),
    ("Infrastructure", "#3b82f6"),
    ("Jobs_Career", "#8b5cf6"),
    ("Safety_Law", "#ec4899"),
    ("Culture_Events", "#14b8a6"),
    ("Language", "#f97316"),
    ("Social_Life", "#06b6d4"),
    ("Health", "#84cc16"),
    ("Weather", "#a855f7"),
    ("Politics", "#f43f5e"),
    ("Pets_Animals", "#22c55e"),
    ("Education", "#eab308"),
    ("General_Discussion", "#6b7280"),
];

const FALLBACK_COLOR: &str = "#6b7280";

/// The full summary document, as serialized to summary.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub metadata: Metadata,
    /// topic -> year -> post count
    pub topic_trends: BTreeMap<String, BTreeMap<i32, u64>>,
    /// topic -> "YYYY-MM" -> post count
    pub monthly_trends: BTreeMap<String, BTreeMap<String, u64>>,
    /// Highest-scoring posts overall, score descending
    pub top_posts: Vec<TopPost>,
    /// author -> post count
    pub author_counts: BTreeMap<String, u64>,
    pub insights: Insights,
    /// Per-topic share of all posts, count descending
    pub topic_distribution: Vec<TopicSlice>,
    /// topic -> top observed words in that topic's titles
    pub topic_keywords: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub total_posts: u64,
    pub date_range: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPost {
    pub title: String,
    pub author: String,
    pub score: i64,
    pub num_comments: i64,
    pub topic: String,
    pub year: i32,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSlice {
    pub name: String,
    pub value: u64,
    pub color: String,
}

impl Summary {
    /// Build the summary from classified posts.
    ///
    /// Four independent grouping passes (yearly, monthly, top posts,
    /// authors), then the derived insight/keyword sections. Posts with a
    /// timestamp chrono cannot represent are dropped up front so every
    /// section counts the same population.
    pub fn build(posts: &[ClassifiedPost], top_n: usize) -> Result<Summary> {
        let posts: Vec<&ClassifiedPost> = posts.iter().filter(|p| p.created().is_some()).collect();

        if posts.is_empty() {
            anyhow::bail!("No classified posts to aggregate — nothing to summarize");
        }

        // (a) topic x year
        let mut topic_trends: BTreeMap<String, BTreeMap<i32, u64>> = BTreeMap::new();
        for post in &posts {
            if let Some(year) = post.year() {
                *topic_trends
                    .entry(post.topic.clone())
                    .or_default()
                    .entry(year)
                    .or_default() += 1;
            }
        }

        // (b) topic x month
        let mut monthly_trends: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
        for post in &posts {
            if let Some(month) = post.month_key() {
                *monthly_trends
                    .entry(post.topic.clone())
                    .or_default()
                    .entry(month)
                    .or_default() += 1;
            }
        }

        // (c) top posts by score
        let mut ranked = posts.clone();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        let top_posts: Vec<TopPost> = ranked
            .into_iter()
            .take(top_n)
            .filter_map(|post| {
                Some(TopPost {
                    title: truncate_chars(&post.title, TOP_POST_TITLE_CHARS),
                    author: post.author.clone(),
                    score: post.score,
                    num_comments: post.num_comments,
                    topic: post.topic.clone(),
                    year: post.year()?,
                    url: post.url.clone(),
                })
            })
            .collect();

        // (d) posts per author
        let mut author_counts: BTreeMap<String, u64> = BTreeMap::new();
        for post in &posts {
            *author_counts.entry(post.author.clone()).or_default() += 1;
        }

        // Derived sections
        let topic_counts = count_by_topic(&posts);
        let topic_distribution = distribution(&topic_counts);
        let insights = insights::build(&posts, &topic_counts, &author_counts);
        let topic_keywords = keywords::per_topic(&posts);

        let (start, end) = date_range(&posts);

        Ok(Summary {
            metadata: Metadata {
                total_posts: posts.len() as u64,
                date_range: DateRange { start, end },
            },
            topic_trends,
            monthly_trends,
            top_posts,
            author_counts,
            insights,
            topic_distribution,
            topic_keywords,
        })
    }

    /// Serialize to pretty JSON at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Load a previously saved summary. Missing or corrupt files are fatal;
    /// the presenter fails fast rather than rendering partial data.
    pub fn load(path: &Path) -> Result<Summary> {
        if !path.exists() {
            anyhow::bail!(
                "Summary document not found: {}\nRun `subpulse aggregate` first.",
                path.display()
            );
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Summary document is corrupt: {}", path.display()))
    }

    /// Sum a topic's yearly counts; equals its total post count.
    pub fn total_for_topic(&self, topic: &str) -> u64 {
        self.topic_trends
            .get(topic)
            .map(|years| years.values().sum())
            .unwrap_or(0)
    }
}

fn count_by_topic(posts: &[&ClassifiedPost]) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for post in posts {
        *counts.entry(post.topic.clone()).or_default() += 1;
    }
    counts
}

fn distribution(topic_counts: &BTreeMap<String, u64>) -> Vec<TopicSlice> {
    let mut slices: Vec<TopicSlice> = topic_counts
        .iter()
        .map(|(topic, count)| TopicSlice {
            name: topic.clone(),
            value: *count,
            color: TOPIC_COLORS
                .iter()
                .find(|(t, _)| *t == topic.as_str())
                .map(|(_, c)| (*c).to_string())
                .unwrap_or_else(|| FALLBACK_COLOR.to_string()),
        })
        .collect();
    slices.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    slices
}

fn date_range(posts: &[&ClassifiedPost]) -> (String, String) {
    let mut min = i64::MAX;
    let mut max = i64::MIN;
    for post in posts {
        min = min.min(post.created_utc);
        max = max.max(post.created_utc);
    }
    let fmt = |ts: i64| {
        chrono::DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    (fmt(min), fmt(max))
}
