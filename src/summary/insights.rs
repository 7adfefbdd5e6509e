// Headline insights derived from classified posts: the numbers the
// dashboard's metric tiles and sidebar show without touching the raw
// grouping maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::models::{ClassifiedPost, DELETED_AUTHOR};

/// Minimum first-half post count before a topic's growth is measured.
const GROWTH_MIN_BASE: u64 = 5;

/// Growth below this magnitude (percent) is noise, not a trend.
const GROWTH_THRESHOLD: f64 = 30.0;

/// How many trending / most-discussed / top-author entries to keep.
const TOP_K: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub years_analyzed: u64,
    pub topics_tracked: u64,
    pub top_topic: TopTopic,
    pub average_score: f64,
    pub average_comments: f64,
    /// year -> post count
    pub posts_per_year: BTreeMap<i32, u64>,
    /// Topics with the largest first-half vs second-half swing
    pub trending_topics: Vec<TrendingTopic>,
    /// Topics ranked by total comment volume
    pub most_discussed: Vec<DiscussedTopic>,
    /// Most prolific authors (deleted accounts excluded)
    pub top_authors: Vec<AuthorCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTopic {
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub topic: String,
    pub growth_rate: f64,
    pub trend: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussedTopic {
    pub topic: String,
    pub total_comments: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorCount {
    pub author: String,
    pub count: u64,
}

/// Compute the insight block. `posts` has already been filtered to rows
/// with representable timestamps.
pub fn build(
    posts: &[&ClassifiedPost],
    topic_counts: &BTreeMap<String, u64>,
    author_counts: &BTreeMap<String, u64>,
) -> Insights {
    let total = posts.len() as u64;

    let mut posts_per_year: BTreeMap<i32, u64> = BTreeMap::new();
    for post in posts {
        if let Some(year) = post.year() {
            *posts_per_year.entry(year).or_default() += 1;
        }
    }

    // Top topic overall. Ties break toward the lexicographically first
    // label so the result is stable.
    let top_topic = topic_counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(name, count)| TopTopic {
            name: name.clone(),
            count: *count,
            percentage: round1(*count as f64 / total.max(1) as f64 * 100.0),
        })
        .unwrap_or(TopTopic {
            name: String::new(),
            count: 0,
            percentage: 0.0,
        });

    let average_score = round1(posts.iter().map(|p| p.score as f64).sum::<f64>() / total.max(1) as f64);
    let average_comments =
        round1(posts.iter().map(|p| p.num_comments as f64).sum::<f64>() / total.max(1) as f64);

    let trending_topics = trending(posts);
    let most_discussed = most_discussed(posts);

    let mut top_authors: Vec<AuthorCount> = author_counts
        .iter()
        .filter(|(author, _)| author.as_str() != DELETED_AUTHOR)
        .map(|(author, count)| AuthorCount {
            author: author.clone(),
            count: *count,
        })
        .collect();
    top_authors.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.author.cmp(&b.author)));
    top_authors.truncate(TOP_K);

    Insights {
        years_analyzed: posts_per_year.len() as u64,
        topics_tracked: topic_counts.len() as u64,
        top_topic,
        average_score,
        average_comments,
        posts_per_year,
        trending_topics,
        most_discussed,
        top_authors,
    }
}

/// Compare each topic's post volume in the first half of the covered year
/// range against the second half. Topics need a minimum base volume before
/// growth is measured, and small swings are dropped as noise.
fn trending(posts: &[&ClassifiedPost]) -> Vec<TrendingTopic> {
    let mut years: Vec<i32> = posts.iter().filter_map(|p| p.year()).collect();
    if years.is_empty() {
        return Vec::new();
    }
    years.sort_unstable();
    let midpoint = median(&years);

    let mut first: BTreeMap<&str, u64> = BTreeMap::new();
    let mut second: BTreeMap<&str, u64> = BTreeMap::new();
    for post in posts {
        let Some(year) = post.year() else { continue };
        if (year as f64) <= midpoint {
            *first.entry(post.topic.as_str()).or_default() += 1;
        } else {
            *second.entry(post.topic.as_str()).or_default() += 1;
        }
    }

    let mut growth: Vec<TrendingTopic> = first
        .iter()
        .filter(|(_, &count)| count > GROWTH_MIN_BASE)
        .filter_map(|(topic, &first_count)| {
            let second_count = second.get(topic).copied().unwrap_or(0);
            let rate = (second_count as f64 - first_count as f64) / first_count as f64 * 100.0;
            (rate.abs() > GROWTH_THRESHOLD).then(|| TrendingTopic {
                topic: (*topic).to_string(),
                growth_rate: round1(rate),
                trend: if rate > 0.0 { "up" } else { "down" }.to_string(),
            })
        })
        .collect();

    growth.sort_by(|a, b| {
        b.growth_rate
            .abs()
            .partial_cmp(&a.growth_rate.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.topic.cmp(&b.topic))
    });
    growth.truncate(TOP_K);
    growth
}

fn most_discussed(posts: &[&ClassifiedPost]) -> Vec<DiscussedTopic> {
    let mut comments: BTreeMap<&str, u64> = BTreeMap::new();
    for post in posts {
        *comments.entry(post.topic.as_str()).or_default() += post.num_comments.max(0) as u64;
    }

    let mut ranked: Vec<DiscussedTopic> = comments
        .into_iter()
        .map(|(topic, total_comments)| DiscussedTopic {
            topic: topic.to_string(),
            total_comments,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.total_comments
            .cmp(&a.total_comments)
            .then_with(|| a.topic.cmp(&b.topic))
    });
    ranked.truncate(TOP_K);
    ranked
}

fn median(sorted: &[i32]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
