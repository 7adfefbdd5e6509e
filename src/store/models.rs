// Post records at the two stages of their lifecycle.
//
// A RawPost is what the collector writes; a ClassifiedPost is the same row
// with the topic column the classifier adds. Encoding the "topic is set
// exactly once" lifecycle as two types keeps the later stages from ever
// seeing an unclassified post.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder author the archive returns for deleted accounts.
pub const DELETED_AUTHOR: &str = "[deleted]";

/// A post as collected from the archive, before topic assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    pub id: String,
    /// Creation time as unix seconds (UTC)
    pub created_utc: i64,
    pub author: String,
    pub title: String,
    pub selftext: String,
    pub score: i64,
    pub num_comments: i64,
    pub url: String,
}

/// A post with its assigned topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPost {
    pub id: String,
    pub created_utc: i64,
    pub author: String,
    pub title: String,
    pub selftext: String,
    pub score: i64,
    pub num_comments: i64,
    pub url: String,
    pub topic: String,
}

impl RawPost {
    /// Attach the assigned topic, producing the enriched record.
    pub fn with_topic(self, topic: String) -> ClassifiedPost {
        ClassifiedPost {
            id: self.id,
            created_utc: self.created_utc,
            author: self.author,
            title: self.title,
            selftext: self.selftext,
            score: self.score,
            num_comments: self.num_comments,
            url: self.url,
            topic,
        }
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc, 0)
    }
}

impl ClassifiedPost {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc, 0)
    }

    /// Calendar year of the post, or None for out-of-range timestamps.
    pub fn year(&self) -> Option<i32> {
        self.created().map(|dt| dt.year())
    }

    /// "YYYY-MM" grouping key for monthly trends.
    pub fn month_key(&self) -> Option<String> {
        self.created().map(|dt| dt.format("%Y-%m").to_string())
    }
}
