// Submission fetching — one page of the archive's search endpoint.
//
// The archive returns submissions as loosely-typed JSON: fields go missing,
// created_utc is sometimes a float, deleted accounts have no author. The
// wire type keeps everything optional; conversion to a RawPost decides
// what is salvageable and what gets skipped.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::client::ArchiveClient;
use crate::output::truncate_chars;
use crate::store::models::{RawPost, DELETED_AUTHOR};

/// Search endpoint path on the archive host.
const SEARCH_PATH: &str = "reddit/search/submission";

/// Archive page size cap.
pub const PAGE_SIZE: usize = 100;

/// Body text is truncated at collection time; the classifier only needs
/// the opening of long posts and the CSV stays manageable.
const MAX_SELFTEXT_CHARS: usize = 1000;

/// Response envelope from the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Submission>,
}

/// A submission as the archive returns it: every field may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    pub id: Option<String>,
    /// Unix seconds; the archive serves this as an integer or a float.
    pub created_utc: Option<f64>,
    pub author: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub selftext: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub num_comments: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Submission {
    /// Convert to a RawPost, or None when the row is unusable
    /// (missing id, timestamp, or title).
    pub fn into_raw_post(self) -> Option<RawPost> {
        let id = self.id.filter(|s| !s.is_empty())?;
        let created_utc = self.created_utc? as i64;
        let title = self.title?;

        Some(RawPost {
            id,
            created_utc,
            author: self
                .author
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| DELETED_AUTHOR.to_string()),
            title,
            selftext: truncate_chars(self.selftext.as_deref().unwrap_or(""), MAX_SELFTEXT_CHARS),
            score: self.score.unwrap_or(0),
            num_comments: self.num_comments.unwrap_or(0),
            url: self.url.unwrap_or_default(),
        })
    }
}

/// Fetch one page of submissions for a subreddit, ascending by creation
/// time, within [after, before) unix seconds.
pub async fn fetch_page(
    client: &ArchiveClient,
    subreddit: &str,
    after: i64,
    before: i64,
) -> Result<Vec<Submission>> {
    let after_str = after.to_string();
    let before_str = before.to_string();
    let size_str = PAGE_SIZE.to_string();

    let response: SearchResponse = client
        .get_json(
            SEARCH_PATH,
            &[
                ("subreddit", subreddit),
                ("after", &after_str),
                ("before", &before_str),
                ("size", &size_str),
                ("sort", "asc"),
                ("sort_type", "created_utc"),
            ],
        )
        .await
        .with_context(|| format!("Failed to fetch submissions for r/{subreddit}"))?;

    debug!(
        count = response.data.len(),
        after = after,
        "Fetched submission page for r/{subreddit}"
    );

    Ok(response.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_submission() -> Submission {
        Submission {
            id: Some("abc123".to_string()),
            created_utc: Some(1686830400.0),
            author: Some("someone".to_string()),
            title: Some("A title".to_string()),
            selftext: Some("A body".to_string()),
            score: Some(10),
            num_comments: Some(3),
            url: Some("https://reddit.com/r/x/abc123".to_string()),
        }
    }

    #[test]
    fn test_into_raw_post_full_row() {
        let post = full_submission().into_raw_post().unwrap();
        assert_eq!(post.id, "abc123");
        assert_eq!(post.created_utc, 1686830400);
        assert_eq!(post.author, "someone");
        assert_eq!(post.score, 10);
    }

    #[test]
    fn test_into_raw_post_missing_id_is_skipped() {
        let mut sub = full_submission();
        sub.id = None;
        assert!(sub.into_raw_post().is_none());

        let mut sub = full_submission();
        sub.id = Some(String::new());
        assert!(sub.into_raw_post().is_none());
    }

    #[test]
    fn test_into_raw_post_missing_timestamp_is_skipped() {
        let mut sub = full_submission();
        sub.created_utc = None;
        assert!(sub.into_raw_post().is_none());
    }

    #[test]
    fn test_into_raw_post_missing_title_is_skipped() {
        let mut sub = full_submission();
        sub.title = None;
        assert!(sub.into_raw_post().is_none());
    }

    #[test]
    fn test_into_raw_post_missing_author_becomes_deleted() {
        let mut sub = full_submission();
        sub.author = None;
        assert_eq!(sub.into_raw_post().unwrap().author, DELETED_AUTHOR);
    }

    #[test]
    fn test_into_raw_post_float_timestamp_truncates() {
        let mut sub = full_submission();
        sub.created_utc = Some(1686830400.73);
        assert_eq!(sub.into_raw_post().unwrap().created_utc, 1686830400);
    }

    #[test]
    fn test_into_raw_post_truncates_long_selftext() {
        let mut sub = full_submission();
        sub.selftext = Some("x".repeat(5000));
        let post = sub.into_raw_post().unwrap();
        // 1000 chars + the "..." marker
        assert_eq!(post.selftext.chars().count(), 1003);
    }

    #[test]
    fn test_into_raw_post_defaults_optional_fields() {
        let mut sub = full_submission();
        sub.selftext = None;
        sub.score = None;
        sub.num_comments = None;
        sub.url = None;
        let post = sub.into_raw_post().unwrap();
        assert_eq!(post.selftext, "");
        assert_eq!(post.score, 0);
        assert_eq!(post.num_comments, 0);
        assert_eq!(post.url, "");
    }
}
