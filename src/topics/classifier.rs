// Keyword classification — a deterministic, pure function of (text, dictionary).
//
// A post's title and body are concatenated, normalized, and tested for
// substring containment against each topic's triggers. The first topic in
// dictionary order with any matching trigger wins; a post matching nothing
// gets the fallback label. Every post receives exactly one topic.

use std::sync::OnceLock;

use regex_lite::Regex;

use super::dictionary::{KeywordDictionary, FALLBACK_TOPIC};
use crate::store::models::{ClassifiedPost, RawPost};

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        // Infallible: the pattern is a literal constant.
        Regex::new(r"(?:https?://|www\.)\S+").expect("valid URL pattern")
    })
}

/// Normalize post text for matching: lowercase, strip URLs, drop everything
/// but ASCII letters and spaces, collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_urls = url_pattern().replace_all(&lowered, " ");

    let cleaned: String = without_urls
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Assign a topic to a post: first dictionary entry with any trigger
/// contained in the normalized title+body text, else the fallback.
pub fn assign_topic(title: &str, selftext: &str, dictionary: &KeywordDictionary) -> String {
    let text = normalize_text(&format!("{title} {selftext}"));

    for entry in dictionary.iter() {
        if entry.keywords.iter().any(|kw| text.contains(kw.as_str())) {
            return entry.topic.clone();
        }
    }

    FALLBACK_TOPIC.to_string()
}

/// Classify a batch of posts. Total: every input row comes back with a topic.
pub fn classify_posts(posts: Vec<RawPost>, dictionary: &KeywordDictionary) -> Vec<ClassifiedPost> {
    posts
        .into_iter()
        .map(|post| {
            let topic = assign_topic(&post.title, &post.selftext, dictionary);
            post.with_topic(topic)
        })
        .collect()
}
