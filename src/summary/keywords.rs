// Observed-keyword extraction — the top words actually used in each
// topic's post titles, as opposed to the trigger keywords that routed
// posts there. Plain word counting with a stop-word filter.

use std::collections::{BTreeMap, HashMap};

use crate::store::models::ClassifiedPost;
use crate::topics::classifier::normalize_text;

/// How many observed keywords to keep per topic.
const WORDS_PER_TOPIC: usize = 5;

/// Words shorter than this carry no topical signal.
const MIN_WORD_LEN: usize = 4;

const STOP_WORDS: &[&str] = &[
    "the", "is", "in", "and", "to", "a", "of", "for", "on", "with", "this", "that", "it", "from",
    "are", "was", "be", "have", "has", "been", "my", "i", "you", "me", "we", "they", "what",
    "when", "where", "which", "there", "about", "your", "will", "would", "should", "does", "how",
    "why", "any", "can", "all", "just", "like", "some",
];

/// Top observed words per topic, counted over normalized post titles.
/// Ties break alphabetically so output is deterministic.
pub fn per_topic(posts: &[&ClassifiedPost]) -> BTreeMap<String, Vec<String>> {
    let mut counts: BTreeMap<String, HashMap<String, u64>> = BTreeMap::new();

    for post in posts {
        let words = counts.entry(post.topic.clone()).or_default();
        for word in normalize_text(&post.title).split_whitespace() {
            if word.len() >= MIN_WORD_LEN && !STOP_WORDS.contains(&word) {
                *words.entry(word.to_string()).or_default() += 1;
            }
        }
    }

    counts
        .into_iter()
        .map(|(topic, words)| {
            let mut ranked: Vec<(String, u64)> = words.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            ranked.truncate(WORDS_PER_TOPIC);
            (topic, ranked.into_iter().map(|(word, _)| word).collect())
        })
        .collect()
}
