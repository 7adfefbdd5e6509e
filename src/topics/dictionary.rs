// The keyword dictionary — an ordered mapping from topic to trigger substrings.
//
// Order matters: the classifier assigns the first topic (in dictionary
// order) whose triggers match, so the dictionary is a Vec of entries rather
// than a map. The file format mirrors that: a JSON array of
// {"topic": ..., "keywords": [...]} objects. Keywords are lowercased at
// construction so matching against normalized text is case-insensitive.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Catch-all label for posts matching no trigger keyword.
pub const FALLBACK_TOPIC: &str = "General_Discussion";

/// One topic and its trigger substrings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicEntry {
    pub topic: String,
    pub keywords: Vec<String>,
}

/// The full dictionary, in classification priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordDictionary {
    entries: Vec<TopicEntry>,
}

impl KeywordDictionary {
    /// Build a dictionary from (topic, keywords) pairs, lowercasing keywords.
    pub fn new(entries: impl IntoIterator<Item = TopicEntry>) -> Result<Self> {
        let entries: Vec<TopicEntry> = entries
            .into_iter()
            .map(|mut entry| {
                for keyword in &mut entry.keywords {
                    *keyword = keyword.to_lowercase();
                }
                entry
            })
            .collect();

        for entry in &entries {
            if entry.topic.is_empty() {
                anyhow::bail!("Keyword dictionary contains an entry with an empty topic label");
            }
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                anyhow::bail!("Topic '{}' has an empty trigger keyword", entry.topic);
            }
        }

        if entries.is_empty() {
            anyhow::bail!("Keyword dictionary has no topics");
        }

        Ok(Self { entries })
    }

    /// Load a dictionary from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let entries: Vec<TopicEntry> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Self::new(entries)
    }

    /// Iterate entries in classification priority order.
    pub fn iter(&self) -> impl Iterator<Item = &TopicEntry> {
        self.entries.iter()
    }

    /// Topic labels in dictionary order, without the fallback.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.topic.as_str()).collect()
    }

    /// All labels a classified post may carry: dictionary topics ∪ fallback.
    pub fn all_labels(&self) -> Vec<&str> {
        let mut labels = self.labels();
        labels.push(FALLBACK_TOPIC);
        labels
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The built-in dictionary: 14 topics tuned for city-community subreddits.
/// Override with SUBPULSE_KEYWORDS pointing at a keywords.json.
const DEFAULT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Traffic",
        &[
            "traffic", "jam", "road", "vehicle", "auto", "metro", "bus", "bmtc", "congestion",
            "commute", "driving", "parking", "signal", "flyover", "pothole",
        ],
    ),
    (
        "Housing_Rent",
        &[
            "rent", "flat", "apartment", "pg", "accommodation", "landlord", "housing", "room",
            "society", "broker", "deposit", "lease",
        ],
    ),
    (
        "Food",
        &[
            "food", "restaurant", "cafe", "dosa", "idli", "biryani", "pub", "brewery", "eat",
            "dining", "menu", "dish", "breakfast", "lunch", "dinner",
        ],
    ),
    (
        "Infrastructure",
        &[
            "water", "electricity", "power", "bescom", "bwssb", "bbmp", "civic", "garbage",
            "drainage", "sewage", "lake", "park", "construction",
        ],
    ),
    (
        "Jobs_Career",
        &[
            "job", "career", "salary", "company", "interview", "hiring", "work", "office", "wfh",
            "startup", "layoff", "switch", "package",
        ],
    ),
    (
        "Safety_Law",
        &[
            "police", "crime", "theft", "scam", "harassment", "safety", "security", "assault",
            "fraud", "fir", "complaint", "incident",
        ],
    ),
    (
        "Culture_Events",
        &[
            "festival", "event", "concert", "diwali", "holi", "rajyotsava", "kannada", "culture",
            "music", "art", "movie", "theater",
        ],
    ),
    (
        "Language",
        &[
            "kannada", "hindi", "language", "tamil", "telugu", "malayalam", "speak", "learn",
            "local", "native", "imposition",
        ],
    ),
    (
        "Social_Life",
        &[
            "friend", "dating", "relationship", "lonely", "meetup", "social", "group", "hobby",
            "activity", "weekend", "hangout",
        ],
    ),
    (
        "Health",
        &[
            "hospital", "doctor", "medical", "health", "clinic", "emergency", "covid", "vaccine",
            "medicine", "treatment", "mental",
        ],
    ),
    (
        "Weather",
        &[
            "rain", "weather", "monsoon", "temperature", "climate", "flood", "summer", "winter",
            "season",
        ],
    ),
    (
        "Politics",
        &[
            "government", "election", "vote", "bjp", "congress", "politician", "cm", "minister",
            "policy", "corruption",
        ],
    ),
    (
        "Pets_Animals",
        &[
            "dog", "cat", "pet", "animal", "adopt", "stray", "rescue", "kitten", "puppy", "vet",
        ],
    ),
    (
        "Education",
        &[
            "college", "university", "school", "education", "student", "exam", "admission",
            "course", "degree", "study",
        ],
    ),
];

impl Default for KeywordDictionary {
    fn default() -> Self {
        // The built-in table is already lowercase and non-empty, so it
        // skips the validating constructor.
        Self {
            entries: DEFAULT_KEYWORDS
                .iter()
                .map(|(topic, keywords)| TopicEntry {
                    topic: (*topic).to_string(),
                    keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                })
                .collect(),
        }
    }
}
