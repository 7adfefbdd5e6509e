use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::topics::dictionary::KeywordDictionary;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Everything
/// has a sensible default except the subreddit, which is required for any
/// operation that talks to the archive API.
pub struct Config {
    /// Target community name, without the "r/" prefix (e.g. "bangalore")
    pub subreddit: String,
    /// Archive API base URL (defaults to https://api.pullpush.io)
    pub archive_url: String,
    /// Directory holding the pipeline's intermediate and final artifacts
    pub data_dir: PathBuf,
    /// Optional path to a keywords.json overriding the built-in dictionary
    pub keywords_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            subreddit: env::var("SUBPULSE_SUBREDDIT").unwrap_or_default(),
            archive_url: env::var("SUBPULSE_ARCHIVE_URL")
                .unwrap_or_else(|_| crate::archive::client::DEFAULT_ARCHIVE_URL.to_string()),
            data_dir: env::var("SUBPULSE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            keywords_path: env::var("SUBPULSE_KEYWORDS").ok().map(PathBuf::from),
        })
    }

    /// Check that the subreddit is configured.
    /// Call this before any operation that queries the archive API.
    pub fn require_subreddit(&self) -> Result<()> {
        if self.subreddit.is_empty() {
            anyhow::bail!(
                "SUBPULSE_SUBREDDIT not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Raw posts as collected from the archive (output of `collect`).
    pub fn raw_posts_path(&self) -> PathBuf {
        self.data_dir.join("raw_posts.csv")
    }

    /// Posts with the topic column added (output of `classify`).
    pub fn classified_posts_path(&self) -> PathBuf {
        self.data_dir.join("classified_posts.csv")
    }

    /// The aggregate summary document (output of `aggregate`, input of `serve`).
    pub fn summary_path(&self) -> PathBuf {
        self.data_dir.join("summary.json")
    }

    /// Load the keyword dictionary: from SUBPULSE_KEYWORDS when set,
    /// otherwise the built-in default.
    pub fn load_dictionary(&self) -> Result<KeywordDictionary> {
        match &self.keywords_path {
            Some(path) => KeywordDictionary::load(path)
                .with_context(|| format!("Failed to load keyword dictionary from {}", path.display())),
            None => Ok(KeywordDictionary::default()),
        }
    }
}
