// Classification pipeline: raw posts in, topic-enriched posts out.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::output::terminal;
use crate::store::csv;
use crate::topics::classifier;
use crate::topics::dictionary::KeywordDictionary;

#[derive(Debug, Default)]
pub struct ClassifyStats {
    pub classified: u64,
    pub skipped: u64,
}

/// Classify every raw post and write the enriched file. Malformed raw rows
/// are skipped and counted; a missing input file is fatal.
pub fn run(
    raw_path: &Path,
    classified_path: &Path,
    dictionary: &KeywordDictionary,
) -> Result<ClassifyStats> {
    let outcome = csv::read_raw_posts(raw_path)?;
    if outcome.skipped > 0 {
        warn!(skipped = outcome.skipped, "Skipped malformed raw rows");
    }

    let classified = classifier::classify_posts(outcome.rows, dictionary);
    csv::write_classified_posts(classified_path, &classified)?;

    info!(
        classified = classified.len(),
        skipped = outcome.skipped,
        "Classification finished"
    );

    terminal::display_topic_distribution(&classified);

    Ok(ClassifyStats {
        classified: classified.len() as u64,
        skipped: outcome.skipped as u64,
    })
}
