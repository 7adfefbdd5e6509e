// Aggregation pipeline: classified posts in, summary document out.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::output::terminal;
use crate::store::csv;
use crate::summary::document::Summary;

/// Build the aggregate summary from the classified file and save it.
/// Malformed rows are skipped and counted; a missing input file is fatal.
pub fn run(classified_path: &Path, summary_path: &Path, top_n: usize) -> Result<Summary> {
    let outcome = csv::read_classified_posts(classified_path)?;
    if outcome.skipped > 0 {
        warn!(skipped = outcome.skipped, "Skipped malformed classified rows");
    }

    let summary = Summary::build(&outcome.rows, top_n)?;
    summary.save(summary_path)?;

    info!(
        total_posts = summary.metadata.total_posts,
        topics = summary.topic_trends.len(),
        "Aggregation finished"
    );

    terminal::display_summary_overview(&summary);

    Ok(summary)
}
