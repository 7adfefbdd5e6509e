// CSV readers and writers for the pipeline's tabular files.
//
// Readers skip malformed rows instead of failing the run: a row that does
// not deserialize is counted and logged, never fabricated. A missing file
// is fatal; the caller gets an error naming the stage to run first.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::models::{ClassifiedPost, RawPost};

/// Rows read from a tabular file, plus how many malformed rows were skipped.
#[derive(Debug)]
pub struct ReadOutcome<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

/// Open a CSV writer for raw posts, truncating any existing file.
/// The collector appends page-by-page and flushes after each page so
/// partial output survives an aborted run.
pub fn raw_posts_writer(path: &Path) -> Result<csv::Writer<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(csv::Writer::from_writer(file))
}

/// Append a batch of raw posts and flush to disk.
pub fn append_raw_posts(writer: &mut csv::Writer<File>, posts: &[RawPost]) -> Result<()> {
    for post in posts {
        writer.serialize(post).context("Failed to write post row")?;
    }
    writer.flush().context("Failed to flush posts to disk")?;
    Ok(())
}

/// Read the collector's output. Fatal if the file is missing.
pub fn read_raw_posts(path: &Path) -> Result<ReadOutcome<RawPost>> {
    if !path.exists() {
        anyhow::bail!(
            "Raw posts file not found: {}\nRun `subpulse collect` first.",
            path.display()
        );
    }
    read_rows(path)
}

/// Write the classifier's output in one pass.
pub fn write_classified_posts(path: &Path, posts: &[ClassifiedPost]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for post in posts {
        writer
            .serialize(post)
            .context("Failed to write classified row")?;
    }
    writer.flush().context("Failed to flush classified posts")?;
    Ok(())
}

/// Read the classifier's output. Fatal if the file is missing.
pub fn read_classified_posts(path: &Path) -> Result<ReadOutcome<ClassifiedPost>> {
    if !path.exists() {
        anyhow::bail!(
            "Classified posts file not found: {}\nRun `subpulse classify` first.",
            path.display()
        );
    }
    read_rows(path)
}

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Result<ReadOutcome<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                debug!(error = %e, "Skipping malformed row");
            }
        }
    }

    Ok(ReadOutcome { rows, skipped })
}

/// Count data rows in a CSV without deserializing them (for `status`).
pub fn count_rows(path: &Path) -> Result<usize> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut count = 0usize;
    for record in reader.byte_records() {
        record.context("Failed to read row")?;
        count += 1;
    }
    Ok(count)
}
