// Collection pipeline: paginate the archive API and write raw posts.
//
// Pages are requested ascending by creation time with an `after` cursor
// advanced past the newest row seen. Each page is appended to the CSV and
// flushed before the next request, so an aborted run keeps everything
// collected so far. Rows are deduplicated by post id across pages
// (archive mirrors occasionally repeat rows at page boundaries).

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chrono::Datelike;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::archive::client::ArchiveClient;
use crate::archive::retry::{with_retry, Pacer};
use crate::archive::submissions::{self, PAGE_SIZE};
use crate::output::terminal;
use crate::store::csv::{append_raw_posts, raw_posts_writer};
use crate::store::models::RawPost;

/// Fixed pause between page requests; the archive asks for gentle clients.
const PAGE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
pub struct CollectStats {
    pub pages: u64,
    pub collected: u64,
    pub duplicates: u64,
    pub skipped: u64,
}

/// Collect all posts for `subreddit` created within [since, until) unix
/// seconds, writing them to `out_path` ordered by creation time.
pub async fn run(
    client: &ArchiveClient,
    subreddit: &str,
    since: i64,
    until: i64,
    out_path: &Path,
) -> Result<CollectStats> {
    if since >= until {
        anyhow::bail!("Empty date range: start must be before end");
    }

    let pacer = Pacer::new(PAGE_DELAY);
    let mut writer = raw_posts_writer(out_path)?;

    let mut stats = CollectStats::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut posts_per_year: BTreeMap<i32, u64> = BTreeMap::new();
    let mut after = since;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap(),
    );

    while after < until {
        let page = with_retry(&pacer, || {
            submissions::fetch_page(client, subreddit, after, until)
        })
        .await?;

        if page.is_empty() {
            break;
        }

        stats.pages += 1;
        let page_len = page.len();

        // Newest timestamp on the page drives the cursor; rows that are
        // unusable still count toward it when they carry a timestamp.
        let mut newest: Option<i64> = None;
        let mut batch: Vec<RawPost> = Vec::new();

        for submission in page {
            if let Some(ts) = submission.created_utc {
                let ts = ts as i64;
                newest = Some(newest.map_or(ts, |n| n.max(ts)));
                if ts >= until {
                    continue;
                }
            }

            match submission.into_raw_post() {
                Some(post) => {
                    if seen.insert(post.id.clone()) {
                        if let Some(created) = post.created() {
                            *posts_per_year.entry(created.year()).or_default() += 1;
                        }
                        batch.push(post);
                    } else {
                        stats.duplicates += 1;
                    }
                }
                None => stats.skipped += 1,
            }
        }

        append_raw_posts(&mut writer, &batch)?;
        stats.collected += batch.len() as u64;

        pb.set_message(format!(
            "page {} · {} posts collected",
            stats.pages, stats.collected
        ));

        // A short page means the archive ran out of rows for this range.
        if page_len < PAGE_SIZE {
            break;
        }

        match newest {
            Some(ts) => after = ts + 1,
            // A full page with no timestamps cannot advance the cursor.
            None => anyhow::bail!("Archive returned a page without timestamps — cannot paginate"),
        }
    }

    pb.finish_and_clear();

    info!(
        subreddit = subreddit,
        pages = stats.pages,
        collected = stats.collected,
        duplicates = stats.duplicates,
        skipped = stats.skipped,
        "Collection finished"
    );

    terminal::display_posts_per_year(&posts_per_year);

    Ok(stats)
}
