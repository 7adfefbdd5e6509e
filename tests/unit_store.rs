// Unit tests for the CSV storage layer: round-trips, malformed-row
// skipping, and missing-file errors.

use std::io::Write;

use subpulse::store::csv::{
    append_raw_posts, count_rows, raw_posts_writer, read_classified_posts, read_raw_posts,
    write_classified_posts,
};
use subpulse::store::models::{ClassifiedPost, RawPost};

fn raw(id: &str) -> RawPost {
    RawPost {
        id: id.to_string(),
        created_utc: 1686830400,
        author: "someone".to_string(),
        title: format!("title {id}"),
        selftext: "body, with a comma and \"quotes\"".to_string(),
        score: 12,
        num_comments: 3,
        url: format!("https://reddit.com/{id}"),
    }
}

fn classified(id: &str, topic: &str) -> ClassifiedPost {
    raw(id).with_topic(topic.to_string())
}

// ============================================================
// Round-trips
// ============================================================

#[test]
fn raw_posts_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw_posts.csv");

    let posts = vec![raw("a"), raw("b"), raw("c")];
    let mut writer = raw_posts_writer(&path).unwrap();
    append_raw_posts(&mut writer, &posts).unwrap();
    drop(writer);

    let outcome = read_raw_posts(&path).unwrap();
    assert_eq!(outcome.rows, posts);
    assert_eq!(outcome.skipped, 0);
}

#[test]
fn raw_posts_append_across_batches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw_posts.csv");

    let mut writer = raw_posts_writer(&path).unwrap();
    append_raw_posts(&mut writer, &[raw("a")]).unwrap();
    append_raw_posts(&mut writer, &[raw("b"), raw("c")]).unwrap();
    drop(writer);

    let outcome = read_raw_posts(&path).unwrap();
    assert_eq!(outcome.rows.len(), 3);
    assert_eq!(outcome.rows[2].id, "c");
}

#[test]
fn classified_posts_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classified.csv");

    let posts = vec![classified("a", "Traffic"), classified("b", "Food")];
    write_classified_posts(&path, &posts).unwrap();

    let outcome = read_classified_posts(&path).unwrap();
    assert_eq!(outcome.rows, posts);
    assert_eq!(outcome.skipped, 0);
}

// ============================================================
// Malformed rows are skipped, not fatal
// ============================================================

#[test]
fn malformed_rows_are_skipped_and_counted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw_posts.csv");

    // Valid header + one good row + one row with a garbage timestamp +
    // one row with too few fields
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "id,created_utc,author,title,selftext,score,num_comments,url").unwrap();
    writeln!(file, "a,1686830400,someone,hello,,1,0,").unwrap();
    writeln!(file, "b,not-a-timestamp,someone,bad,,1,0,").unwrap();
    writeln!(file, "c,1686830400").unwrap();
    drop(file);

    let outcome = read_raw_posts(&path).unwrap();
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0].id, "a");
    assert_eq!(outcome.skipped, 2);
}

// ============================================================
// Missing input files are fatal with a stage hint
// ============================================================

#[test]
fn missing_raw_file_names_the_collect_stage() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_raw_posts(&dir.path().join("nope.csv")).unwrap_err();
    assert!(err.to_string().contains("subpulse collect"));
}

#[test]
fn missing_classified_file_names_the_classify_stage() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_classified_posts(&dir.path().join("nope.csv")).unwrap_err();
    assert!(err.to_string().contains("subpulse classify"));
}

// ============================================================
// Row counting (status display)
// ============================================================

#[test]
fn count_rows_excludes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw_posts.csv");

    let mut writer = raw_posts_writer(&path).unwrap();
    append_raw_posts(&mut writer, &[raw("a"), raw("b")]).unwrap();
    drop(writer);

    assert_eq!(count_rows(&path).unwrap(), 2);
}
