// Unit tests for the aggregate summary: count invariants and the JSON
// file round-trip the presenter depends on.

use subpulse::store::models::ClassifiedPost;
use subpulse::summary::document::Summary;

fn post(id: &str, ts: i64, topic: &str, author: &str, score: i64, comments: i64) -> ClassifiedPost {
    ClassifiedPost {
        id: id.to_string(),
        created_utc: ts,
        author: author.to_string(),
        title: format!("post {id}"),
        selftext: String::new(),
        score,
        num_comments: comments,
        url: format!("https://reddit.com/{id}"),
        topic: topic.to_string(),
    }
}

// Midday UTC timestamps
const TS_2022: i64 = 1655294400; // 2022-06-15
const TS_2023: i64 = 1686830400; // 2023-06-15
const TS_2024: i64 = 1704888000; // 2024-01-10

fn sample_posts() -> Vec<ClassifiedPost> {
    vec![
        post("a", TS_2023, "Food", "alice", 10, 2),
        post("b", TS_2023, "Food", "bob", 25, 8),
        post("c", TS_2023, "Food", "alice", 5, 1),
        post("d", TS_2022, "Traffic", "carol", 90, 40),
        post("e", TS_2024, "Traffic", "[deleted]", 30, 12),
        post("f", TS_2024, "Weather", "dave", 2, 0),
    ]
}

// ============================================================
// Count invariants
// ============================================================

#[test]
fn three_food_posts_in_2023() {
    let summary = Summary::build(&sample_posts(), 10).unwrap();
    assert_eq!(summary.topic_trends["Food"][&2023], 3);
}

#[test]
fn yearly_sums_match_topic_totals() {
    let summary = Summary::build(&sample_posts(), 10).unwrap();

    for (topic, years) in &summary.topic_trends {
        let yearly_sum: u64 = years.values().sum();
        let expected = sample_posts().iter().filter(|p| &p.topic == topic).count() as u64;
        assert_eq!(
            yearly_sum, expected,
            "Yearly counts for '{topic}' should sum to its post count"
        );
    }
}

#[test]
fn monthly_sums_match_yearly_sums() {
    let summary = Summary::build(&sample_posts(), 10).unwrap();

    for (topic, months) in &summary.monthly_trends {
        let monthly_sum: u64 = months.values().sum();
        assert_eq!(
            monthly_sum,
            summary.total_for_topic(topic),
            "Monthly counts for '{topic}' should sum to the yearly total"
        );
    }
}

#[test]
fn totals_cover_every_post() {
    let summary = Summary::build(&sample_posts(), 10).unwrap();
    assert_eq!(summary.metadata.total_posts, 6);

    let by_topic: u64 = summary
        .topic_trends
        .keys()
        .map(|t| summary.total_for_topic(t))
        .sum();
    assert_eq!(by_topic, 6);

    let by_author: u64 = summary.author_counts.values().sum();
    assert_eq!(by_author, 6);
}

#[test]
fn top_posts_are_score_descending() {
    let summary = Summary::build(&sample_posts(), 3).unwrap();
    assert_eq!(summary.top_posts.len(), 3);
    for pair in summary.top_posts.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "Top posts out of order: {} before {}",
            pair[0].score,
            pair[1].score
        );
    }
    assert_eq!(summary.top_posts[0].score, 90);
    assert_eq!(summary.top_posts[0].topic, "Traffic");
}

#[test]
fn author_counts_include_deleted_but_rankings_exclude_it() {
    let summary = Summary::build(&sample_posts(), 10).unwrap();
    assert_eq!(summary.author_counts["[deleted]"], 1);
    assert!(summary
        .insights
        .top_authors
        .iter()
        .all(|a| a.author != "[deleted]"));
    assert_eq!(summary.insights.top_authors[0].author, "alice");
    assert_eq!(summary.insights.top_authors[0].count, 2);
}

// ============================================================
// Serialization round-trip
// ============================================================

#[test]
fn file_round_trip_reproduces_identical_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");

    let summary = Summary::build(&sample_posts(), 10).unwrap();
    summary.save(&path).unwrap();
    let loaded = Summary::load(&path).unwrap();

    assert_eq!(loaded.metadata.total_posts, summary.metadata.total_posts);
    assert_eq!(loaded.topic_trends, summary.topic_trends);
    assert_eq!(loaded.monthly_trends, summary.monthly_trends);
    assert_eq!(loaded.author_counts, summary.author_counts);
    assert_eq!(loaded.top_posts.len(), summary.top_posts.len());

    // And the serialized form itself is stable
    let once = serde_json::to_string(&summary).unwrap();
    let twice = serde_json::to_string(&loaded).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn load_missing_summary_is_fatal_with_stage_hint() {
    let dir = tempfile::tempdir().unwrap();
    let err = Summary::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("subpulse aggregate"));
}

#[test]
fn load_corrupt_summary_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Summary::load(&path).unwrap_err();
    assert!(err.to_string().contains("corrupt"));
}
