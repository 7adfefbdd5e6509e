// Handler tests — drive the router directly with tower's oneshot, no
// socket binding. The state is a small summary built in memory.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use subpulse::store::models::ClassifiedPost;
use subpulse::summary::document::Summary;
use subpulse::web::{build_router, AppState};

fn post(id: &str, ts: i64, topic: &str, author: &str, score: i64, comments: i64) -> ClassifiedPost {
    ClassifiedPost {
        id: id.to_string(),
        created_utc: ts,
        author: author.to_string(),
        title: format!("title {id}"),
        selftext: String::new(),
        score,
        num_comments: comments,
        url: String::new(),
        topic: topic.to_string(),
    }
}

fn test_state() -> AppState {
    let posts = vec![
        post("a", 1686830400, "Traffic", "alice", 50, 10), // 2023-06
        post("b", 1704888000, "Traffic", "bob", 20, 30),   // 2024-01
        post("c", 1686830400, "Food", "carol", 80, 5),     // 2023-06
    ];
    AppState {
        summary: Arc::new(Summary::build(&posts, 10).unwrap()),
    }
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = build_router(test_state());
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn health_returns_ok() {
    let (status, json) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn summary_returns_whole_document() {
    let (status, json) = get_json("/api/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metadata"]["total_posts"], 3);
    assert_eq!(json["topic_trends"]["Traffic"]["2023"], 1);
    assert_eq!(json["topic_trends"]["Traffic"]["2024"], 1);
}

#[tokio::test]
async fn metadata_includes_insights() {
    let (status, json) = get_json("/api/metadata").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metadata"]["total_posts"], 3);
    assert!(json["insights"]["top_topic"]["name"].is_string());
}

#[tokio::test]
async fn trends_returns_yearly_counts_and_distribution() {
    let (status, json) = get_json("/api/trends").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["topic_trends"]["Food"]["2023"], 1);
    assert_eq!(json["topic_distribution"][0]["name"], "Traffic");
    assert_eq!(json["topic_distribution"][0]["value"], 2);
}

#[tokio::test]
async fn monthly_looks_up_one_topic() {
    let (status, json) = get_json("/api/monthly?topic=Traffic").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["topic"], "Traffic");
    assert_eq!(json["series"]["2023-06"], 1);
    assert_eq!(json["series"]["2024-01"], 1);
}

#[tokio::test]
async fn monthly_unknown_topic_is_404() {
    let (status, json) = get_json("/api/monthly?topic=Nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("Nope"));
}

#[tokio::test]
async fn monthly_without_topic_is_400() {
    let (status, _) = get_json("/api/monthly").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn top_posts_default_order_is_score_descending() {
    let (status, json) = get_json("/api/top-posts").await;
    assert_eq!(status, StatusCode::OK);
    let posts = json["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0]["score"], 80);
    assert_eq!(posts[1]["score"], 50);
}

#[tokio::test]
async fn top_posts_search_filters_by_author() {
    let (status, json) = get_json("/api/top-posts?q=alice").await;
    assert_eq!(status, StatusCode::OK);
    let posts = json["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["author"], "alice");
}

#[tokio::test]
async fn top_posts_sort_by_comments() {
    let (status, json) = get_json("/api/top-posts?sort=comments").await;
    assert_eq!(status, StatusCode::OK);
    let posts = json["posts"].as_array().unwrap();
    assert_eq!(posts[0]["num_comments"], 30);
}

#[tokio::test]
async fn top_posts_limit_caps_rows() {
    let (status, json) = get_json("/api/top-posts?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["posts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_path_serves_the_dashboard_shell() {
    let app = build_router(test_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/some/client/route")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));
}
