// GET /api/top-posts — the precomputed top-post list with search and sort.
//
// Optional ?q= substring-filters title and author (case-insensitive),
// ?sort= is one of score|comments|year (default score), ?limit= caps the
// row count (default 50, max 500). Filtering happens over the preloaded
// list; there is no recomputation and no storage access.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::summary::document::TopPost;
use crate::web::AppState;

#[derive(Deserialize, Default)]
pub struct TopPostsQuery {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/top-posts — filtered, sorted view of the top-post table.
pub async fn list_top_posts(
    State(state): State<AppState>,
    Query(params): Query<TopPostsQuery>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(50).min(500);
    let needle = params.q.unwrap_or_default().to_lowercase();

    let mut posts: Vec<TopPost> = state
        .summary
        .top_posts
        .iter()
        .filter(|post| {
            needle.is_empty()
                || post.title.to_lowercase().contains(&needle)
                || post.author.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    match params.sort.as_deref() {
        Some("comments") => posts.sort_by(|a, b| b.num_comments.cmp(&a.num_comments)),
        Some("year") => posts.sort_by(|a, b| b.year.cmp(&a.year)),
        // "score" and anything unrecognized keep the precomputed order
        _ => {}
    }

    posts.truncate(limit);

    Json(serde_json::json!({ "posts": posts }))
}
