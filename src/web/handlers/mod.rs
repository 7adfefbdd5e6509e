// JSON API handlers — read-only views into the preloaded summary.

pub mod summary;
pub mod top_posts;
pub mod trends;
