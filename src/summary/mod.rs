// The aggregate summary — everything the dashboard needs, precomputed.

pub mod document;
pub mod insights;
pub mod keywords;
