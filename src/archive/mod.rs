// Archive API access — HTTP client, request pacing/retry, and the
// paginated submission fetcher the collector drives.

pub mod client;
pub mod retry;
pub mod submissions;
