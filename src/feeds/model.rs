use chrono::{DateTime, Utc};
use serde::Serialize;

/// Placeholder used when an entry carries no title.
pub const UNTITLED: &str = "Untitled";

/// A normalized news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// The headline, or [`UNTITLED`].
    pub title: String,
    /// Link to the article. Identity key for deduplication; may be empty.
    pub link: String,
    /// Name of the registry source the article came from.
    pub source: String,
    /// Publication time, if the entry carried a parseable date.
    pub published: Option<DateTime<Utc>>,
    /// The entry's summary, verbatim.
    pub summary: Option<String>,
    /// URL of an image attached to the entry.
    pub image: Option<String>,
}

/// How the per-source article cap applies to a feed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapPolicy {
    /// The cap is checked between endpoints: a batch is taken whole, and no further
    /// endpoint of the source is fetched once the running count reaches the cap.
    /// One batch may overshoot. (Default)
    #[default]
    BetweenBatches,
    /// Each batch contributes at most the remaining quota, so a source never yields
    /// more than the cap.
    Truncate,
}
