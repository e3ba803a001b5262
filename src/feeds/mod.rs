//! News feeds: the source registry, the feed parser, normalization and the
//! per-source aggregation.

mod api;
mod model;
pub mod normalize;
mod registry;
pub mod wire;

pub use api::dedupe_and_sort;
pub use model::{Article, CapPolicy, UNTITLED};
pub use normalize::normalize_entry;
pub use registry::{Source, SourceRegistry};
pub use wire::{EntryLink, MediaItem, RawEntry, TimeStruct, parse_feed};

use crate::core::{MwClient, client::constants::DEFAULT_PER_SOURCE};

/// A builder for one uncached aggregation pass over a registry.
///
/// [`Aggregator::get_articles`](crate::Aggregator::get_articles) wraps this with the
/// article cache.
pub struct ArticlesBuilder<'a> {
    client: MwClient,
    registry: &'a SourceRegistry,
    source_filter: Option<String>,
    per_source: usize,
}

impl<'a> ArticlesBuilder<'a> {
    /// Creates a new `ArticlesBuilder` over every source in `registry`.
    pub fn new(client: &MwClient, registry: &'a SourceRegistry) -> Self {
        Self {
            client: client.clone(),
            registry,
            source_filter: None,
            per_source: DEFAULT_PER_SOURCE,
        }
    }

    /// Restricts the pass to the source with exactly this name. An empty name means no filter.
    #[must_use]
    pub fn source(mut self, name: Option<&str>) -> Self {
        self.source_filter = name.filter(|n| !n.is_empty()).map(str::to_string);
        self
    }

    /// Entries to collect per source before its remaining endpoints are skipped.
    #[must_use]
    pub const fn per_source(mut self, n: usize) -> Self {
        self.per_source = n;
        self
    }

    /// Fetches, normalizes, dedupes and orders the articles.
    ///
    /// Endpoints that fail to load or parse are logged and contribute nothing.
    pub async fn fetch(self) -> Vec<Article> {
        api::fetch_articles(
            &self.client,
            self.registry,
            self.source_filter.as_deref(),
            self.per_source,
        )
        .await
    }
}
