use std::collections::HashSet;

use futures::future::join_all;

use crate::{
    core::{MwClient, net},
    feeds::{
        CapPolicy,
        model::Article,
        normalize::normalize_entry,
        registry::{Source, SourceRegistry},
        wire,
    },
};

pub(super) async fn fetch_articles(
    client: &MwClient,
    registry: &SourceRegistry,
    source_filter: Option<&str>,
    per_source: usize,
) -> Vec<Article> {
    let tasks = registry
        .iter()
        .filter(|s| source_filter.is_none_or(|f| s.name == f))
        .map(|s| collect_source(client, s, per_source));

    let collected: Vec<Article> = join_all(tasks).await.into_iter().flatten().collect();
    dedupe_and_sort(collected)
}

/// Visits a source's endpoints in order until `per_source` entries are in hand.
async fn collect_source(client: &MwClient, source: &Source, per_source: usize) -> Vec<Article> {
    let mut out: Vec<Article> = Vec::new();

    for url in &source.endpoints {
        if out.len() >= per_source {
            break;
        }

        let Some(body) = net::fetch_or_skip(client, url, client.timeouts().feed).await else {
            continue;
        };
        let entries = match wire::parse_feed(&body) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "unparseable feed; skipping");
                continue;
            }
        };

        let take = match client.cap_policy() {
            CapPolicy::BetweenBatches => entries.len(),
            CapPolicy::Truncate => per_source - out.len(),
        };
        out.extend(
            entries
                .iter()
                .take(take)
                .map(|e| normalize_entry(e, &source.name)),
        );
        tracing::debug!(source = %source.name, url = %url, entries = entries.len(), total = out.len(), "feed collected");
    }

    out
}

/// Orders articles newest first (absent dates last, ties by title descending) and
/// drops later duplicates of a non-empty link.
pub fn dedupe_and_sort(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by(|a, b| (b.published, &b.title).cmp(&(a.published, &a.title)));

    let mut seen: HashSet<String> = HashSet::new();
    articles.retain(|a| a.link.is_empty() || seen.insert(a.link.clone()));
    articles
}
