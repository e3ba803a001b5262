use std::collections::BTreeMap;

use futures::future::join_all;

use crate::{
    core::{MwClient, MwError, net},
    prices::{
        listing,
        model::PriceQuote,
        wire::{self, SparkBody},
    },
};

pub(super) async fn fetch_symbols(client: &MwClient) -> Result<Vec<String>, MwError> {
    let url = client.listing_url();
    let body = net::fetch(client, url, client.timeouts().listing).await?;

    let symbols = listing::parse_symbol_table(&String::from_utf8_lossy(&body))?;
    tracing::debug!(url = %url, count = symbols.len(), "symbol listing loaded");
    Ok(symbols)
}

pub(super) async fn fetch_prices(client: &MwClient, symbols: &[String]) -> Vec<PriceQuote> {
    let tasks = symbols
        .chunks(client.price_chunk())
        .map(|chunk| fetch_chunk(client, chunk));

    // BTreeMap keeps one quote per symbol and yields them in ascending order.
    let mut by_symbol: BTreeMap<String, PriceQuote> = BTreeMap::new();
    for quote in join_all(tasks).await.into_iter().flatten() {
        by_symbol.insert(quote.symbol.clone(), quote);
    }
    by_symbol.into_values().collect()
}

/// One batched request for up to `price_chunk` symbols. Failures and empty
/// payloads yield no quotes.
async fn fetch_chunk(client: &MwClient, chunk: &[String]) -> Vec<PriceQuote> {
    let mut url = client.base_spark().clone();
    url.query_pairs_mut()
        .append_pair("symbols", &chunk.join(","))
        .append_pair("range", "1d")
        .append_pair("interval", "1d");

    let Some(body) = net::fetch_or_skip(client, &url, client.timeouts().prices).await else {
        return Vec::new();
    };
    let parsed: SparkBody = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "undecodable price payload; skipping chunk");
            return Vec::new();
        }
    };

    let quotes: Vec<PriceQuote> = wire::latest_closes(parsed)
        .into_iter()
        .filter_map(|(symbol, close)| wire::normalize_quote(&symbol, close.as_ref()))
        .collect();
    if quotes.is_empty() {
        tracing::debug!(first = ?chunk.first(), size = chunk.len(), "price chunk returned no data");
    }
    quotes
}
