use std::convert::Infallible;
use std::sync::Arc;

use crate::{
    core::{MwClient, MwError, TtlCache, TtlMap},
    feeds::{Article, ArticlesBuilder, SourceRegistry},
    prices::{self, PriceQuote},
};

/// Cache key of one article query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleQuery {
    pub source: Option<String>,
    pub per_source: usize,
}

/// The cached query surface the serving layer calls into.
///
/// Holds a client, a shared registry and one cache per data class. Clones share the
/// same caches, so an `Aggregator` can be handed to every request handler.
///
/// # Example
///
/// ```no_run
/// # use marketwire::Aggregator;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let agg = Aggregator::default();
///
/// for a in agg.get_articles(Some("WSJ"), 30).await.iter().take(5) {
///     println!("{} ({})", a.title, a.source);
/// }
///
/// let prices = agg.get_sp500_prices().await?;
/// println!("{} quotes", prices.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: MwClient,
    registry: Arc<SourceRegistry>,
    articles: Arc<TtlMap<ArticleQuery, Vec<Article>>>,
    symbols: Arc<TtlCache<Vec<String>>>,
    prices: Arc<TtlCache<Vec<PriceQuote>>>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(MwClient::default(), SourceRegistry::financial_press())
    }
}

impl Aggregator {
    /// Creates an aggregator with fresh caches sized by the client's TTLs.
    pub fn new(client: MwClient, registry: SourceRegistry) -> Self {
        let ttls = client.ttls();
        Self::with_caches(
            client,
            Arc::new(registry),
            Arc::new(TtlMap::new(ttls.articles)),
            Arc::new(TtlCache::new(ttls.symbols)),
            Arc::new(TtlCache::new(ttls.prices)),
        )
    }

    /// Creates an aggregator over caches owned by the caller.
    pub fn with_caches(
        client: MwClient,
        registry: Arc<SourceRegistry>,
        articles: Arc<TtlMap<ArticleQuery, Vec<Article>>>,
        symbols: Arc<TtlCache<Vec<String>>>,
        prices: Arc<TtlCache<Vec<PriceQuote>>>,
    ) -> Self {
        Self {
            client,
            registry,
            articles,
            symbols,
            prices,
        }
    }

    pub fn client(&self) -> &MwClient {
        &self.client
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// `{source name -> [endpoint URLs]}` in registry order.
    pub fn sources(&self) -> Vec<(String, Vec<String>)> {
        self.registry.listing()
    }

    /// Aggregated articles, newest first, deduplicated by link.
    ///
    /// `source_filter` keeps only the source with exactly that name (`None` or an
    /// empty string means all). Never fails: endpoints that cannot be loaded simply
    /// contribute nothing.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self)))]
    pub async fn get_articles(&self, source_filter: Option<&str>, per_source: usize) -> Vec<Article> {
        let source_filter = source_filter.filter(|s| !s.is_empty());
        let key = ArticleQuery {
            source: source_filter.map(str::to_string),
            per_source,
        };
        self.articles
            .get_or_compute(&key, || async {
                Ok::<_, Infallible>(
                    ArticlesBuilder::new(&self.client, &self.registry)
                        .source(source_filter)
                        .per_source(per_source)
                        .fetch()
                        .await,
                )
            })
            .await
            .unwrap_or_else(|never| match never {})
    }

    /// The S&P 500 constituents in listing order, cached for the symbols TTL.
    ///
    /// `force_refresh` reloads the listing even when the cached copy is fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing page cannot be fetched or has no symbol table.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err))]
    pub async fn get_sp500_symbols(&self, force_refresh: bool) -> Result<Vec<String>, MwError> {
        let load = || prices::fetch_symbols(&self.client);
        if force_refresh {
            self.symbols.refresh(load).await
        } else {
            self.symbols.get_or_compute(load).await
        }
    }

    /// Latest closes for the constituents, sorted by symbol, cached for the prices TTL.
    ///
    /// # Errors
    ///
    /// Returns an error only when the symbol listing is unavailable; failed price
    /// chunks are skipped.
    #[cfg_attr(feature = "instrument", tracing::instrument(skip(self), err))]
    pub async fn get_sp500_prices(&self) -> Result<Vec<PriceQuote>, MwError> {
        self.prices
            .get_or_compute(|| async {
                let symbols = self.get_sp500_symbols(false).await?;
                Ok::<_, MwError>(prices::fetch_prices(&self.client, &symbols).await)
            })
            .await
    }

    /// Drops every cached value.
    pub async fn clear_caches(&self) {
        self.articles.clear().await;
        self.symbols.invalidate().await;
        self.prices.invalidate().await;
    }
}
