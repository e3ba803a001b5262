//! Public client surface + builder.
//! Defaults (UA, endpoints, timeouts, TTLs) live in `constants`.

pub(crate) mod constants;

use crate::core::MwError;
use crate::feeds::CapPolicy;
use constants::{
    DEFAULT_ARTICLES_TTL, DEFAULT_BASE_SPARK, DEFAULT_FEED_TIMEOUT, DEFAULT_LISTING_TIMEOUT,
    DEFAULT_LISTING_URL, DEFAULT_PRICE_CHUNK, DEFAULT_PRICES_TIMEOUT, DEFAULT_PRICES_TTL,
    DEFAULT_SYMBOLS_TTL, USER_AGENT, USER_AGENT_ENV,
};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Per-data-class request timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// One RSS/Atom endpoint.
    pub feed: Duration,
    /// The constituents listing page.
    pub listing: Duration,
    /// One batched price request.
    pub prices: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            feed: DEFAULT_FEED_TIMEOUT,
            listing: DEFAULT_LISTING_TIMEOUT,
            prices: DEFAULT_PRICES_TIMEOUT,
        }
    }
}

/// Time-to-live for each cached operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    /// Aggregated articles, per `(source_filter, per_source)` query.
    pub articles: Duration,
    /// The symbol listing.
    pub symbols: Duration,
    /// The price snapshot.
    pub prices: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            articles: DEFAULT_ARTICLES_TTL,
            symbols: DEFAULT_SYMBOLS_TTL,
            prices: DEFAULT_PRICES_TTL,
        }
    }
}

/// Thin wrapper that holds a configured HTTP client, upstream URLs and tuning knobs.
///
/// Cloning is cheap; `reqwest::Client` is reference counted internally.
#[derive(Debug, Clone)]
pub struct MwClient {
    http: Client,
    listing_url: Url,
    base_spark: Url,
    timeouts: Timeouts,
    ttls: CacheTtls,
    price_chunk: usize,
    cap_policy: CapPolicy,
}

impl Default for MwClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl MwClient {
    /// Create a new builder.
    pub fn builder() -> MwClientBuilder {
        MwClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn listing_url(&self) -> &Url {
        &self.listing_url
    }
    pub(crate) fn base_spark(&self) -> &Url {
        &self.base_spark
    }
    pub(crate) fn price_chunk(&self) -> usize {
        self.price_chunk
    }
    pub(crate) fn cap_policy(&self) -> CapPolicy {
        self.cap_policy
    }

    /// The request timeouts this client applies.
    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// The cache TTLs an `Aggregator` built on this client uses.
    pub fn ttls(&self) -> CacheTtls {
        self.ttls
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct MwClientBuilder {
    user_agent: Option<String>,
    listing_url: Option<Url>,
    base_spark: Option<Url>,
    connect_timeout: Option<Duration>,
    timeouts: Timeouts,
    ttls: CacheTtls,
    price_chunk: Option<usize>,
    cap_policy: CapPolicy,
}

impl MwClientBuilder {
    /// Start from defaults, then apply `MW_USER_AGENT` if it is set and non-empty.
    pub fn from_env() -> Self {
        let mut b = Self::default();
        if let Ok(ua) = std::env::var(USER_AGENT_ENV)
            && !ua.trim().is_empty()
        {
            b.user_agent = Some(ua);
        }
        b
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the constituents listing page
    /// (e.g., `https://en.wikipedia.org/wiki/List_of_S%26P_500_companies`).
    pub fn listing_url(mut self, url: Url) -> Self {
        self.listing_url = Some(url);
        self
    }

    /// Override the spark API endpoint (e.g., `https://query1.finance.yahoo.com/v7/finance/spark`).
    pub fn base_spark(mut self, url: Url) -> Self {
        self.base_spark = Some(url);
        self
    }

    /// Timeout for each feed endpoint. Default: 10s.
    pub fn feed_timeout(mut self, dur: Duration) -> Self {
        self.timeouts.feed = dur;
        self
    }

    /// Timeout for the listing page. Default: 20s.
    pub fn listing_timeout(mut self, dur: Duration) -> Self {
        self.timeouts.listing = dur;
        self
    }

    /// Timeout for each batched price request. Default: 30s.
    pub fn prices_timeout(mut self, dur: Duration) -> Self {
        self.timeouts.prices = dur;
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// TTL of the article cache. Default: 10 minutes.
    pub fn articles_ttl(mut self, dur: Duration) -> Self {
        self.ttls.articles = dur;
        self
    }

    /// TTL of the symbol listing cache. Default: 24 hours.
    pub fn symbols_ttl(mut self, dur: Duration) -> Self {
        self.ttls.symbols = dur;
        self
    }

    /// TTL of the price snapshot cache. Default: 5 minutes.
    pub fn prices_ttl(mut self, dur: Duration) -> Self {
        self.ttls.prices = dur;
        self
    }

    /// Symbols per batched price request. Default: 100.
    pub fn price_chunk(mut self, n: usize) -> Self {
        self.price_chunk = Some(n);
        self
    }

    /// How the per-source article cap is enforced. Default: [`CapPolicy::BetweenBatches`].
    pub fn cap_policy(mut self, policy: CapPolicy) -> Self {
        self.cap_policy = policy;
        self
    }

    pub fn build(self) -> Result<MwClient, MwError> {
        let listing_url = match self.listing_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_LISTING_URL)?,
        };
        let base_spark = match self.base_spark {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_SPARK)?,
        };

        let price_chunk = self.price_chunk.unwrap_or(DEFAULT_PRICE_CHUNK);
        if price_chunk == 0 {
            return Err(MwError::InvalidParams("price_chunk must be at least 1".into()));
        }

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(MwClient {
            http,
            listing_url,
            base_spark,
            timeouts: self.timeouts,
            ttls: self.ttls,
            price_chunk,
            cap_policy: self.cap_policy,
        })
    }
}
