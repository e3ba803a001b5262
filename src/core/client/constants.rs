//! Centralized constants for default endpoints, timeouts and UA.

use std::time::Duration;

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/124.0.0.0 Safari/537.36"
);

/// Environment variable that overrides the UA in `MwClientBuilder::from_env`.
pub(crate) const USER_AGENT_ENV: &str = "MW_USER_AGENT";

/// Wikipedia page listing the S&P 500 constituents.
pub(crate) const DEFAULT_LISTING_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

/// Yahoo spark API (batched close series, symbols as a query param).
pub(crate) const DEFAULT_BASE_SPARK: &str = "https://query1.finance.yahoo.com/v7/finance/spark";

pub(crate) const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const DEFAULT_LISTING_TIMEOUT: Duration = Duration::from_secs(20);
pub(crate) const DEFAULT_PRICES_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const DEFAULT_ARTICLES_TTL: Duration = Duration::from_secs(10 * 60);
pub(crate) const DEFAULT_SYMBOLS_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub(crate) const DEFAULT_PRICES_TTL: Duration = Duration::from_secs(5 * 60);

/// Symbols per batched price request.
pub(crate) const DEFAULT_PRICE_CHUNK: usize = 100;

/// Entries collected per source when the caller does not say otherwise.
pub const DEFAULT_PER_SOURCE: usize = 30;
