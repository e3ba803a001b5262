//! S&P 500 constituents and their latest daily closes.

mod api;
pub mod listing;
mod model;
pub mod wire;

pub use listing::parse_symbol_table;
pub use model::PriceQuote;
pub use wire::{CloseValue, normalize_quote};

use crate::core::{MwClient, MwError};

/// Canonical ticker form: trimmed, uppercase, `.` separators as `-` (`brk.b` -> `BRK-B`).
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase().replace('.', "-")
}

/// Loads the constituents listing, uncached.
///
/// # Errors
///
/// Returns an error if the listing page cannot be fetched or carries no symbol table.
pub async fn fetch_symbols(client: &MwClient) -> Result<Vec<String>, MwError> {
    api::fetch_symbols(client).await
}

/// Fetches the latest close for each symbol in batched requests, uncached.
///
/// The result holds one quote per symbol, sorted by symbol. Symbols whose close is
/// missing or non-numeric, and chunks that fail, are left out.
pub async fn fetch_prices(client: &MwClient, symbols: &[String]) -> Vec<PriceQuote> {
    api::fetch_prices(client, symbols).await
}
