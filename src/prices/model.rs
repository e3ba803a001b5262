use serde::Serialize;

/// A normalized equity price snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    /// Uppercase ticker with `.` separators replaced by `-` (e.g. `BRK-B`).
    pub symbol: String,
    /// Latest daily close, rounded to 2 decimal places.
    pub price: f64,
}
