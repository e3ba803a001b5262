use serde::Deserialize;
use std::collections::BTreeMap;

use super::model::PriceQuote;

/// A close value exactly as the provider sent it.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CloseValue {
    Number(f64),
    Text(String),
}

impl CloseValue {
    /// The value as a finite float, if it is one.
    pub fn as_finite(&self) -> Option<f64> {
        let v = match self {
            CloseValue::Number(n) => *n,
            CloseValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

/// Builds a quote from the latest close, or skips the symbol when the close is
/// missing or not a finite number.
pub fn normalize_quote(symbol: &str, close: Option<&CloseValue>) -> Option<PriceQuote> {
    let price = close?.as_finite()?;
    Some(PriceQuote {
        symbol: symbol.to_string(),
        price: round2(price),
    })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/* ---------------- spark payloads ---------------- */

// The spark endpoint answers in one of two shapes: the chart-style envelope
// (`{"spark":{"result":[...]}}`) or a flat map keyed by symbol.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum SparkBody {
    Envelope(SparkEnvelope),
    Flat(BTreeMap<String, FlatSeries>),
}

#[derive(Deserialize)]
pub(crate) struct SparkEnvelope {
    pub(crate) spark: SparkNode,
}

#[derive(Deserialize)]
pub(crate) struct SparkNode {
    #[serde(default)]
    pub(crate) result: Option<Vec<SparkResult>>,
    #[allow(dead_code)]
    #[serde(default)]
    pub(crate) error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub(crate) struct SparkResult {
    #[serde(default)]
    pub(crate) symbol: Option<String>,
    #[serde(default)]
    pub(crate) response: Vec<ChartResult>,
}

#[derive(Deserialize)]
pub(crate) struct ChartResult {
    #[serde(default)]
    pub(crate) meta: Option<MetaNode>,
    #[serde(default)]
    pub(crate) indicators: Option<Indicators>,
}

#[derive(Deserialize)]
pub(crate) struct MetaNode {
    #[serde(default)]
    pub(crate) symbol: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct Indicators {
    #[serde(default)]
    pub(crate) quote: Vec<QuoteBlock>,
    #[serde(default)]
    pub(crate) adjclose: Vec<AdjCloseBlock>,
}

#[derive(Deserialize)]
pub(crate) struct QuoteBlock {
    #[serde(default)]
    pub(crate) close: Vec<Option<CloseValue>>,
}

#[derive(Deserialize)]
pub(crate) struct AdjCloseBlock {
    #[serde(default)]
    pub(crate) adjclose: Vec<Option<CloseValue>>,
}

#[derive(Deserialize)]
pub(crate) struct FlatSeries {
    #[serde(default)]
    pub(crate) symbol: Option<String>,
    #[serde(default)]
    pub(crate) close: Vec<Option<CloseValue>>,
}

/// `(symbol, latest close)` per series, in payload order. `Close` wins over `Adj Close`.
pub(crate) fn latest_closes(body: SparkBody) -> Vec<(String, Option<CloseValue>)> {
    match body {
        SparkBody::Envelope(env) => env
            .spark
            .result
            .unwrap_or_default()
            .into_iter()
            .filter_map(|r| {
                let chart = r.response.into_iter().next()?;
                let symbol = r
                    .symbol
                    .or_else(|| chart.meta.and_then(|m| m.symbol))?;
                let indicators = chart.indicators?;
                let close = indicators
                    .quote
                    .into_iter()
                    .next()
                    .map(|q| q.close)
                    .filter(|c| !c.is_empty())
                    .or_else(|| {
                        indicators
                            .adjclose
                            .into_iter()
                            .next()
                            .map(|a| a.adjclose)
                    })
                    .and_then(|series| series.into_iter().last())
                    .flatten();
                Some((symbol, close))
            })
            .collect(),
        SparkBody::Flat(map) => map
            .into_iter()
            .map(|(key, series)| {
                let symbol = series.symbol.unwrap_or(key);
                (symbol, series.close.into_iter().last().flatten())
            })
            .collect(),
    }
}
