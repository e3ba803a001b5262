use url::Url;

use crate::core::MwError;

/// A named publisher and its feed endpoints, in visiting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub endpoints: Vec<Url>,
}

/// Ordered mapping of source names to feed endpoints.
///
/// Built once at startup and shared read-only (the aggregator holds it in an `Arc`).
/// Names are unique; adding a name twice appends to the existing endpoint list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// WSJ, Bloomberg, Financial Times and The Economist.
    pub fn financial_press() -> Self {
        // Hard-coded URLs; parsing cannot fail.
        Self::new()
            .with_source(
                "WSJ",
                [
                    "https://feeds.a.dj.com/rss/RSSWorldNews.xml",
                    "https://feeds.a.dj.com/rss/RSSMarketsMain.xml",
                ],
            )
            .and_then(|r| {
                r.with_source(
                    "Bloomberg",
                    ["https://www.bloomberg.com/politics/feeds/site.xml"],
                )
            })
            .and_then(|r| r.with_source("Financial Times", ["https://www.ft.com/?format=rss"]))
            .and_then(|r| {
                r.with_source(
                    "The Economist",
                    ["https://www.economist.com/latest/rss.xml"],
                )
            })
            .unwrap_or_default()
    }

    /// Adds (or extends) a source.
    ///
    /// # Errors
    ///
    /// Returns `MwError::InvalidParams` for an empty name and `MwError::Url` when an
    /// endpoint does not parse.
    pub fn with_source<I, S>(mut self, name: impl Into<String>, endpoints: I) -> Result<Self, MwError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MwError::InvalidParams("source name must not be empty".into()));
        }
        let urls = endpoints
            .into_iter()
            .map(|s| Url::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        match self.sources.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.endpoints.extend(urls),
            None => self.sources.push(Source {
                name,
                endpoints: urls,
            }),
        }
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Source> {
        self.sources.iter()
    }

    /// Source names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name.as_str())
    }

    /// `(name, [endpoint URLs])` pairs in registry order, for populating filter UIs.
    pub fn listing(&self) -> Vec<(String, Vec<String>)> {
        self.sources
            .iter()
            .map(|s| {
                (
                    s.name.clone(),
                    s.endpoints.iter().map(|u| u.to_string()).collect(),
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<'a> IntoIterator for &'a SourceRegistry {
    type Item = &'a Source;
    type IntoIter = std::slice::Iter<'a, Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
