use serde::{Deserialize, Serialize};

use crate::config::FALLBACK_FLAVOR;

/// One flavor-text record, shaped like the records external fetchers return.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub content: String,
    #[serde(default)]
    pub author: String,
}

impl Quote {
    /// Convenience constructor for owned strings.
    #[must_use]
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: author.into(),
        }
    }
}

/// Source of flavor text for freshly spawned food.
///
/// Implementations must never block a tick: when nothing is ready,
/// `next_quote` returns `None` and the engine substitutes the fixed
/// fallback immediately.
pub trait QuoteSource {
    /// Returns the next quote, or `None` when the source is empty.
    fn next_quote(&mut self) -> Option<Quote>;

    /// Drops any stale rotation state so a fresh batch can be served.
    fn refresh(&mut self) {}
}

/// Built-in offline rotation of quotes.
#[derive(Debug, Clone)]
pub struct CannedQuotes {
    quotes: Vec<Quote>,
    cursor: usize,
}

impl CannedQuotes {
    /// Creates a rotation over the given quotes.
    #[must_use]
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes, cursor: 0 }
    }

    /// Parses a JSON array of `{content, author}` records, as produced by
    /// quote-fetching collaborators.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Vec<Quote>>(raw).map(Self::new)
    }

    /// Returns the number of quotes in the rotation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true when the rotation holds no quotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl Default for CannedQuotes {
    /// The offline power-up descriptions shipped with the game.
    fn default() -> Self {
        Self::new(vec![
            Quote::new("Extra speed boost!", "System"),
            Quote::new("Double points for 10 seconds!", "System"),
            Quote::new("Immunity to obstacles!", "System"),
        ])
    }
}

impl QuoteSource for CannedQuotes {
    fn next_quote(&mut self) -> Option<Quote> {
        if self.quotes.is_empty() {
            return None;
        }
        let quote = self.quotes[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.quotes.len();
        Some(quote)
    }

    fn refresh(&mut self) {
        self.cursor = 0;
    }
}

/// Source that yields nothing; every food gets the fixed fallback flavor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQuotes;

impl QuoteSource for NoQuotes {
    fn next_quote(&mut self) -> Option<Quote> {
        None
    }
}

/// Formats the flavor line attached to a food worth `points`.
#[must_use]
pub fn flavor_line(quote: Option<&Quote>, points: u32) -> String {
    let content = quote.map_or(FALLBACK_FLAVOR, |q| q.content.as_str());
    format!("{content} ({points} pts)")
}
