//! Exchange - registry of orderbooks keyed by ticker

use crate::error::{EngineError, Result};
use crate::order::Side;
use crate::orderbook::OrderBook;
use crate::types::{BookSnapshot, Price, Quantity, Symbol, Trade};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info};

/// A book behind its own lock. Holding the lock serializes submissions
/// on that instrument only.
pub type SharedBook = Arc<Mutex<OrderBook>>;

/// The exchange: one orderbook per instrument, in creation order
#[derive(Default)]
pub struct Exchange {
    books: RwLock<IndexMap<Symbol, SharedBook>>,
}

impl Exchange {
    /// Create an exchange with no instruments
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exchange with the given instruments already listed
    pub fn with_instruments<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let exchange = Self::new();
        for symbol in symbols {
            exchange.add_instrument(symbol);
        }
        exchange
    }

    /// List a new instrument.
    ///
    /// Returns `false` and changes nothing if the ticker already exists.
    pub fn add_instrument(&self, ticker: impl Into<String>) -> bool {
        let symbol = Symbol::new(ticker);
        // The map is only ever mutated by a single insert, so a poisoned
        // lock still guards a consistent map.
        let mut books = self.books.write().unwrap_or_else(PoisonError::into_inner);

        match books.entry(symbol) {
            Entry::Occupied(entry) => {
                debug!(symbol = %entry.key(), "Instrument already listed");
                false
            }
            Entry::Vacant(entry) => {
                info!(symbol = %entry.key(), "Instrument listed");
                let book = OrderBook::new(entry.key().clone());
                entry.insert(Arc::new(Mutex::new(book)));
                true
            }
        }
    }

    /// Resolve the book for a ticker
    pub fn get_book(&self, ticker: &str) -> Result<SharedBook> {
        let books = self.books.read().unwrap_or_else(PoisonError::into_inner);
        books
            .get(ticker)
            .cloned()
            .ok_or_else(|| EngineError::InvalidInstrument(ticker.to_string()))
    }

    pub fn contains(&self, ticker: &str) -> bool {
        let books = self.books.read().unwrap_or_else(PoisonError::into_inner);
        books.contains_key(ticker)
    }

    /// Listed tickers in creation order
    pub fn symbols(&self) -> Vec<Symbol> {
        let books = self.books.read().unwrap_or_else(PoisonError::into_inner);
        books.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let books = self.books.read().unwrap_or_else(PoisonError::into_inner);
        books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Submit a limit order to the instrument's book
    pub fn submit(
        &self,
        ticker: &str,
        side: Side,
        trader: impl Into<String>,
        quantity: Quantity,
        price: Price,
    ) -> Result<Vec<Trade>> {
        let book = self.get_book(ticker)?;
        let mut book = lock(&book)?;
        book.submit(side, trader, quantity, price)
    }

    /// Run a read-only query against one book
    pub fn with_book<R>(&self, ticker: &str, query: impl FnOnce(&OrderBook) -> R) -> Result<R> {
        let book = self.get_book(ticker)?;
        let book = lock(&book)?;
        Ok(query(&book))
    }

    /// Get best bid/ask prices for an instrument
    pub fn get_bbo(&self, ticker: &str) -> Result<(Option<Price>, Option<Price>)> {
        self.with_book(ticker, |book| {
            (
                book.best_bid().map(|o| o.price()),
                book.best_ask().map(|o| o.price()),
            )
        })
    }

    /// Snapshot of one book
    pub fn book_snapshot(&self, ticker: &str) -> Result<BookSnapshot> {
        self.with_book(ticker, OrderBook::snapshot)
    }

    /// Snapshots of every book in creation order. Books are locked one at
    /// a time, so the result is not a single point-in-time view.
    pub fn snapshots(&self) -> Result<Vec<BookSnapshot>> {
        self.symbols()
            .iter()
            .map(|symbol| self.book_snapshot(symbol.as_str()))
            .collect()
    }
}

pub(crate) fn lock(book: &SharedBook) -> Result<MutexGuard<'_, OrderBook>> {
    book.lock()
        .map_err(|_| EngineError::Internal("Lock error".to_string()))
}
