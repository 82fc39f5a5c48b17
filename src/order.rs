//! Order types and structures

use crate::types::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Whether a taker on this side at `limit` may trade with a maker at `resting`
    pub fn crosses(&self, limit: Price, resting: Price) -> bool {
        match self {
            Side::Buy => resting <= limit,
            Side::Sell => resting >= limit,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// A limit order.
///
/// Arrival rank is not stored: it is the order's position inside its queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Trader who placed the order
    pub(crate) trader: String,
    /// Remaining unfilled quantity
    pub(crate) quantity: Quantity,
    /// Limit price
    pub(crate) price: Price,
}

impl Order {
    pub fn new(trader: impl Into<String>, quantity: Quantity, price: Price) -> Self {
        Self {
            trader: trader.into(),
            quantity,
            price,
        }
    }

    pub fn trader(&self) -> &str {
        &self.trader
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn is_filled(&self) -> bool {
        !self.quantity.is_positive()
    }

    /// Fill some quantity. Callers never pass more than the remaining quantity.
    pub(crate) fn fill(&mut self, qty: Quantity) {
        self.quantity -= qty;
    }
}
