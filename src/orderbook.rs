//! Orderbook implementation with price-time priority matching

use crate::error::{EngineError, Result};
use crate::order::{Order, Side};
use crate::queue::OrderQueue;
use crate::types::{BookSnapshot, Price, Quantity, Symbol, Trade};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// The orderbook for a single instrument
#[derive(Debug, Clone)]
pub struct OrderBook {
    /// Instrument identifier
    symbol: Symbol,
    /// Bids (highest price first)
    bids: OrderQueue,
    /// Asks (lowest price first)
    asks: OrderQueue,
    /// Every trade executed on this book, in execution order
    trades: Vec<Trade>,
    /// Accepted submissions
    sequence: u64,
}

impl OrderBook {
    /// Create an empty orderbook
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            bids: OrderQueue::new(Side::Buy),
            asks: OrderQueue::new(Side::Sell),
            trades: Vec::new(),
            sequence: 0,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Submit a limit order and return the trades it produced.
    ///
    /// The order first crosses the opposite side while prices are
    /// compatible; whatever is left rests on its own side as a new arrival.
    /// A rejected order leaves the book untouched.
    pub fn submit(
        &mut self,
        side: Side,
        trader: impl Into<String>,
        quantity: Quantity,
        price: Price,
    ) -> Result<Vec<Trade>> {
        let trader = trader.into();

        if !quantity.is_positive() {
            warn!(symbol = %self.symbol, %trader, %quantity, "Order rejected: non-positive quantity");
            return Err(EngineError::InvalidOrder(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        if !price.is_positive() {
            warn!(symbol = %self.symbol, %trader, %price, "Order rejected: non-positive price");
            return Err(EngineError::InvalidOrder(format!(
                "price must be positive, got {price}"
            )));
        }

        let mut order = Order::new(trader, quantity, price);
        let first_trade = self.trades.len();

        self.match_order(side, &mut order);

        let rested = order.quantity;
        if !order.is_filled() {
            self.queue_mut(side).insert(order);
        }
        self.sequence += 1;

        let trades = self.trades[first_trade..].to_vec();
        info!(
            symbol = %self.symbol,
            %side,
            %quantity,
            %price,
            trades = trades.len(),
            rested = %rested,
            "Order accepted"
        );

        Ok(trades)
    }

    /// Cross an incoming order against the opposite side
    fn match_order(&mut self, side: Side, order: &mut Order) {
        let opposite = match side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };

        while !order.is_filled() {
            let Some(best) = opposite.best_price() else {
                break;
            };
            if !side.crosses(order.price, best) {
                break;
            }
            let Some(mut maker) = opposite.pop_best() else {
                break;
            };

            let matched = order.quantity.min(maker.quantity);
            let trade = match side {
                Side::Buy => Trade::new(order.trader.clone(), maker.trader.clone(), matched, maker.price),
                Side::Sell => Trade::new(maker.trader.clone(), order.trader.clone(), matched, maker.price),
            };

            debug!(
                symbol = %self.symbol,
                buyer = trade.buyer(),
                seller = trade.seller(),
                quantity = %matched,
                price = %maker.price,
                "Trade executed"
            );
            self.trades.push(trade);

            order.fill(matched);
            maker.fill(matched);

            if !maker.is_filled() {
                opposite.restore_best(maker);
            }
        }
    }

    fn queue_mut(&mut self, side: Side) -> &mut OrderQueue {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Best (highest) resting bid
    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.best()
    }

    /// Best (lowest) resting ask
    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.best()
    }

    /// Bid ladder, best first
    pub fn bids(&self) -> &OrderQueue {
        &self.bids
    }

    /// Ask ladder, best first
    pub fn asks(&self) -> &OrderQueue {
        &self.asks
    }

    /// Trade ledger in execution order
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        match (self.asks.best_price(), self.bids.best_price()) {
            (Some(ask), Some(bid)) => Some(ask.as_decimal() - bid.as_decimal()),
            _ => None,
        }
    }

    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Get orderbook snapshot
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            symbol: self.symbol.clone(),
            asks: self.asks.to_vec(),
            bids: self.bids.to_vec(),
            trades: self.trades.clone(),
            sequence: self.sequence,
        }
    }
}
