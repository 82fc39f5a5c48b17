//! Read-only aggregation over ledgers and resting orders
//!
//! Books are locked one at a time, so a query running alongside
//! submissions sees each book at a slightly different moment.

use crate::error::{EngineError, Result};
use crate::exchange::Exchange;
use crate::types::Trade;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Net position of `trader` per instrument: bought minus sold.
///
/// Instruments the trader never traded, or where the net is flat, are left out.
/// A net outside the decimal range is reported as [`EngineError::Overflow`].
pub fn stock_owned(exchange: &Exchange, trader: &str) -> Result<BTreeMap<String, Decimal>> {
    let mut owned = BTreeMap::new();

    for symbol in exchange.symbols() {
        let net = exchange.with_book(symbol.as_str(), |book| net_position(book.trades(), trader))?;
        let Some(net) = net else {
            return Err(EngineError::Overflow(format!(
                "net position of {trader} in {symbol}"
            )));
        };

        if !net.is_zero() {
            owned.insert(symbol.0, net);
        }
    }

    Ok(owned)
}

fn net_position(trades: &[Trade], trader: &str) -> Option<Decimal> {
    trades.iter().try_fold(Decimal::ZERO, |net, trade| {
        let mut net = net;
        if trade.buyer() == trader {
            net = net.checked_add(trade.quantity().as_decimal())?;
        }
        if trade.seller() == trader {
            net = net.checked_sub(trade.quantity().as_decimal())?;
        }
        Some(net)
    })
}

/// Every trader that bought, sold, or has an order resting anywhere
pub fn all_traders(exchange: &Exchange) -> Result<BTreeSet<String>> {
    let mut traders = BTreeSet::new();

    for symbol in exchange.symbols() {
        exchange.with_book(symbol.as_str(), |book| {
            for trade in book.trades() {
                traders.insert(trade.buyer().to_string());
                traders.insert(trade.seller().to_string());
            }
            for order in book.bids().iter().chain(book.asks().iter()) {
                traders.insert(order.trader().to_string());
            }
        })?;
    }

    Ok(traders)
}

/// Ledger of one instrument, largest trades first. Equal sizes keep
/// execution order.
pub fn trades_by_quantity(exchange: &Exchange, ticker: &str) -> Result<Vec<Trade>> {
    let mut trades = exchange.with_book(ticker, |book| book.trades().to_vec())?;
    trades.sort_by(|a, b| b.quantity().cmp(&a.quantity()));
    Ok(trades)
}
