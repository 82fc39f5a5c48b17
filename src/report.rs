//! Fixed-width text rendering of book snapshots

use crate::order::Order;
use crate::types::BookSnapshot;
use std::fmt;

const RULE: &str = "  -------------------------------------------------------------";

/// Text table for one book: asks (lowest first), bids (highest first),
/// then the trade ledger.
pub struct BookReport<'a>(pub &'a BookSnapshot);

impl fmt::Display for BookReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        writeln!(f, "=== {} ===", snapshot.symbol)?;
        writeln!(f, "     price amount  trader")?;
        writeln!(f, "{RULE}")?;
        for order in &snapshot.asks {
            write_order(f, order)?;
        }
        writeln!(f, "{RULE}")?;
        for order in &snapshot.bids {
            write_order(f, order)?;
        }
        writeln!(f, "{RULE}")?;
        for trade in &snapshot.trades {
            writeln!(
                f,
                "    {} -> {}: {} at {}",
                trade.seller(),
                trade.buyer(),
                trade.quantity(),
                trade.price()
            )?;
        }
        Ok(())
    }
}

fn write_order(f: &mut fmt::Formatter<'_>, order: &Order) -> fmt::Result {
    writeln!(
        f,
        "    {:>6} {:>6} ({})",
        order.price().to_string(),
        order.quantity().to_string(),
        order.trader()
    )
}

/// Render a snapshot as text
pub fn render(snapshot: &BookSnapshot) -> String {
    BookReport(snapshot).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Side;
    use crate::orderbook::OrderBook;
    use crate::types::{Price, Quantity, Symbol};

    #[test]
    fn test_render_layout() {
        let mut book = OrderBook::new(Symbol::new("ACME"));
        for (side, trader, qty, price) in [
            (Side::Sell, "S1", 50, 120),
            (Side::Buy, "B1", 100, 90),
            (Side::Sell, "S2", 70, 110),
            (Side::Buy, "B2", 90, 110),
        ] {
            book.submit(side, trader, Quantity::from(qty), Price::from(price))
                .unwrap();
        }

        let expected = [
            "=== ACME ===",
            "     price amount  trader",
            RULE,
            "       120     50 (S1)",
            RULE,
            "       110     20 (B2)",
            "        90    100 (B1)",
            RULE,
            "    S2 -> B2: 70 at 110",
            "",
        ]
        .join("\n");

        assert_eq!(render(&book.snapshot()), expected);
    }

    #[test]
    fn test_render_empty_book() {
        let book = OrderBook::new(Symbol::new("EMPTY"));
        let text = render(&book.snapshot());
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("=== EMPTY ==="));
    }
}
