//! One side of an order book, kept in price-time priority

use crate::order::{Order, Side};
use crate::types::{Price, Quantity};
use std::collections::VecDeque;
use tracing::warn;

/// Resting orders for one side, best first.
///
/// Bids are ordered by price descending, asks by price ascending; orders
/// at an equal price keep their arrival order.
#[derive(Debug, Clone)]
pub struct OrderQueue {
    side: Side,
    orders: VecDeque<Order>,
}

impl OrderQueue {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            orders: VecDeque::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// `true` when a resting order at `resting` ranks strictly behind `incoming`
    fn is_worse(&self, resting: Price, incoming: Price) -> bool {
        match self.side {
            Side::Buy => resting < incoming,
            Side::Sell => resting > incoming,
        }
    }

    /// Queue a new arrival.
    ///
    /// The order lands immediately before the first entry with a strictly
    /// worse price, i.e. behind every order already resting at its price.
    /// Orders with nothing left to fill are dropped.
    pub fn insert(&mut self, order: Order) {
        if order.is_filled() {
            warn!(
                trader = %order.trader,
                quantity = %order.quantity,
                "Refusing to queue an order with no remaining quantity"
            );
            return;
        }

        // Entries that are not strictly worse form a prefix of the queue.
        let at = self
            .orders
            .partition_point(|resting| !self.is_worse(resting.price, order.price));
        self.orders.insert(at, order);
    }

    /// Best resting order
    pub fn best(&self) -> Option<&Order> {
        self.orders.front()
    }

    pub fn best_price(&self) -> Option<Price> {
        self.orders.front().map(|o| o.price)
    }

    /// Take the best resting order out of the queue
    pub(crate) fn pop_best(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    /// Put back the order that was just taken by `pop_best` after a partial
    /// fill. Its price is unchanged, so the head is still where it belongs.
    pub(crate) fn restore_best(&mut self, order: Order) {
        debug_assert!(self
            .orders
            .front()
            .map_or(true, |head| !self.is_worse(order.price, head.price)));
        if order.is_filled() {
            return;
        }
        self.orders.push_front(order);
    }

    /// Orders best first
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter()
    }

    pub fn to_vec(&self) -> Vec<Order> {
        self.orders.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Total resting quantity on this side, `None` if it exceeds the
    /// decimal range
    pub fn depth(&self) -> Option<Quantity> {
        self.orders
            .iter()
            .try_fold(Quantity::default(), |total, o| total.checked_add(o.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn order(trader: &str, qty: u64, price: u64) -> Order {
        Order::new(trader, Quantity::from(qty), Price::from(price))
    }

    fn traders(queue: &OrderQueue) -> Vec<&str> {
        queue.iter().map(|o| o.trader()).collect()
    }

    #[test]
    fn test_insert_into_empty_queue() {
        let mut asks = OrderQueue::new(Side::Sell);
        asks.insert(order("s1", 50, 120));

        assert_eq!(asks.len(), 1);
        assert_eq!(asks.best_price(), Some(Price::from(120)));
    }

    #[test]
    fn test_asks_sorted_ascending() {
        let mut asks = OrderQueue::new(Side::Sell);
        asks.insert(order("a", 1, 120));
        asks.insert(order("b", 1, 110));
        asks.insert(order("c", 1, 130));
        asks.insert(order("d", 1, 100));

        assert_eq!(traders(&asks), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_bids_sorted_descending() {
        let mut bids = OrderQueue::new(Side::Buy);
        bids.insert(order("a", 1, 90));
        bids.insert(order("b", 1, 110));
        bids.insert(order("c", 1, 80));
        bids.insert(order("d", 1, 100));

        assert_eq!(traders(&bids), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_equal_price_goes_behind_existing() {
        let mut asks = OrderQueue::new(Side::Sell);
        asks.insert(order("first", 50, 120));
        asks.insert(order("cheaper", 70, 110));
        asks.insert(order("second", 20, 120));
        asks.insert(order("third", 5, 120));
        asks.insert(order("dearer", 5, 125));

        assert_eq!(
            traders(&asks),
            vec!["cheaper", "first", "second", "third", "dearer"]
        );
    }

    #[test]
    fn test_zero_quantity_never_queued() {
        let mut bids = OrderQueue::new(Side::Buy);
        bids.insert(order("nobody", 0, 100));
        assert!(bids.is_empty());
    }

    #[test]
    fn test_restore_best_keeps_head() {
        let mut bids = OrderQueue::new(Side::Buy);
        bids.insert(order("early", 10, 100));
        bids.insert(order("late", 10, 100));

        let mut head = bids.pop_best().unwrap();
        head.fill(Quantity::from(4));
        bids.restore_best(head);

        assert_eq!(traders(&bids), vec!["early", "late"]);
        assert_eq!(bids.best().unwrap().quantity(), Quantity::from(6));
        assert_eq!(bids.depth(), Some(Quantity::from(16)));
    }

    #[test]
    fn test_depth_beyond_decimal_range() {
        let mut asks = OrderQueue::new(Side::Sell);
        asks.insert(Order::new("a", Quantity::new(Decimal::MAX), Price::from(10)));
        asks.insert(Order::new("b", Quantity::new(Decimal::MAX), Price::from(11)));

        assert_eq!(asks.depth(), None);
        assert_eq!(asks.len(), 2);
    }
}
