//! Core value types for the exchange

use crate::order::Order;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Instrument ticker symbol (e.g. ACME). Case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Limit price with decimal precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(pub Decimal);

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self(Decimal::from(value))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity/Size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Quantity(pub Decimal);

impl Quantity {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(Decimal::from(value))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// An executed cross between a taker and a resting maker.
///
/// The price is always the maker's limit price. Trades are never mutated
/// once recorded, so the fields are only readable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    buyer: String,
    seller: String,
    quantity: Quantity,
    price: Price,
}

impl Trade {
    pub(crate) fn new(buyer: String, seller: String, quantity: Quantity, price: Price) -> Self {
        Self {
            buyer,
            seller,
            quantity,
            price,
        }
    }

    pub fn buyer(&self) -> &str {
        &self.buyer
    }

    pub fn seller(&self) -> &str {
        &self.seller
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

/// Read-only projection of a book, consumed by the report renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub symbol: Symbol,
    /// Lowest price first
    pub asks: Vec<Order>,
    /// Highest price first
    pub bids: Vec<Order>,
    /// Execution order
    pub trades: Vec<Trade>,
    /// Number of accepted submissions
    pub sequence: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_symbol_keeps_case() {
        let symbol = Symbol::new("Orbit");
        assert_eq!(symbol.as_str(), "Orbit");
        assert_ne!(symbol, Symbol::new("ORBIT"));
    }

    #[test]
    fn test_quantity_arithmetic() {
        let mut qty = Quantity::from(100);
        qty -= Quantity::from(30);
        assert_eq!(qty, Quantity::new(dec!(70)));
        assert_eq!(qty - Quantity::from(70), Quantity::default());
        assert!((qty - Quantity::from(70)).is_zero());
        assert!(!(qty - Quantity::from(80)).is_positive());
        assert_eq!(qty.checked_add(Quantity::from(1)), Some(Quantity::from(71)));
        assert_eq!(Quantity::new(Decimal::MAX).checked_add(qty), None);
    }

    #[test]
    fn test_price_positivity() {
        assert!(Price::new(dec!(0.01)).is_positive());
        assert!(!Price::new(dec!(0)).is_positive());
        assert!(!Price::new(dec!(-5)).is_positive());
    }
}
