//! Limit order exchange - price-time priority matching engine
//!
//! Each listed instrument owns an orderbook with a bid queue, an ask queue
//! and an append-only trade ledger. Incoming limit orders cross the
//! opposite queue at the resting orders' prices; any remainder rests.

pub mod command;
pub mod error;
pub mod exchange;
pub mod order;
pub mod orderbook;
pub mod portfolio;
pub mod queue;
pub mod report;
pub mod types;

pub use command::{process_batch, BatchError, Command, CommandError};
pub use error::EngineError;
pub use exchange::{Exchange, SharedBook};
pub use order::{Order, Side};
pub use orderbook::OrderBook;
pub use queue::OrderQueue;
pub use types::*;
