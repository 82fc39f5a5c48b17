//! Text command parsing and batch processing
//!
//! Two command forms are understood, one per line:
//!
//! ```text
//! ADD <ticker>
//! <trader>: BUY|SELL <quantity> <ticker> AT <price>
//! ```
//!
//! The trader name is everything before the last `:` and may contain
//! spaces and punctuation.

use crate::error::EngineError;
use crate::exchange::Exchange;
use crate::order::Side;
use crate::types::{Price, Quantity, Symbol};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("malformed command: {0:?}")]
    Malformed(String),
    #[error("unknown side {0:?}, expected BUY or SELL")]
    UnknownSide(String),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// A batch stopped at `line` (1-based)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct BatchError {
    pub line: usize,
    #[source]
    pub source: CommandError,
}

/// One parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddInstrument {
        symbol: Symbol,
    },
    PlaceOrder {
        trader: String,
        side: Side,
        quantity: Quantity,
        symbol: Symbol,
        price: Price,
    },
}

impl FromStr for Side {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(CommandError::UnknownSide(other.to_string())),
        }
    }
}

fn parse_decimal(token: &str) -> Result<Decimal, CommandError> {
    Decimal::from_str(token).map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        let Some((trader, order)) = line.rsplit_once(':') else {
            return match line.split_whitespace().collect::<Vec<_>>().as_slice() {
                ["ADD", ticker] => Ok(Command::AddInstrument {
                    symbol: Symbol::new(*ticker),
                }),
                _ => Err(CommandError::Malformed(line.to_string())),
            };
        };

        let trader = trader.trim();
        if trader.is_empty() {
            return Err(CommandError::Malformed(line.to_string()));
        }

        match order.split_whitespace().collect::<Vec<_>>().as_slice() {
            [side, quantity, ticker, "AT", price] => Ok(Command::PlaceOrder {
                trader: trader.to_string(),
                side: side.parse()?,
                quantity: Quantity::new(parse_decimal(quantity)?),
                symbol: Symbol::new(*ticker),
                price: Price::new(parse_decimal(price)?),
            }),
            _ => Err(CommandError::Malformed(line.to_string())),
        }
    }

    /// Execute the command against the exchange
    pub fn apply(&self, exchange: &Exchange) -> Result<(), CommandError> {
        match self {
            Command::AddInstrument { symbol } => {
                exchange.add_instrument(symbol.as_str());
            }
            Command::PlaceOrder {
                trader,
                side,
                quantity,
                symbol,
                price,
            } => {
                exchange.submit(symbol.as_str(), *side, trader.as_str(), *quantity, *price)?;
            }
        }
        Ok(())
    }
}

/// Apply commands in order, stopping at the first line that fails to
/// parse or is rejected by the exchange. Blank lines are skipped.
/// Everything before the failing line stays applied.
pub fn process_batch<I, S>(exchange: &Exchange, lines: I) -> Result<(), BatchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        let number = index + 1;
        Command::parse(line)
            .and_then(|command| command.apply(exchange))
            .map_err(|source| {
                warn!(line = number, error = %source, "Batch stopped");
                BatchError {
                    line: number,
                    source,
                }
            })?;
        debug!(line = number, "Command applied");
    }
    Ok(())
}
