//! Engine error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The ticker was never added to the exchange
    #[error("Invalid instrument: {0}")]
    InvalidInstrument(String),
    /// Non-positive quantity or price
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
    /// An aggregate left the representable decimal range
    #[error("Overflow: {0}")]
    Overflow(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
