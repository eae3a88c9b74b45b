use thiserror::Error;

/// Faults that prevent an operation from reaching a financial outcome.
///
/// Gateway-reported failures are not errors: they come back as
/// [`Outcome::Failed`](crate::application::outcome::Outcome::Failed).
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid amount: {0}")]
    AmountError(#[from] rust_decimal::Error),
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Gateway response is missing field {0}")]
    MissingField(&'static str),
    #[error("Payment has no {0} transaction")]
    MissingTransaction(&'static str),
    #[error("Transaction {0} has no reference number")]
    MissingReference(&'static str),
}

pub type Result<T> = std::result::Result<T, PluginError>;
