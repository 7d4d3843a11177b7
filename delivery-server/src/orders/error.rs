//! Order domain errors

/// Errors raised by the order engine and store
///
/// All variants are caller-recoverable validation/state errors; the API
/// layer maps them to 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    UnknownOrder(String),

    #[error("Invalid order item: {0}")]
    InvalidItem(String),

    #[error("Invalid split configuration: {0}")]
    InvalidSplitConfiguration(String),

    #[error("Invalid split entry: {0}")]
    InvalidSplitEntry(String),
}
