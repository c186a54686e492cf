use thiserror::Error;

use crate::domain::OrderId;

pub const VALIDATION_FAILED: &str = "Please check the selected products and quantities.";
pub const CREATE_ORDER_FAILED: &str = "Failed to create order";
pub const LOAD_ORDERS_FAILED: &str = "Failed to load orders";
pub const STATUS_UPDATE_FAILED: &str = "Failed to update order status";

/// Errors that can occur while composing, submitting or updating orders.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),
    #[error("Order {0} is completed; its status can no longer change")]
    TerminalState(OrderId),
    #[error("Order {0} is not in the current order list")]
    NotFound(OrderId),
    #[error("Draft has no line {0}")]
    LineOutOfRange(usize),
    #[error("An order is already being submitted")]
    SubmissionInFlight,
    /// A remote call failed. Carries the server message or a fallback.
    #[error("{0}")]
    Remote(String),
}
