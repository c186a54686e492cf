//! Order workflow: composing a draft, submitting it, and driving existing
//! orders through their status lifecycle.

pub mod composer;
pub mod detail;
pub mod error;
pub mod list;
pub mod status;
pub mod submission;

pub use composer::OrderComposer;
pub use detail::{format_money, DetailLine, OrderDetailView, OrderSummary};
pub use error::*;
pub use list::OrderList;
pub use status::StatusController;
pub use submission::OrderSubmission;
