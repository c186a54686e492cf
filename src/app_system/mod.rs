//! System orchestration, startup, and shutdown logic.

pub mod inventory_system;
pub mod logging;

pub use inventory_system::*;
pub use logging::*;
