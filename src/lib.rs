//! Client for an inventory management backend.
//!
//! Components talk to the remote API through a single gateway actor
//! ([`gateway::ApiService`]) via cheap [`clients::ApiClient`] handles.
//! [`app_system::InventorySystem`] starts the gateway and wires the order
//! workflow around it: the product catalog, the order composer, submission,
//! the order list and status transitions.

pub mod app_system;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod messages;
pub mod notify;
pub mod orders;
pub mod snapshot;

#[cfg(test)]
mod mock_framework;
