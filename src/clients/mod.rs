#[macro_use]
mod macros;

use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{DashboardStats, NewOrderItem, Order, OrderId, OrderStatus, Product};
use crate::gateway::ApiError;
use crate::messages::ApiRequest;

/// Handle to the API gateway actor. Cheap to clone; every component that
/// needs the remote API holds one.
#[derive(Clone, Debug)]
pub struct ApiClient {
    sender: mpsc::Sender<ApiRequest>,
}

impl ApiClient {
    pub fn new(sender: mpsc::Sender<ApiRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ApiError> {
        debug!("Sending shutdown");
        self.sender
            .send(ApiRequest::Shutdown)
            .await
            .map_err(|_| ApiError::ActorCommunicationError("Gateway closed".to_string()))
    }
}

client_method!(ApiClient => fn list_products() -> Vec<Product> as ApiRequest::ListProducts);
client_method!(ApiClient => fn list_orders() -> Vec<Order> as ApiRequest::ListOrders);
client_method!(ApiClient => fn create_order(items: Vec<NewOrderItem>) -> Order as ApiRequest::CreateOrder);
client_method!(ApiClient => fn update_order_status(id: OrderId, status: OrderStatus) -> () as ApiRequest::UpdateOrderStatus);
client_method!(ApiClient => fn dashboard_stats() -> DashboardStats as ApiRequest::DashboardStats);
