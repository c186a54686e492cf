use tokio::sync::oneshot;

use crate::domain::{DashboardStats, NewOrderItem, Order, OrderId, OrderStatus, Product};
use crate::gateway::ApiError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests understood by the API gateway. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum ApiRequest {
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>, ApiError>,
    },
    ListOrders {
        respond_to: ServiceResponse<Vec<Order>, ApiError>,
    },
    CreateOrder {
        items: Vec<NewOrderItem>,
        respond_to: ServiceResponse<Order, ApiError>,
    },
    UpdateOrderStatus {
        id: OrderId,
        status: OrderStatus,
        respond_to: ServiceResponse<(), ApiError>,
    },
    DashboardStats {
        respond_to: ServiceResponse<DashboardStats, ApiError>,
    },
    Shutdown,
}
