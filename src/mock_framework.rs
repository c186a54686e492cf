//! # Mock Framework
//!
//! Utilities for testing components without a gateway or a server.
//!
//! Use [`create_mock_client`] to get an [`ApiClient`] and the receiver its
//! requests land on. Then use helpers like [`expect_create_order`] or
//! [`expect_update_status`] to assert what was sent and answer it.
//! [`assert_idle`] checks that nothing was sent at all, which is how tests
//! assert "no network call".

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::catalog::CatalogSnapshot;
use crate::clients::ApiClient;
use crate::domain::{NewOrderItem, Order, OrderId, OrderItem, OrderStatus, Product};
use crate::gateway::ApiError;
use crate::messages::{ApiRequest, ServiceResponse};
use crate::orders::OrderList;

pub fn create_mock_client(buffer_size: usize) -> (ApiClient, mpsc::Receiver<ApiRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ApiClient::new(sender), receiver)
}

/// Helper to verify that the next message is a ListProducts request
pub async fn expect_list_products(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<ServiceResponse<Vec<Product>, ApiError>> {
    match receiver.recv().await {
        Some(ApiRequest::ListProducts { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a ListOrders request
pub async fn expect_list_orders(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<ServiceResponse<Vec<Order>, ApiError>> {
    match receiver.recv().await {
        Some(ApiRequest::ListOrders { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a CreateOrder request
pub async fn expect_create_order(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(Vec<NewOrderItem>, ServiceResponse<Order, ApiError>)> {
    match receiver.recv().await {
        Some(ApiRequest::CreateOrder { items, respond_to }) => Some((items, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateOrderStatus request
pub async fn expect_update_status(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(OrderId, OrderStatus, ServiceResponse<(), ApiError>)> {
    match receiver.recv().await {
        Some(ApiRequest::UpdateOrderStatus { id, status, respond_to }) => Some((id, status, respond_to)),
        _ => None,
    }
}

/// Panics if any request is waiting on the channel.
pub fn assert_idle(receiver: &mut mpsc::Receiver<ApiRequest>) {
    match receiver.try_recv() {
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => panic!("mock channel disconnected"),
        Ok(request) => panic!("unexpected request: {request:?}"),
    }
}

/// Run a real catalog refresh and answer it with `products`.
pub async fn seed_catalog(
    catalog: &Arc<CatalogSnapshot>,
    receiver: &mut mpsc::Receiver<ApiRequest>,
    products: Vec<Product>,
) {
    let task = tokio::spawn({
        let catalog = Arc::clone(catalog);
        async move { catalog.refresh().await }
    });
    let respond_to = expect_list_products(receiver).await.expect("Expected ListProducts");
    respond_to.send(Ok(products)).unwrap();
    task.await.unwrap().unwrap();
}

/// Run a real order list refresh and answer it with `orders`.
pub async fn seed_orders(list: &Arc<OrderList>, receiver: &mut mpsc::Receiver<ApiRequest>, orders: Vec<Order>) {
    let task = tokio::spawn({
        let list = Arc::clone(list);
        async move { list.refresh().await }
    });
    let respond_to = expect_list_orders(receiver).await.expect("Expected ListOrders");
    respond_to.send(Ok(orders)).unwrap();
    task.await.unwrap().unwrap();
}

/// An order holding three Widgets.
pub fn sample_order(id: OrderId, status: OrderStatus) -> Order {
    let created = Utc.with_ymd_and_hms(2026, 3, 1, 10, 15, 0).unwrap();
    Order::new(id, 3000, status, created).with_items(vec![OrderItem::new(7, "Widget", 3)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn({
            let client = client.clone();
            async move { client.update_order_status(5, OrderStatus::Cancelled).await }
        });

        let (id, status, responder) = expect_update_status(&mut receiver)
            .await
            .expect("Expected UpdateOrderStatus request");
        assert_eq!((id, status), (5, OrderStatus::Cancelled));
        responder.send(Ok(())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(()));
        assert_idle(&mut receiver);
    }
}
