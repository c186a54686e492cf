use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::clients::ApiClient;
use crate::domain::{Order, OrderId};
use crate::snapshot::Snapshot;

use super::detail::{OrderDetailView, OrderSummary};
use super::error::{OrderError, LOAD_ORDERS_FAILED};

/// The materialized list of orders: the one store that status changes and
/// detail views read from. `refresh` is its only writer.
pub struct OrderList {
    api: ApiClient,
    orders: Snapshot<Order>,
}

impl OrderList {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            orders: Snapshot::new(),
        }
    }

    /// Re-fetch every order and swap the list. On failure the current list
    /// stays as it is.
    #[instrument(name = "orders_refresh", skip(self))]
    pub async fn refresh(&self) -> Result<usize, OrderError> {
        let ticket = self.orders.begin();
        match self.api.list_orders().await {
            Ok(orders) => {
                let count = orders.len();
                if ticket.install(orders) {
                    info!(count, "Order list refreshed");
                } else {
                    info!(count, "Order list refresh superseded by a newer one");
                }
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Order list refresh failed");
                Err(OrderError::Remote(LOAD_ORDERS_FAILED.to_string()))
            }
        }
    }

    pub fn snapshot(&self) -> Arc<[Order]> {
        self.orders.read()
    }

    pub fn get(&self, id: OrderId) -> Option<Order> {
        self.orders.read().iter().find(|o| o.id == id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.orders.is_loading()
    }

    /// One summary row per order, in server order.
    pub fn summaries(&self) -> Vec<OrderSummary> {
        self.orders.read().iter().map(OrderSummary::of).collect()
    }

    pub fn detail(&self, id: OrderId) -> Option<OrderDetailView> {
        self.orders
            .read()
            .iter()
            .find(|o| o.id == id)
            .map(OrderDetailView::project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;
    use crate::gateway::ApiError;
    use crate::mock_framework::{create_mock_client, expect_list_orders, sample_order, seed_orders};

    #[tokio::test]
    async fn test_refresh_replaces_list() {
        let (api, mut rx) = create_mock_client(8);
        let list = Arc::new(OrderList::new(api));

        seed_orders(&list, &mut rx, vec![sample_order(1, OrderStatus::Pending)]).await;
        seed_orders(
            &list,
            &mut rx,
            vec![sample_order(2, OrderStatus::Cancelled), sample_order(3, OrderStatus::Completed)],
        )
        .await;

        let ids: Vec<_> = list.snapshot().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(list.get(1), None);
        assert_eq!(list.get(3).map(|o| o.status), Some(OrderStatus::Completed));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_existing_orders() {
        let (api, mut rx) = create_mock_client(8);
        let list = Arc::new(OrderList::new(api));
        seed_orders(&list, &mut rx, vec![sample_order(5, OrderStatus::Pending)]).await;

        let task = tokio::spawn({
            let list = Arc::clone(&list);
            async move { list.refresh().await }
        });
        let respond_to = expect_list_orders(&mut rx).await.expect("Expected ListOrders");
        assert!(list.is_loading());
        respond_to
            .send(Err(ApiError::Server { status: 500, message: None }))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(OrderError::Remote(LOAD_ORDERS_FAILED.to_string()))
        );
        assert!(!list.is_loading());
        assert_eq!(list.snapshot().len(), 1);
        assert!(list.get(5).is_some());
    }

    #[tokio::test]
    async fn test_detail_reads_from_current_list() {
        let (api, mut rx) = create_mock_client(8);
        let list = Arc::new(OrderList::new(api));
        assert!(list.detail(5).is_none());

        seed_orders(&list, &mut rx, vec![sample_order(5, OrderStatus::Pending)]).await;
        let detail = list.detail(5).expect("order 5 is listed");
        assert_eq!(detail.summary.id, 5);
        assert_eq!(detail.lines.len(), 1);
    }
}
