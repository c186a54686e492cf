use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OwnedMutexGuard;
use tracing::{error, info, instrument, warn};

use crate::clients::ApiClient;
use crate::domain::{OrderId, OrderStatus};
use crate::notify::Notifier;

use super::error::{OrderError, STATUS_UPDATE_FAILED};
use super::list::OrderList;

pub const STATUS_UPDATED: &str = "Order status updated";

type OrderLocks = Mutex<HashMap<OrderId, Arc<tokio::sync::Mutex<()>>>>;

/// Holds one order's lock. On drop the lock is released and its map entry
/// removed unless another transition for that order is still waiting.
struct OrderLock<'a> {
    locks: &'a OrderLocks,
    order_id: OrderId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for OrderLock<'_> {
    fn drop(&mut self) {
        // Entry clones are taken, and guards dropped, only under the map
        // lock: a count of one means no transition holds or awaits it.
        let mut locks = self.locks.lock();
        drop(self.guard.take());
        if locks
            .get(&self.order_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.order_id);
        }
    }
}

/// Applies status changes to single orders.
///
/// Changes to the same order run one after another: each one takes that
/// order's lock before reading the order list, so it sees the list as left
/// by the previous change's refresh. Changes to different orders do not
/// wait on each other.
pub struct StatusController {
    api: ApiClient,
    orders: Arc<OrderList>,
    notifier: Notifier,
    locks: OrderLocks,
}

impl StatusController {
    pub fn new(api: ApiClient, orders: Arc<OrderList>, notifier: Notifier) -> Self {
        Self {
            api,
            orders,
            notifier,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// True while a status change for `order_id` is running or queued.
    pub fn is_updating(&self, order_id: OrderId) -> bool {
        self.locks
            .lock()
            .get(&order_id)
            .is_some_and(|lock| lock.try_lock().is_err())
    }

    #[instrument(name = "transition_order", skip(self))]
    pub async fn transition(&self, order_id: OrderId, new_status: OrderStatus) -> Result<(), OrderError> {
        let _serialized = self.acquire(order_id).await;

        let Some(order) = self.orders.get(order_id) else {
            warn!("Order not in the current list");
            return Err(self.reject(OrderError::NotFound(order_id)));
        };
        if !order.status.can_transition_to(new_status) {
            warn!(current = %order.status, "Order is in a terminal status");
            return Err(self.reject(OrderError::TerminalState(order_id)));
        }

        match self.api.update_order_status(order_id, new_status).await {
            Ok(()) => {
                info!(from = %order.status, to = %new_status, "Order status updated");
                self.notifier.success(STATUS_UPDATED);
                // The server may have side effects (stock adjustments), so
                // re-read instead of patching the local copy.
                if let Err(e) = self.orders.refresh().await {
                    self.notifier.error(e.to_string());
                }
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Order status update failed");
                self.notifier.error(STATUS_UPDATE_FAILED);
                Err(OrderError::Remote(STATUS_UPDATE_FAILED.to_string()))
            }
        }
    }

    async fn acquire(&self, order_id: OrderId) -> OrderLock<'_> {
        let lock = Arc::clone(self.locks.lock().entry(order_id).or_default());
        OrderLock {
            locks: &self.locks,
            order_id,
            guard: Some(lock.lock_owned().await),
        }
    }

    fn reject(&self, err: OrderError) -> OrderError {
        self.notifier.error(err.to_string());
        err
    }
}
