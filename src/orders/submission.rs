use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::clients::ApiClient;
use crate::domain::Order;
use crate::notify::Notifier;

use super::composer::OrderComposer;
use super::error::{OrderError, CREATE_ORDER_FAILED};
use super::list::OrderList;

pub const ORDER_CREATED: &str = "Order created";

/// Marks a submission as in flight for as long as it is alive.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Turns the composer's draft into a created order.
///
/// Only one submission runs at a time: orders carry no idempotency key, so a
/// second concurrent submit of the same draft would create a duplicate.
pub struct OrderSubmission {
    api: ApiClient,
    composer: Arc<OrderComposer>,
    orders: Arc<OrderList>,
    notifier: Notifier,
    in_flight: AtomicBool,
}

impl OrderSubmission {
    pub fn new(api: ApiClient, composer: Arc<OrderComposer>, orders: Arc<OrderList>, notifier: Notifier) -> Self {
        Self {
            api,
            composer,
            orders,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate, create, then reset the draft and refresh the order list.
    ///
    /// On any failure the draft is left exactly as it was so the user can
    /// retry.
    #[instrument(name = "submit_order", skip(self))]
    pub async fn submit(&self) -> Result<Order, OrderError> {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            warn!("Submission already in flight");
            return Err(OrderError::SubmissionInFlight);
        };

        let items = match self.composer.validated_items() {
            Ok(items) => items,
            Err(e) => {
                self.notifier.error(e.to_string());
                return Err(e);
            }
        };

        info!(item_count = items.len(), "Creating order");
        match self.api.create_order(items).await {
            Ok(order) => {
                info!(order_id = order.id, total = %order.total_price, "Order created");
                self.notifier.success(ORDER_CREATED);
                self.composer.reset();
                if let Err(e) = self.orders.refresh().await {
                    self.notifier.error(e.to_string());
                }
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order creation failed");
                let message = e.server_message().unwrap_or(CREATE_ORDER_FAILED).to_string();
                self.notifier.error(message.clone());
                Err(OrderError::Remote(message))
            }
        }
    }
}
