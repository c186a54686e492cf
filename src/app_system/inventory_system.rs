use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::catalog::{CatalogError, CatalogSnapshot};
use crate::clients::ApiClient;
use crate::config::ClientConfig;
use crate::gateway::{ApiError, ApiService, HttpBackend};
use crate::notify::Notifier;
use crate::orders::{OrderComposer, OrderError, OrderList, OrderSubmission, StatusController};

/// The client-side system: starts the API gateway and wires every workflow
/// component to it.
pub struct InventorySystem {
    pub api: ApiClient,
    pub catalog: Arc<CatalogSnapshot>,
    pub orders: Arc<OrderList>,
    pub composer: Arc<OrderComposer>,
    pub submission: Arc<OrderSubmission>,
    pub status: Arc<StatusController>,
    pub notifier: Notifier,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let backend = HttpBackend::new(&config.api)?;
        let (service, api) = ApiService::new(backend, config.gateway.buffer_size);
        let gateway_handle = tokio::spawn(service.run());

        info!(base_url = %config.api.base_url, "Inventory system started");
        let mut system = Self::with_client(api, config.notifications.clear_after());
        system.handles.push(gateway_handle);
        Ok(system)
    }

    /// Wire the components around an existing client. No gateway task is
    /// owned, so `shutdown` only signals the client.
    pub fn with_client(api: ApiClient, clear_after: Duration) -> Self {
        let notifier = Notifier::new(clear_after);
        let catalog = Arc::new(CatalogSnapshot::new(api.clone()));
        let orders = Arc::new(OrderList::new(api.clone()));
        let composer = Arc::new(OrderComposer::new(Arc::clone(&catalog)));
        let submission = Arc::new(OrderSubmission::new(
            api.clone(),
            Arc::clone(&composer),
            Arc::clone(&orders),
            notifier.clone(),
        ));
        let status = Arc::new(StatusController::new(api.clone(), Arc::clone(&orders), notifier.clone()));

        Self {
            api,
            catalog,
            orders,
            composer,
            submission,
            status,
            notifier,
            handles: Vec::new(),
        }
    }

    /// Fetch the catalog and the order list concurrently.
    ///
    /// Each failure is also published as an error notice; a failed load
    /// leaves that store as it was and does not affect the other.
    pub async fn load(&self) -> (Result<usize, CatalogError>, Result<usize, OrderError>) {
        let (catalog, orders) = tokio::join!(self.catalog.refresh(), self.orders.refresh());
        if let Err(e) = &catalog {
            self.notifier.error(e.to_string());
        }
        if let Err(e) = &orders {
            self.notifier.error(e.to_string());
        }
        (catalog, orders)
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        if let Err(e) = self.api.shutdown().await {
            warn!(error = %e, "Gateway already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Gateway task failed: {:?}", e);
                return Err(format!("Gateway task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
