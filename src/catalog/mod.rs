//! Read-only mirror of the product catalog.

mod error;

pub use error::*;

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::clients::ApiClient;
use crate::domain::{Product, ProductId};
use crate::snapshot::Snapshot;

pub const LOAD_PRODUCTS_FAILED: &str = "Failed to load products";

/// Last successfully fetched product list, used for id → product lookups
/// while composing orders.
pub struct CatalogSnapshot {
    api: ApiClient,
    products: Snapshot<Product>,
}

impl CatalogSnapshot {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            products: Snapshot::new(),
        }
    }

    /// Fetch the full product list and swap it in. On failure the previous
    /// snapshot is kept.
    #[instrument(name = "catalog_refresh", skip(self))]
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        let ticket = self.products.begin();
        match self.api.list_products().await {
            Ok(products) => {
                let count = products.len();
                if ticket.install(products) {
                    info!(count, "Catalog refreshed");
                } else {
                    info!(count, "Catalog refresh superseded by a newer one");
                }
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Catalog refresh failed");
                Err(CatalogError::LoadFailed(LOAD_PRODUCTS_FAILED.to_string()))
            }
        }
    }

    pub fn lookup(&self, id: ProductId) -> Option<Product> {
        self.products.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn products(&self) -> Arc<[Product]> {
        self.products.read()
    }

    pub fn is_loading(&self) -> bool {
        self.products.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ApiError;
    use crate::mock_framework::{create_mock_client, expect_list_products, seed_catalog};

    #[tokio::test]
    async fn test_lookup_after_refresh() {
        let (api, mut rx) = create_mock_client(8);
        let catalog = Arc::new(CatalogSnapshot::new(api));
        assert_eq!(catalog.lookup(7), None);

        seed_catalog(&catalog, &mut rx, vec![Product::new(7, "Widget", 1000, 5)]).await;

        assert_eq!(catalog.lookup(7).map(|p| p.name), Some("Widget".to_string()));
        assert_eq!(catalog.lookup(8), None);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let (api, mut rx) = create_mock_client(8);
        let catalog = Arc::new(CatalogSnapshot::new(api));
        seed_catalog(&catalog, &mut rx, vec![Product::new(7, "Widget", 1000, 5)]).await;

        let task = tokio::spawn({
            let catalog = Arc::clone(&catalog);
            async move { catalog.refresh().await }
        });
        let respond_to = expect_list_products(&mut rx).await.expect("Expected ListProducts");
        assert!(catalog.is_loading());
        respond_to
            .send(Err(ApiError::Transport("connection refused".to_string())))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err, CatalogError::LoadFailed(LOAD_PRODUCTS_FAILED.to_string()));
        assert!(!catalog.is_loading());
        assert_eq!(catalog.products().len(), 1);
        assert!(catalog.lookup(7).is_some());
    }
}
