//! API gateway actor: the only component that performs HTTP.
//!
//! Every request is answered from its own spawned task, which takes
//! ownership of the response channel. Independent calls (a catalog refresh
//! and an order list refresh, or status updates on different orders)
//! therefore run concurrently instead of queueing behind each other.

mod error;

pub use error::*;

use std::future::Future;
use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, instrument, warn, Instrument, Span};

use crate::clients::ApiClient;
use crate::config::ApiConfig;
use crate::domain::{
    DashboardStats, NewOrderItem, Order, OrderCreate, OrderId, OrderStatus, Product, StatusPatch,
};
use crate::messages::{ApiRequest, ServiceResponse};

/// HTTP plumbing shared by the spawned request tasks.
#[derive(Debug)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, path, "API request");

        let mut request = self.http.request(method, &url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(text)
    }

    async fn fetch<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        let text = self.execute(method, path, body).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Extract the optional `message` field from an error response body.
fn error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Gateway actor owning the request channel.
pub struct ApiService {
    receiver: mpsc::Receiver<ApiRequest>,
    backend: Arc<HttpBackend>,
}

impl ApiService {
    pub fn new(backend: HttpBackend, buffer_size: usize) -> (Self, ApiClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            backend: Arc::new(backend),
        };
        (service, ApiClient::new(sender))
    }

    #[instrument(name = "api_gateway", skip(self))]
    pub async fn run(mut self) {
        info!("ApiGateway starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ApiRequest::ListProducts { respond_to } => self.handle_list_products(respond_to),
                ApiRequest::ListOrders { respond_to } => self.handle_list_orders(respond_to),
                ApiRequest::CreateOrder { items, respond_to } => self.handle_create_order(items, respond_to),
                ApiRequest::UpdateOrderStatus { id, status, respond_to } => {
                    self.handle_update_order_status(id, status, respond_to)
                }
                ApiRequest::DashboardStats { respond_to } => self.handle_dashboard_stats(respond_to),
                ApiRequest::Shutdown => {
                    info!("ApiGateway shutting down");
                    break;
                }
            }
        }
        info!("ApiGateway stopped");
    }

    fn handle_list_products(&self, respond_to: ServiceResponse<Vec<Product>, ApiError>) {
        let backend = Arc::clone(&self.backend);
        respond_in_background(info_span!("list_products"), respond_to, async move {
            backend.fetch(Method::GET, "/api/products", None).await
        });
    }

    fn handle_list_orders(&self, respond_to: ServiceResponse<Vec<Order>, ApiError>) {
        let backend = Arc::clone(&self.backend);
        respond_in_background(info_span!("list_orders"), respond_to, async move {
            backend.fetch(Method::GET, "/api/orders", None).await
        });
    }

    fn handle_create_order(
        &self,
        items: Vec<NewOrderItem>,
        respond_to: ServiceResponse<Order, ApiError>,
    ) {
        let backend = Arc::clone(&self.backend);
        let span = info_span!("create_order", item_count = items.len());
        respond_in_background(span, respond_to, async move {
            let body = to_body(&OrderCreate { items: &items })?;
            backend.fetch(Method::POST, "/api/orders", Some(body)).await
        });
    }

    fn handle_update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        respond_to: ServiceResponse<(), ApiError>,
    ) {
        let backend = Arc::clone(&self.backend);
        let span = info_span!("update_order_status", order_id = id, status = %status);
        respond_in_background(span, respond_to, async move {
            let body = to_body(&StatusPatch { status })?;
            // The body is either the updated order or its id; the caller
            // re-fetches the list instead of reading it.
            backend
                .execute(Method::PATCH, &format!("/api/orders/{id}/status"), Some(body))
                .await
                .map(|_| ())
        });
    }

    fn handle_dashboard_stats(&self, respond_to: ServiceResponse<DashboardStats, ApiError>) {
        let backend = Arc::clone(&self.backend);
        respond_in_background(info_span!("dashboard_stats"), respond_to, async move {
            backend.fetch(Method::GET, "/api/dashboard/stats", None).await
        });
    }
}

/// Background handler: the spawned task owns `respond_to` and answers once
/// the call resolves. If the caller has gone away the result is dropped.
fn respond_in_background<T, F>(span: Span, respond_to: ServiceResponse<T, ApiError>, call: F)
where
    T: Send + 'static,
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    tokio::spawn(
        async move {
            let result = call.await;
            match &result {
                Ok(_) => debug!("API call completed"),
                Err(e) => warn!(error = %e, "API call failed"),
            }
            if respond_to.send(result).is_err() {
                debug!("Caller dropped before the response arrived");
            }
        }
        .instrument(span),
    );
}
