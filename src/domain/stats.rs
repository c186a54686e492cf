use rust_decimal::Decimal;
use serde::Deserialize;

/// Aggregate figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub product_count: u64,
    pub total_stock: i64,
    pub completed_orders: u64,
    pub revenue: Decimal,
}
