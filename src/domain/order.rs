use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

pub type OrderId = u64;

/// Lifecycle status of an order.
///
/// `Completed` is terminal for this client: once an order reaches it, no
/// further transition is issued, whatever the server would accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Pending, Self::Completed, Self::Cancelled];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether the client lets an order in this status move to `next`.
    ///
    /// Every non-terminal status may move to any status, itself included.
    pub const fn can_transition_to(self, _next: OrderStatus) -> bool {
        !self.is_terminal()
    }

    /// CSS-style badge class used when rendering the status.
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Pending => "badge pending",
            Self::Completed => "badge completed",
            Self::Cancelled => "badge cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// One line of a submitted order, as reported by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawOrderItem")]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(id: ProductId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
        }
    }
}

// The server joins items through an `OrderItem` table; depending on the
// serializer the quantity is flattened or nested.
#[derive(Deserialize)]
struct RawOrderItem {
    id: ProductId,
    name: String,
    #[serde(rename = "OrderItemQuantity")]
    flattened_quantity: Option<u32>,
    #[serde(rename = "OrderItem")]
    join: Option<JoinRecord>,
    quantity: Option<u32>,
}

#[derive(Deserialize)]
struct JoinRecord {
    quantity: u32,
}

impl TryFrom<RawOrderItem> for OrderItem {
    type Error = String;

    fn try_from(raw: RawOrderItem) -> Result<Self, Self::Error> {
        let quantity = raw
            .flattened_quantity
            .or(raw.join.map(|join| join.quantity))
            .or(raw.quantity)
            .ok_or_else(|| format!("order item {} has no quantity", raw.id))?;
        Ok(Self {
            id: raw.id,
            name: raw.name,
            quantity,
        })
    }
}

/// Represents an order as mirrored from the server.
///
/// `total_price` is authoritative from the server and never computed here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn new(id: OrderId, total_price: impl Into<Decimal>, status: OrderStatus, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            total_price: total_price.into(),
            status,
            created_at,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<OrderItem>) -> Self {
        self.items = items;
        self
    }
}

/// Line of a create-order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Serialize)]
pub struct OrderCreate<'a> {
    pub items: &'a [NewOrderItem],
}

/// Body of `PATCH /api/orders/{id}/status`.
#[derive(Debug, Serialize)]
pub struct StatusPatch {
    pub status: OrderStatus,
}
