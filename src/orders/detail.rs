//! Read-only projections of orders for display. Nothing here mutates state
//! or talks to the network.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{Order, OrderId, OrderStatus, ProductId};

/// Table row for one order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,
    pub total: String,
    pub status: OrderStatus,
    pub badge: &'static str,
    pub created_at: String,
    /// False once the order is in its terminal status.
    pub editable: bool,
}

impl OrderSummary {
    pub fn of(order: &Order) -> Self {
        Self {
            id: order.id,
            total: format_money(order.total_price),
            status: order.status,
            badge: order.status.badge(),
            created_at: format_timestamp(order.created_at),
            editable: !order.status.is_terminal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub item_id: ProductId,
    pub name: String,
    pub quantity: u32,
}

/// Projection of a single order and its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetailView {
    pub summary: OrderSummary,
    pub lines: Vec<DetailLine>,
}

impl OrderDetailView {
    pub fn project(order: &Order) -> Self {
        Self {
            summary: OrderSummary::of(order),
            lines: order
                .items
                .iter()
                .map(|item| DetailLine {
                    item_id: item.id,
                    name: item.name.clone(),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<6} {:>16}  {:<10} {}",
            self.id, self.total, self.status, self.created_at
        )
    }
}

impl fmt::Display for OrderDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary)?;
        if self.lines.is_empty() {
            return writeln!(f, "  (no items)");
        }
        for line in &self.lines {
            writeln!(f, "  {:<8} {:<32} x{}", line.item_id, line.name, line.quantity)?;
        }
        Ok(())
    }
}

/// Render an amount the way the storefront does: `.` between thousands,
/// `,` before up to three decimals, and the `đ` suffix.
pub fn format_money(amount: Decimal) -> String {
    let amount = amount
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let whole = amount.abs().trunc().normalize().to_string();
    let fraction = amount.abs().fract().normalize();

    let mut out = String::new();
    if amount.is_sign_negative() && !amount.is_zero() {
        out.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(digit);
    }
    if !fraction.is_zero() {
        out.push(',');
        out.push_str(fraction.to_string().trim_start_matches("0."));
    }
    out.push_str(" đ");
    out
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S %-d/%-m/%Y").to_string()
}
