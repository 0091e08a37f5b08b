use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Awaiting payment.
    Pending,
    /// Payment received.
    Paid,
    /// Cancelled before payment.
    Cancelled,
}

/// A committed purchase.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// The entity id *is* the order number, so the store's duplicate check doubles
/// as the unique constraint on `order_no`. An order only exists after a stock
/// reservation succeeded; `total_amount` is computed from the unit price at
/// creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_no: String,
    pub user_id: String,
    pub product_id: String,
    pub price: f64,
    pub quantity: u32,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for committing a new order.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub user_id: String,
    pub product_id: String,
    pub price: f64,
    pub quantity: u32,
}
