//! Durable-write side of the flash-sale protocol: order-number generation and
//! the [`OrderWriter`] wrapper over the order store.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use crate::clients::OrderClient;
use crate::model::{Order, OrderDraft};
use crate::order_actor::OrderError;

/// Errors surfaced by the durable-write boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderWriteError {
    /// The generated order number collided with an existing record. The store
    /// rejected the write without partial state.
    #[error("Duplicate order number: {0}")]
    DuplicateOrderNo(String),

    /// The store refused the draft (e.g., validation failure).
    #[error("Order rejected by store: {0}")]
    Rejected(String),

    /// The store could not be reached or dropped the request.
    #[error("Order store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Generates flash-sale order numbers.
///
/// A timestamp alone collides under concurrent issuance within one clock
/// tick, so each number combines epoch-millis, a process-wide monotonic
/// sequence, and a 32-bit random component:
/// `SK{millis}{sequence:06}{random:08X}`. The sequence alone already
/// separates every number minted by this process; the random component
/// guards across restarts.
pub struct OrderNoGenerator {
    sequence: AtomicU64,
}

impl OrderNoGenerator {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
        }
    }

    pub fn next(&self) -> String {
        let millis = Utc::now().timestamp_millis();
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) % 1_000_000;
        let salt: u32 = rand::random();
        format!("SK{}{:06}{:08X}", millis, sequence, salt)
    }
}

impl Default for OrderNoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Durable-write abstraction over the order store collaborator.
///
/// One call, one outcome: either the draft is persisted under a fresh unique
/// order number and the stored [`Order`] comes back, or a typed error does,
/// never partial state. The caller decides what to do with its stock
/// reservation based on that outcome.
#[derive(Clone)]
pub struct OrderWriter {
    orders: OrderClient,
}

impl OrderWriter {
    pub fn new(orders: OrderClient) -> Self {
        Self { orders }
    }

    #[instrument(skip(self, draft))]
    pub async fn commit(&self, draft: OrderDraft) -> Result<Order, OrderWriteError> {
        self.orders.save(draft).await.map_err(|e| match e {
            OrderError::DuplicateOrderNo(order_no) => OrderWriteError::DuplicateOrderNo(order_no),
            OrderError::Validation(msg) => OrderWriteError::Rejected(msg),
            other => OrderWriteError::StoreUnavailable(other.to_string()),
        })
    }
}
