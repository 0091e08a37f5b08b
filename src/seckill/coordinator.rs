//! # Seckill Coordinator
//!
//! Orchestrates a purchase attempt end to end:
//!
//! 1. **Lookup** the product in the catalog.
//! 2. **Gate**: reject attempts outside the sale window.
//! 3. **Reserve**: atomically claim stock in the [`StockLedger`].
//! 4. **Commit**: durably write the order via the [`OrderWriter`].
//!    On failure the unconfirmed reservation releases itself, so a transient
//!    write error never silently shrinks the effective stock.
//!
//! The reservation and the durable write are two separate critical sections:
//! the ledger claim is a handful of atomic instructions, while the store
//! round-trip may be slow. No ledger synchronization is held across the
//! await: the claim is represented by the [`Reservation`] guard, which is
//! either confirmed after the write or released on drop (including when the
//! caller cancels mid-commit).

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::clients::{ActorClient, ProductClient};
use crate::model::{Order, OrderDraft};
use crate::seckill::error::SeckillError;
use crate::seckill::ledger::{StockLedger, StockSnapshot};
use crate::seckill::window::{self, SaleWindowStatus};
use crate::seckill::writer::OrderWriter;

/// Runs the stock-reservation and order-commit protocol.
///
/// Cheap to clone; concurrent purchase attempts each call
/// [`SeckillCoordinator::place_order`] from their own task.
#[derive(Clone)]
pub struct SeckillCoordinator {
    catalog: ProductClient,
    writer: OrderWriter,
    ledger: Arc<StockLedger>,
}

impl SeckillCoordinator {
    pub fn new(catalog: ProductClient, writer: OrderWriter, ledger: Arc<StockLedger>) -> Self {
        Self {
            catalog,
            writer,
            ledger,
        }
    }

    /// Attempts to purchase `quantity` units of a product for a user.
    ///
    /// Returns the committed [`Order`] on success. Every failure is a typed
    /// [`SeckillError`]; after any failure the ledger still satisfies
    /// `available + sold == initial stock`.
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        product_id: &str,
        user_id: &str,
        quantity: u32,
    ) -> Result<Order, SeckillError> {
        if quantity == 0 {
            return Err(SeckillError::InvalidQuantity(quantity));
        }

        // 1. Lookup
        let product = self
            .catalog
            .get(product_id.to_string())
            .await
            .map_err(|e| SeckillError::Persistence(e.to_string()))?
            .ok_or_else(|| SeckillError::ProductNotFound(product_id.to_string()))?;

        // 2. Gate
        match window::status(&product, Utc::now()) {
            SaleWindowStatus::NotStarted => {
                return Err(SeckillError::SaleNotStarted(product_id.to_string()));
            }
            SaleWindowStatus::Closed => {
                return Err(SeckillError::SaleClosed(product_id.to_string()));
            }
            SaleWindowStatus::Open => {}
        }

        // 3. Reserve
        let reservation = self.ledger.try_reserve(product_id, quantity)?;

        // 4. Commit
        let draft = OrderDraft {
            user_id: user_id.to_string(),
            product_id: product_id.to_string(),
            price: product.price,
            quantity,
        };
        let order = match self.writer.commit(draft).await {
            Ok(order) => order,
            Err(e) => {
                // `reservation` drops here unconfirmed, returning the units
                // to available stock.
                warn!(product_id, quantity, error = %e, "durable write failed, claim released");
                return Err(SeckillError::Persistence(e.to_string()));
            }
        };
        reservation.confirm();

        info!(user_id, product_id, order_no = %order.order_no, "seckill order placed");
        Ok(order)
    }

    /// Read-only snapshot of a product's counters; an unseeded product reads
    /// as `(0, 0)`.
    pub fn stock(&self, product_id: &str) -> StockSnapshot {
        self.ledger.peek(product_id).unwrap_or_default()
    }
}
