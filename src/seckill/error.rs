//! Error taxonomy for the flash-sale protocol.

use thiserror::Error;

use crate::seckill::ledger::LedgerError;

/// Outcomes of a purchase attempt that the caller must handle.
///
/// Every variant is recoverable by the caller; none leaves the ledger
/// inconsistent. [`SeckillError::reason`] gives each kind a stable code so
/// clients can decide retry-vs-stop without matching on display strings.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SeckillError {
    /// No product with this id exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The sale window for this product has not opened yet.
    #[error("Sale has not started for product {0}")]
    SaleNotStarted(String),

    /// The sale window for this product has already closed.
    #[error("Sale has closed for product {0}")]
    SaleClosed(String),

    /// Fewer units than requested remain available.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The requested quantity is invalid (zero).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The durable write (or a collaborator round-trip) failed. The stock
    /// reservation has been released, so retrying is safe.
    #[error("Order persistence failed: {0}")]
    Persistence(String),
}

impl SeckillError {
    /// Stable machine-readable code for this failure kind.
    pub fn reason(&self) -> &'static str {
        match self {
            SeckillError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            SeckillError::SaleNotStarted(_) => "SALE_NOT_STARTED",
            SeckillError::SaleClosed(_) => "SALE_CLOSED",
            SeckillError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            SeckillError::InvalidQuantity(_) => "INVALID_QUANTITY",
            SeckillError::Persistence(_) => "PERSISTENCE_FAILURE",
        }
    }

    /// Whether the caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SeckillError::Persistence(_))
    }
}

impl From<LedgerError> for SeckillError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InsufficientStock { requested, available } => {
                SeckillError::InsufficientStock { requested, available }
            }
            LedgerError::InvalidQuantity(q) => SeckillError::InvalidQuantity(q),
        }
    }
}
