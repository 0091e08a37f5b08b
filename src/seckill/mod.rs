//! # The Flash-Sale Core
//!
//! Everything with real concurrency and failure-handling content lives here:
//!
//! - [`ledger`]: the atomic "claim N units or fail" primitive.
//! - [`window`]: the sale-window gate.
//! - [`writer`]: the durable-write boundary and order-number generation.
//! - [`coordinator`]: the protocol tying them together, with compensation.
//! - [`initializer`]: seeding the ledger from catalog data.
//! - [`error`]: the typed outcome taxonomy callers handle.

pub mod coordinator;
pub mod error;
pub mod initializer;
pub mod ledger;
pub mod window;
pub mod writer;

pub use coordinator::SeckillCoordinator;
pub use error::SeckillError;
pub use initializer::{SeededStock, StockInitializer};
pub use ledger::{LedgerError, Reservation, StockLedger, StockSnapshot};
pub use window::SaleWindowStatus;
pub use writer::{OrderNoGenerator, OrderWriteError, OrderWriter};
