//! One-shot loader that seeds the [`StockLedger`] from catalog data before a
//! sale window opens.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::clients::{ActorClient, ProductClient};
use crate::seckill::error::SeckillError;
use crate::seckill::ledger::StockLedger;

/// Confirmation returned by a successful seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededStock {
    pub product_id: String,
    pub quantity: u32,
}

/// Seeds flash-sale counters from the catalog.
///
/// Contract: invoke exactly once per sale, strictly before the window opens
/// and before the first reservation for the product. Seeding during an
/// active sale is out of contract.
pub struct StockInitializer {
    catalog: ProductClient,
    ledger: Arc<StockLedger>,
}

impl StockInitializer {
    pub fn new(catalog: ProductClient, ledger: Arc<StockLedger>) -> Self {
        Self { catalog, ledger }
    }

    /// Loads the product's sale allotment into the ledger.
    #[instrument(skip(self))]
    pub async fn seed(&self, product_id: &str) -> Result<SeededStock, SeckillError> {
        let product = self
            .catalog
            .get(product_id.to_string())
            .await
            .map_err(|e| SeckillError::Persistence(e.to_string()))?
            .ok_or_else(|| SeckillError::ProductNotFound(product_id.to_string()))?;

        self.ledger.seed(product_id, product.seckill_stock);
        info!(product_id, stock = product.seckill_stock, "seckill stock seeded");

        Ok(SeededStock {
            product_id: product_id.to_string(),
            quantity: product.seckill_stock,
        })
    }
}
