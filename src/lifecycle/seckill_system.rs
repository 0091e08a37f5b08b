use std::sync::Arc;

use tracing::{error, info};

use crate::clients::{OrderClient, ProductClient};
use crate::model::Order;
use crate::seckill::{
    OrderNoGenerator, OrderWriter, SeckillCoordinator, SeckillError, SeededStock, StockInitializer,
    StockLedger, StockSnapshot,
};

/// The main runtime orchestrator for the flash-sale system.
///
/// `SeckillSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping all actors in the system
/// - **Dependency Wiring**: Connecting the coordinator to the catalog, the
///   order store, and the stock ledger
/// - **Operation Surface**: Exposing `init_stock`, `place_order`, and
///   `get_stock` to callers (the concrete transport is out of scope)
///
/// # Architecture
///
/// Two collaborator actors back the core:
/// - **Product Actor**: the catalog store (CRUD on products)
/// - **Order Actor**: the durable order store, keyed by order number
///
/// The [`StockLedger`] is not an actor: reservations are a handful of atomic
/// instructions per product and must not serialize behind unrelated
/// products, so it is shared as a plain `Arc`.
///
/// # Example
///
/// ```ignore
/// let system = SeckillSystem::new();
///
/// let product = system.product_client.create_product(params).await?;
/// system.init_stock(&product.id).await?;
/// let order = system.place_order(&product.id, "user_1", 1).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct SeckillSystem {
    /// Client for interacting with the Product actor (catalog management)
    pub product_client: ProductClient,

    /// Client for interacting with the Order actor (order queries)
    pub order_client: OrderClient,

    /// The purchase-protocol orchestrator; clone it into concurrent tasks
    pub coordinator: SeckillCoordinator,

    /// Seeds the ledger from catalog data before a sale opens
    pub initializer: StockInitializer,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl SeckillSystem {
    /// Creates and initializes a new `SeckillSystem` with all actors running.
    ///
    /// This method:
    /// 1. Spawns the Product and Order actors in their own tasks
    /// 2. Builds the stock ledger and the order-number generator
    /// 3. Wires the coordinator and the stock initializer
    pub fn new() -> Self {
        // 1. Create actors (no cross-actor dependencies)
        let (product_actor, product_client) = crate::product_actor::new();

        let order_nos = Arc::new(OrderNoGenerator::new());
        let (order_actor, order_client) = crate::order_actor::new(order_nos);

        // 2. Start actors
        let product_handle = tokio::spawn(product_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));

        // 3. Wire the core
        let ledger = Arc::new(StockLedger::new());
        let writer = OrderWriter::new(order_client.clone());
        let coordinator =
            SeckillCoordinator::new(product_client.clone(), writer, ledger.clone());
        let initializer = StockInitializer::new(product_client.clone(), ledger);

        Self {
            product_client,
            order_client,
            coordinator,
            initializer,
            handles: vec![product_handle, order_handle],
        }
    }

    /// Seeds the ledger with a product's sale allotment from the catalog.
    pub async fn init_stock(&self, product_id: &str) -> Result<SeededStock, SeckillError> {
        self.initializer.seed(product_id).await
    }

    /// Runs the full purchase protocol for one attempt.
    pub async fn place_order(
        &self,
        product_id: &str,
        user_id: &str,
        quantity: u32,
    ) -> Result<Order, SeckillError> {
        self.coordinator.place_order(product_id, user_id, quantity).await
    }

    /// Read-only snapshot of a product's flash-sale counters.
    pub fn get_stock(&self, product_id: &str) -> StockSnapshot {
        self.coordinator.stock(product_id)
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops every component holding a client (which closes the actor
    /// channels), then waits for the actor tasks to finish.
    ///
    /// # Shutdown Process
    ///
    /// When clients are dropped, the underlying channels are closed. Each
    /// `ResourceActor` detects the closed channel and exits its event loop
    /// gracefully.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Step 1: Close all channels by dropping every client holder.
        drop(self.coordinator);
        drop(self.initializer);
        drop(self.product_client);
        drop(self.order_client);

        // Step 2: Wait for all actor tasks to complete.
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for SeckillSystem {
    fn default() -> Self {
        Self::new()
    }
}
