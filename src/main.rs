//! Demo: a ten-unit flash sale under fifty concurrent buyers.
//!
//! Sets up the [`SeckillSystem`], creates a product whose sale window is
//! open, seeds the ledger, races concurrent purchase attempts, and reports
//! the outcome. Exactly ten attempts win; the rest fail with
//! `INSUFFICIENT_STOCK`.

use chrono::{Duration, Utc};
use seckill_system::lifecycle::{setup_tracing, SeckillSystem};
use seckill_system::model::ProductCreate;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting flash-sale demo");

    let system = SeckillSystem::new();

    // Create a product with an open sale window
    let now = Utc::now();
    let params = ProductCreate {
        name: "Limited Edition Sneaker".to_string(),
        price: 199.0,
        stock: 500,
        seckill_stock: 10,
        start_time: now - Duration::minutes(1),
        end_time: now + Duration::minutes(10),
    };

    let span = tracing::info_span!("catalog_setup");
    let product = async {
        info!("Creating flash-sale product");
        system
            .product_client
            .create_product(params)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(product_id = %product.id, "Product created successfully");

    // Seed the ledger from the catalog allotment
    let seeded = system
        .init_stock(&product.id)
        .await
        .map_err(|e| e.to_string())?;
    info!(product_id = %seeded.product_id, stock = seeded.quantity, "Stock initialized");

    // Fifty buyers race for ten units
    let span = tracing::info_span!("flash_sale");
    let (succeeded, failed) = async {
        let mut handles = Vec::new();
        for i in 0..50 {
            let coordinator = system.coordinator.clone();
            let product_id = product.id.clone();
            handles.push(tokio::spawn(async move {
                coordinator
                    .place_order(&product_id, &format!("user_{}", i), 1)
                    .await
            }));
        }

        let mut succeeded = 0u32;
        let mut failed = 0u32;
        for handle in handles {
            match handle.await.map_err(|e| e.to_string())? {
                Ok(order) => {
                    info!(order_no = %order.order_no, total = order.total_amount, "Purchase succeeded");
                    succeeded += 1;
                }
                Err(e) => {
                    info!(reason = e.reason(), "Purchase failed");
                    failed += 1;
                }
            }
        }
        Ok::<_, String>((succeeded, failed))
    }
    .instrument(span)
    .await?;

    let snapshot = system.get_stock(&product.id);
    info!(
        succeeded,
        failed,
        available = snapshot.available,
        sold = snapshot.sold,
        "Flash sale finished"
    );

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
