use std::collections::HashSet;

use chrono::{Duration, Utc};
use seckill_system::clients::actor_client::ActorClient;
use seckill_system::lifecycle::SeckillSystem;
use seckill_system::model::{OrderStatus, Product, ProductCreate};
use seckill_system::seckill::{SeckillError, StockSnapshot};

fn sale_product(name: &str, price: f64, seckill_stock: u32) -> ProductCreate {
    let now = Utc::now();
    ProductCreate {
        name: name.to_string(),
        price,
        stock: seckill_stock * 10,
        seckill_stock,
        start_time: now - Duration::hours(1),
        end_time: now + Duration::hours(1),
    }
}

/// Full end-to-end flow: catalog → seed → purchase → durable order.
#[tokio::test]
async fn test_full_seckill_flow() {
    let system = SeckillSystem::new();

    let product: Product = system
        .product_client
        .create_product(sale_product("Super Widget", 25.50, 10))
        .await
        .expect("Failed to create product");

    // Seed the ledger from the catalog allotment
    let seeded = system
        .init_stock(&product.id)
        .await
        .expect("Failed to init stock");
    assert_eq!(seeded.product_id, product.id);
    assert_eq!(seeded.quantity, 10);
    assert_eq!(
        system.get_stock(&product.id),
        StockSnapshot { available: 10, sold: 0 }
    );

    // Place an order
    let order = system
        .place_order(&product.id, "user_1", 2)
        .await
        .expect("Failed to place order");
    assert!(order.order_no.starts_with("SK"));
    assert_eq!(order.user_id, "user_1");
    assert_eq!(order.product_id, product.id);
    assert_eq!(order.quantity, 2);
    assert_eq!(order.total_amount, 51.0);
    assert_eq!(order.status, OrderStatus::Pending);

    // Stock moved from available to sold
    assert_eq!(
        system.get_stock(&product.id),
        StockSnapshot { available: 8, sold: 2 }
    );

    // The order is durably retrievable from the store
    let stored = system
        .order_client
        .get(order.order_no.clone())
        .await
        .expect("Failed to get order")
        .expect("Order not found");
    assert_eq!(stored.total_amount, 51.0);

    system.shutdown().await.expect("Failed to shutdown system");
}

/// Fifty concurrent buyers race for ten units: exactly ten succeed with
/// distinct order numbers, the rest fail with insufficient stock, and the
/// order store agrees with the ledger.
#[tokio::test]
async fn test_oversell_never_happens() {
    let system = SeckillSystem::new();

    let product = system
        .product_client
        .create_product(sale_product("Limited Widget", 10.0, 10))
        .await
        .unwrap();
    system.init_stock(&product.id).await.unwrap();

    let mut handles = vec![];
    for i in 0..50 {
        let coordinator = system.coordinator.clone();
        let pid = product.id.clone();

        handles.push(tokio::spawn(async move {
            coordinator.place_order(&pid, &format!("user_{}", i), 1).await
        }));
    }

    let mut order_nos = HashSet::new();
    let mut failed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(order) => {
                order_nos.insert(order.order_no);
            }
            Err(e) => {
                assert!(
                    matches!(e, SeckillError::InsufficientStock { requested: 1, .. }),
                    "unexpected failure: {:?}",
                    e
                );
                failed += 1;
            }
        }
    }

    // Exactly the seeded allotment was sold, each under a unique number.
    assert_eq!(order_nos.len(), 10, "Expected exactly 10 successful orders");
    assert_eq!(failed, 40, "Expected the remaining 40 attempts to fail");
    assert_eq!(
        system.get_stock(&product.id),
        StockSnapshot { available: 0, sold: 10 }
    );

    // Order/ledger agreement: committed orders == successful reservations.
    let orders = system.order_client.list().await.unwrap();
    assert_eq!(orders.len(), 10);

    system.shutdown().await.unwrap();
}

/// Two concurrent requests for 3 of 5 units: only one can win, and the loser
/// must not disturb the counters.
#[tokio::test]
async fn test_scarce_stock_race() {
    let system = SeckillSystem::new();

    let product = system
        .product_client
        .create_product(sale_product("Scarce Widget", 99.0, 5))
        .await
        .unwrap();
    system.init_stock(&product.id).await.unwrap();

    let first = {
        let coordinator = system.coordinator.clone();
        let pid = product.id.clone();
        tokio::spawn(async move { coordinator.place_order(&pid, "user_a", 3).await })
    };
    let second = {
        let coordinator = system.coordinator.clone();
        let pid = product.id.clone();
        tokio::spawn(async move { coordinator.place_order(&pid, "user_b", 3).await })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];
    let winners = results.iter().filter(|r| r.is_ok()).count();

    assert_eq!(winners, 1, "exactly one request can claim 3 of 5 units");
    assert_eq!(
        system.get_stock(&product.id),
        StockSnapshot { available: 2, sold: 3 }
    );

    system.shutdown().await.unwrap();
}

/// Attempts outside the sale window fail with the window errors and never
/// touch the ledger.
#[tokio::test]
async fn test_window_enforcement() {
    let system = SeckillSystem::new();
    let now = Utc::now();

    // Sale opens in an hour
    let upcoming = system
        .product_client
        .create_product(ProductCreate {
            name: "Upcoming Widget".to_string(),
            price: 5.0,
            stock: 50,
            seckill_stock: 5,
            start_time: now + Duration::hours(1),
            end_time: now + Duration::hours(2),
        })
        .await
        .unwrap();
    system.init_stock(&upcoming.id).await.unwrap();

    let err = system
        .place_order(&upcoming.id, "user_1", 1)
        .await
        .unwrap_err();
    assert_eq!(err, SeckillError::SaleNotStarted(upcoming.id.clone()));
    assert_eq!(err.reason(), "SALE_NOT_STARTED");
    assert!(!err.is_retryable());
    assert_eq!(
        system.get_stock(&upcoming.id),
        StockSnapshot { available: 5, sold: 0 }
    );

    // Sale already over
    let expired = system
        .product_client
        .create_product(ProductCreate {
            name: "Expired Widget".to_string(),
            price: 5.0,
            stock: 50,
            seckill_stock: 5,
            start_time: now - Duration::hours(2),
            end_time: now - Duration::hours(1),
        })
        .await
        .unwrap();
    system.init_stock(&expired.id).await.unwrap();

    let err = system
        .place_order(&expired.id, "user_1", 1)
        .await
        .unwrap_err();
    assert_eq!(err, SeckillError::SaleClosed(expired.id.clone()));
    assert_eq!(err.reason(), "SALE_CLOSED");
    assert_eq!(
        system.get_stock(&expired.id),
        StockSnapshot { available: 5, sold: 0 }
    );

    system.shutdown().await.unwrap();
}

/// Request validation and unknown-product handling.
#[tokio::test]
async fn test_rejected_requests() {
    let system = SeckillSystem::new();

    // Unknown product id on seed
    let err = system.init_stock("product_999").await.unwrap_err();
    assert_eq!(err, SeckillError::ProductNotFound("product_999".to_string()));
    assert_eq!(err.reason(), "PRODUCT_NOT_FOUND");

    // Unknown product id on purchase
    let err = system
        .place_order("product_999", "user_1", 1)
        .await
        .unwrap_err();
    assert_eq!(err, SeckillError::ProductNotFound("product_999".to_string()));

    let product = system
        .product_client
        .create_product(sale_product("Widget", 1.0, 3))
        .await
        .unwrap();

    // Zero quantity is rejected before touching anything
    let err = system.place_order(&product.id, "user_1", 0).await.unwrap_err();
    assert_eq!(err, SeckillError::InvalidQuantity(0));
    assert_eq!(err.reason(), "INVALID_QUANTITY");

    // Purchase before seeding behaves as zero stock
    let err = system.place_order(&product.id, "user_1", 1).await.unwrap_err();
    assert_eq!(
        err,
        SeckillError::InsufficientStock { requested: 1, available: 0 }
    );

    // Unseeded stock reads as (0, 0)
    assert_eq!(system.get_stock(&product.id), StockSnapshot::default());

    system.shutdown().await.unwrap();
}
