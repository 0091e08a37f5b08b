//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the entire system.
//!
//! ## Configuration
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//! The compact format hides the crate/module prefix (`with_target(false)`);
//! log lines stay short while still carrying structured fields.
//!
//! - **Structured logging** with `tracing`
//! - **Hierarchical spans** for request tracing
//! - **Configurable log levels** via the `RUST_LOG` environment variable
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads with debug logs
//! RUST_LOG=debug cargo run
//!
//! # Filter to specific modules
//! RUST_LOG=seckill_system::framework=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! A purchase attempt with `RUST_LOG=info` looks like:
//!
//! ```text
//! INFO Created product_id="product_1" size=1
//! INFO seckill stock seeded product_id="product_1" stock=10
//! INFO Sending save to order store
//! INFO Created order_no="SK17332...0001A3F29B1C" size=1
//! INFO seckill order placed user_id="user_1" product_id="product_1"
//! ```
//!
//! With `RUST_LOG=debug`, the intermediate steps appear too: the catalog
//! `Get`, the `save called` payload dump, and the compensation warning when a
//! durable write fails and the stock claim is released.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - the entity_type field carries context
        .compact()
        .init();
}
