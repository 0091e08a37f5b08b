#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Seckill System
//!
//! > **A flash-sale engine that never oversells.**
//!
//! This crate runs a time-boxed flash sale: a fixed quantity of a product is
//! offered during a defined window, and many concurrent buyers race to claim
//! units. The hard guarantee is that the number of completed purchases never
//! exceeds the configured stock, under any interleaving, while every
//! successful purchase is durably recorded exactly once and no stock is ever
//! permanently lost to a failed downstream write.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### The reservation is a provisional hold
//!
//! Checking stock and decrementing it must be one indivisible step; the gap
//! between "check passed" and "decrement applied" is precisely the race that
//! causes oversell. The [`seckill::StockLedger`] packs a product's
//! `(available, sold)` counters into one atomic word and claims stock with a
//! single compare-and-swap.
//!
//! A successful claim is not yet a sale. The durable write can fail, and
//! without compensation that failure would silently shrink the effective
//! stock forever. The claim is therefore a [`seckill::Reservation`] guard:
//! confirmed after the order is written, released automatically if it isn't,
//! even when the caller is cancelled mid-commit.
//!
//! ### Collaborators are actors, the ledger is not
//!
//! The catalog and the order store are message-passing actors built on the
//! generic [`framework::ResourceActor`]: isolated state, sequential message
//! processing, no locks. The ledger deliberately breaks the pattern:
//! funneling every reservation through one message loop would serialize
//! unrelated products behind each other, so it is a shared value with
//! per-product atomic cells instead.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Core ([`seckill`])
//! The stock-reservation and order-commit protocol: ledger, sale-window
//! gate, order writer, coordinator, initializer, and the error taxonomy.
//!
//! ### 2. The Engine ([`framework`])
//! The generic `ResourceActor<T>` powering both collaborator stores.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor).
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! Spins up actors, wires the coordinator, exposes the operation surface.
//! - **Key items**: [`SeckillSystem`](lifecycle::SeckillSystem), [`shutdown`](lifecycle::SeckillSystem::shutdown).
//!
//! ### 4. The Interface ([`clients`])
//! Domain-specific clients wrapping the generic `ResourceClient`.
//! - **Key items**: [`ProductClient`](clients::ProductClient), [`OrderClient`](clients::OrderClient).
//!
//! ### 5. The Implementation ([`model`], [`product_actor`], [`order_actor`])
//! Domain types and their `ActorEntity` implementations.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo flash sale with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod seckill;
