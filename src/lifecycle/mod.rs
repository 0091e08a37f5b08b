//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for managing the application's
//! runtime environment:
//!
//! - **Actor lifecycle management**: Starting, wiring, and shutting down actors
//! - **System orchestration**: Wiring the coordinator to its collaborators
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`SeckillSystem`] - The primary orchestrator that manages actors, ledger,
//!   and the purchase protocol surface
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod seckill_system;
pub mod tracing;

pub use self::seckill_system::*;
pub use self::tracing::*;
