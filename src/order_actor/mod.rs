//! Order-specific resource logic: the durable order store.
//!
//! The store's id generator is the flash-sale order-number generator, so the
//! unique-id check in the framework acts as the unique constraint on
//! `order_no` at the durable-write boundary.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;
use crate::seckill::OrderNoGenerator;
use std::sync::Arc;

/// Creates a new Order actor and its client.
pub fn new(order_nos: Arc<OrderNoGenerator>) -> (ResourceActor<Order>, OrderClient) {
    let next_order_no = move || order_nos.next();

    let (actor, generic_client) = ResourceActor::new(32, next_order_no);
    let client = OrderClient::new(generic_client);

    (actor, client)
}
