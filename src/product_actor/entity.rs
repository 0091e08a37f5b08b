//! Entity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Product`] to be managed by the generic
//! [`crate::framework::ResourceActor`].

use async_trait::async_trait;
use chrono::Utc;

use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductUpdate};

#[async_trait]
impl ActorEntity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type UpdateParams = ProductUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();

    /// Creates a new Product from creation parameters.
    ///
    /// Rejects a sale window that ends before it starts.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        if params.end_time < params.start_time {
            return Err(format!(
                "sale window for '{}' ends before it starts",
                params.name
            ));
        }
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            stock: params.stock,
            seckill_stock: params.seckill_stock,
            start_time: params.start_time,
            end_time: params.end_time,
            created_at: Utc::now(),
        })
    }

    /// Handles updates to the Product entity.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &Self::Context) -> Result<(), String> {
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(seckill_stock) = update.seckill_stock {
            self.seckill_stock = seckill_stock;
        }
        if let Some(start_time) = update.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            self.end_time = end_time;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: Self::Action, _ctx: &Self::Context) -> Result<Self::ActionResult, String> {
        Ok(())
    }
}
