//! Entity trait implementation for the Order domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Order`] to be managed by the generic
//! [`crate::framework::ResourceActor`]. The entity id is the order number.

use async_trait::async_trait;
use chrono::Utc;

use crate::framework::ActorEntity;
use crate::model::{Order, OrderDraft, OrderStatus};

#[async_trait]
impl ActorEntity for Order {
    type Id = String;
    type CreateParams = OrderDraft;
    type UpdateParams = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();

    /// Creates a new Order from a draft.
    ///
    /// The id passed in is the freshly-assigned order number. The total is
    /// computed here so the stored record is always internally consistent.
    fn from_create_params(id: Self::Id, draft: OrderDraft) -> Result<Self, String> {
        if draft.quantity == 0 {
            return Err("order quantity must be positive".to_string());
        }
        Ok(Self {
            order_no: id,
            user_id: draft.user_id,
            product_id: draft.product_id,
            price: draft.price,
            quantity: draft.quantity,
            total_amount: draft.price * draft.quantity as f64,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, _update: Self::UpdateParams, _ctx: &Self::Context) -> Result<(), String> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: Self::Action, _ctx: &Self::Context) -> Result<Self::ActionResult, String> {
        Ok(())
    }
}
