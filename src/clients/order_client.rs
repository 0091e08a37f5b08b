use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Order, OrderDraft};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor (the durable order store).
///
/// `save` is the durable-write operation of the flash-sale protocol: it either
/// persists the draft under a fresh order number and returns the stored
/// record, or fails without partial state.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, draft))]
    pub async fn save(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        debug!(?draft, "save called");
        info!("Sending save to order store");

        self.inner.create(draft).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Duplicate(order_no) => OrderError::DuplicateOrderNo(order_no),
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Custom(msg) => OrderError::Validation(msg),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
