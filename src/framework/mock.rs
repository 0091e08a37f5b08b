//! # Mock Framework
//!
//! Utilities for testing components in isolation.
//!
//! Use [`MockClient`] to get a [`ResourceClient`] backed by scripted
//! expectations instead of a running actor. Helpers like
//! [`MockClient::expect_create`] and [`MockClient::expect_get`] queue the
//! responses the component under test should observe, including failures
//! (e.g., a durable-write error from the order store).

use crate::framework::{ActorEntity, ResourceClient, ResourceRequest, FrameworkError};
use tokio::sync::mpsc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
///
/// This enum is used internally by `MockClient` to track what requests
/// are expected and what responses should be returned.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
}

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Order>::new();
/// mock.expect_create().return_err(FrameworkError::ActorClosed);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut exps = expectations_clone.lock().unwrap();
                let expectation = exps.pop_front();
                drop(exps); // Release lock before responding

                match (request, expectation) {
                    (ResourceRequest::Get { id: _, respond_to }, Some(Expectation::Get { id: _, response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { params: _, respond_to }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    /// Sets the expectation to return the stored entity.
    pub fn return_ok(self, entity: T) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Create {
            response: Ok(entity),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Create {
            response: Err(error),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Order, OrderDraft, OrderStatus};
    use chrono::Utc;

    fn sample_order(order_no: &str) -> Order {
        Order {
            order_no: order_no.to_string(),
            user_id: "user_1".to_string(),
            product_id: "product_1".to_string(),
            price: 25.0,
            quantity: 2,
            total_amount: 50.0,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        // Create mock with fluent expectation API
        let mut mock = MockClient::<Order>::new();

        // Set up expectations
        mock.expect_create().return_ok(sample_order("SK1"));
        mock.expect_get("SK1".to_string()).return_ok(Some(sample_order("SK1")));

        let client = mock.client();

        // Execute operations
        let draft = OrderDraft {
            user_id: "user_1".to_string(),
            product_id: "product_1".to_string(),
            price: 25.0,
            quantity: 2,
        };
        let order = client.create(draft).await.unwrap();
        assert_eq!(order.order_no, "SK1");

        let fetched = client.get("SK1".to_string()).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().total_amount, 50.0);

        // Verify all expectations were met
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_scripted_failure() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_create().return_err(FrameworkError::ActorClosed);

        let client = mock.client();
        let draft = OrderDraft {
            user_id: "user_1".to_string(),
            product_id: "product_1".to_string(),
            price: 25.0,
            quantity: 1,
        };
        let result = client.create(draft).await;
        assert_eq!(result.unwrap_err(), FrameworkError::ActorClosed);

        mock.verify();
    }
}
