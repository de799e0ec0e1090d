//! Port for order persistence.

use async_trait::async_trait;

use crate::domain::{Order, OrderDraft, OrderId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "order repository connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } =>
            "order repository query failed: {message}",
    }
}

/// Port for writing and reading delivery orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order and return it with the storage-assigned id.
    async fn create(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError>;

    /// Read every stored order.
    async fn list_all(&self) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Find an order by id. An absent row is `Ok(None)`.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError>;
}

/// Fixture implementation used when no database is configured.
///
/// Accepts every insert under id 1 and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderRepository;

#[async_trait]
impl OrderRepository for FixtureOrderRepository {
    async fn create(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError> {
        let id = OrderId::new(1).map_err(|err| OrderRepositoryError::query(err.to_string()))?;
        Ok(Order::from_draft(id, draft.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(None)
    }
}
