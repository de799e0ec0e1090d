//! Read-side port for catalogue product lookups.

use async_trait::async_trait;

use crate::domain::{Product, ProductId};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading products.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "product repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "product repository query failed: {message}",
    }
}

/// Port for looking up catalogue products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by id.
    ///
    /// An absent row is `Ok(None)`; the error channel is reserved for
    /// infrastructure failures.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError>;
}

/// Fixture implementation used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductRepository;

#[async_trait]
impl ProductRepository for FixtureProductRepository {
    async fn find_by_id(&self, _id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(None)
    }
}
