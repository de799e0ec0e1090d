//! PostgreSQL-backed `ProductRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, ProductId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::ProductRow;
use super::pool::DbPool;
use super::schema::products;

/// Diesel-backed implementation of the product repository port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: ProductRow) -> Result<Product, ProductRepositoryError> {
    Product::try_from(row).map_err(|err| ProductRepositoryError::query(err.to_string()))
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProductRepositoryError::connection))?;

        let row = products::table
            .filter(products::id.eq(id.get()))
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_diesel_error(
                    err,
                    ProductRepositoryError::query,
                    ProductRepositoryError::connection,
                )
            })?;

        row.map(map_row).transpose()
    }
}
