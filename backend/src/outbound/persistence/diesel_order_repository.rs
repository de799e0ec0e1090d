//! PostgreSQL-backed `OrderRepository` implementation using Diesel ORM.
//!
//! Inserts use `RETURNING` so the storage-assigned id comes back in the same
//! round trip.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{Order, OrderDraft, OrderId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewOrderRow, OrderRow};
use super::pool::{DbPool, PoolError};
use super::schema::orders;

/// Diesel-backed implementation of the order repository port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> OrderRepositoryError {
    map_pool_error(error, OrderRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> OrderRepositoryError {
    map_diesel_error(
        error,
        OrderRepositoryError::query,
        OrderRepositoryError::connection,
    )
}

fn map_row(row: OrderRow) -> Result<Order, OrderRepositoryError> {
    Order::try_from(row).map_err(|err| OrderRepositoryError::query(err.to_string()))
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let id: i64 = diesel::insert_into(orders::table)
            .values(NewOrderRow::from(draft))
            .returning(orders::id)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        let id = OrderId::new(id).map_err(|err| OrderRepositoryError::query(err.to_string()))?;
        Ok(Order::from_draft(id, draft.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<OrderRow> = orders::table
            .order(orders::id.asc())
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(map_row).collect()
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = orders::table
            .filter(orders::id.eq(id.get()))
            .select(OrderRow::as_select())
            .first::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(map_row).transpose()
    }
}
