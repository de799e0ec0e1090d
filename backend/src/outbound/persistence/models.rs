//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types validate
//! identifiers, so a corrupt row surfaces as an error instead of a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{orders, products};
use crate::domain::{
    DeliveryTime, Error, Order, OrderDraft, OrderId, Product, ProductId, ProductSize,
};

/// Row struct for reading from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i64,
    pub name: String,
    pub width: f32,
    pub length: f32,
    pub height: f32,
    pub weight: f32,
    pub place: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = Error;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(row.id)?,
            name: row.name,
            size: ProductSize {
                width: row.width,
                length: row.length,
                height: row.height,
            },
            weight: row.weight,
            place: row.place,
        })
    }
}

/// Row struct for reading from the orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub from_place: String,
    pub destination: String,
    pub time: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = Error;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::new(row.id)?,
            product_id: ProductId::new(row.product_id)?,
            name: row.name,
            from: row.from_place,
            destination: row.destination,
            time: DeliveryTime::from_utc(row.time),
        })
    }
}

/// Insertable struct for creating new order records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub product_id: i64,
    pub name: &'a str,
    pub from_place: &'a str,
    pub destination: &'a str,
    pub time: DateTime<Utc>,
}

impl<'a> From<&'a OrderDraft> for NewOrderRow<'a> {
    fn from(draft: &'a OrderDraft) -> Self {
        Self {
            product_id: draft.product_id.get(),
            name: &draft.name,
            from_place: &draft.from,
            destination: &draft.destination,
            time: draft.time.as_utc(),
        }
    }
}
