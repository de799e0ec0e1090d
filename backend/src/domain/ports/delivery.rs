//! Driving ports for the delivery workflow.
//!
//! HTTP handlers depend on these traits rather than on the concrete service,
//! which keeps handler tests free of storage wiring. Identifiers arrive raw
//! so that validation stays in the domain.

use async_trait::async_trait;

use crate::domain::{DeliveryTime, Error, Order, OrderDetails, OrderSummary};

use super::DeliveryPrice;

/// Request to quote a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryQuoteRequest {
    pub product_id: i64,
    pub destination: String,
}

/// Quoted delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryQuote {
    /// Product origin.
    pub from: String,
    pub destination: String,
    pub price: DeliveryPrice,
}

/// Request to place an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub product_id: i64,
    pub destination: String,
    pub time: DeliveryTime,
}

/// Write-side delivery operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryCommand: Send + Sync {
    /// Quote delivery of a product to a destination.
    async fn quote_delivery(&self, request: DeliveryQuoteRequest) -> Result<DeliveryQuote, Error>;

    /// Persist a new order. Not idempotent: every call inserts one row.
    async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, Error>;
}

/// Read-side delivery operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryQuery: Send + Sync {
    /// Fetch one order together with its product.
    async fn get_order(&self, order_id: i64) -> Result<OrderDetails, Error>;

    /// List every order in its redacted form.
    async fn list_orders(&self) -> Result<Vec<OrderSummary>, Error>;
}
