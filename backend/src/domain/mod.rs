//! Domain primitives, ports and services.
//!
//! Purpose: Define the strongly typed delivery entities used by the HTTP and
//! persistence layers, the ports adapters implement, and the workflow that
//! ties them together. Nothing here knows about Actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: domain failure with a closed HTTP-facing kind.
//! - Product / ProductId / ProductSize: read-only catalogue entry.
//! - Order / OrderDraft / OrderSummary / OrderDetails / DeliveryTime:
//!   delivery orders and their projections.
//! - DeliveryService: implements the `DeliveryCommand` and `DeliveryQuery`
//!   driving ports.
//! - RandomDeliveryPricing: placeholder `DeliveryPricing` implementation.
//! - RateLimiter / RateLimitConfig: per-client admission control.

pub mod error;
pub mod order;
pub mod ports;
pub mod product;
pub mod rate_limit;

mod delivery_service;
mod pricing;

pub use self::delivery_service::DeliveryService;
pub use self::error::{Error, ErrorCode};
pub use self::order::{
    DELIVERY_TIME_FORMAT, DeliveryTime, InvalidDeliveryTime, Order, OrderDetails, OrderDraft,
    OrderId, OrderSummary,
};
pub use self::pricing::RandomDeliveryPricing;
pub use self::product::{Product, ProductId, ProductSize};
pub use self::rate_limit::{RateLimitConfig, RateLimiter};
