//! Port for pricing a delivery.
//!
//! The workflow asks this port for a price and never computes one itself, so
//! a distance-based calculation can replace the placeholder without touching
//! the service.

use crate::domain::Product;

/// Delivery price in whole currency units.
pub type DeliveryPrice = u32;

/// Prices a delivery of `product` to `destination`.
#[cfg_attr(test, mockall::automock)]
pub trait DeliveryPricing: Send + Sync {
    /// Return the delivery price.
    fn price(&self, product: &Product, destination: &str) -> DeliveryPrice;
}
