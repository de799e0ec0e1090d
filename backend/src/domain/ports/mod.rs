//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`ProductRepository`, `OrderRepository`, `DeliveryPricing`)
//! describe what the workflow needs from storage and pricing. Driving ports
//! (`DeliveryCommand`, `DeliveryQuery`) are what inbound adapters call.
//! Repository traits expose strongly typed errors so adapters map their
//! failures into predictable variants.

mod macros;

mod delivery;
mod delivery_pricing;
mod order_repository;
mod product_repository;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use delivery::{MockDeliveryCommand, MockDeliveryQuery};
pub use delivery::{
    CreateOrderRequest, DeliveryCommand, DeliveryQuery, DeliveryQuote, DeliveryQuoteRequest,
};
#[cfg(test)]
pub use delivery_pricing::MockDeliveryPricing;
pub use delivery_pricing::{DeliveryPrice, DeliveryPricing};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{FixtureOrderRepository, OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{
    FixtureProductRepository, ProductRepository, ProductRepositoryError,
};
