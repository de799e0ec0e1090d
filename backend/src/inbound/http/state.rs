//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DeliveryCommand, DeliveryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub delivery: Arc<dyn DeliveryCommand>,
    pub orders: Arc<dyn DeliveryQuery>,
}

impl HttpState {
    /// Construct state from the delivery driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use delivery::domain::DeliveryService;
    /// use delivery::domain::ports::{FixtureOrderRepository, FixtureProductRepository};
    /// use delivery::inbound::http::state::HttpState;
    ///
    /// let service = Arc::new(DeliveryService::with_random_pricing(
    ///     Arc::new(FixtureProductRepository),
    ///     Arc::new(FixtureOrderRepository),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _orders = state.orders.clone();
    /// ```
    pub fn new(delivery: Arc<dyn DeliveryCommand>, orders: Arc<dyn DeliveryQuery>) -> Self {
        Self { delivery, orders }
    }
}
