//! Builders for HTTP state ports backed by Diesel or in-memory fixtures.

use std::sync::Arc;

use actix_web::web;

use delivery::domain::DeliveryService;
use delivery::domain::ports::{FixtureOrderRepository, FixtureProductRepository};
use delivery::inbound::http::state::HttpState;
use delivery::outbound::persistence::{DbPool, DieselOrderRepository, DieselProductRepository};

use super::ServerConfig;

fn diesel_state(pool: &DbPool) -> HttpState {
    let service = Arc::new(DeliveryService::with_random_pricing(
        Arc::new(DieselProductRepository::new(pool.clone())),
        Arc::new(DieselOrderRepository::new(pool.clone())),
    ));
    HttpState::new(service.clone(), service)
}

fn fixture_state() -> HttpState {
    let service = Arc::new(DeliveryService::with_random_pricing(
        Arc::new(FixtureProductRepository),
        Arc::new(FixtureOrderRepository),
    ));
    HttpState::new(service.clone(), service)
}

/// Build the HTTP state, using database-backed repositories when a pool is
/// configured and fixtures otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => diesel_state(pool),
        None => fixture_state(),
    };
    web::Data::new(state)
}
