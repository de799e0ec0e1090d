//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{MockDeliveryCommand, MockDeliveryQuery};
use crate::inbound::http::error::json_config;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{orders, products};

/// Build state from mocked driving ports.
pub fn mocked_state(command: MockDeliveryCommand, query: MockDeliveryQuery) -> HttpState {
    HttpState::new(Arc::new(command), Arc::new(query))
}

/// App with every delivery route mounted under `/api/v1`, without rate
/// limiting.
pub fn delivery_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .service(
            web::scope("/api/v1")
                .service(products::cost_of_delivery)
                .service(products::create_order)
                .service(orders::list_orders)
                .service(orders::get_order),
        )
}
