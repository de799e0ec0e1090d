//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every delivery endpoint, the health probes and the
//! response DTOs. The generated document backs Swagger UI (debug builds) and
//! is exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::orders::{
    OrderDetailsResponse, OrderResponse, OrderSummaryResponse, ProductResponse,
};
use crate::inbound::http::products::{
    CostOfDeliveryRequestBody, CostOfDeliveryResponse, CreateOrderRequestBody,
};
use crate::inbound::http::schemas::ErrorSchema;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Delivery API",
        description = "Delivery cost quotes and order placement for catalogue products."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::cost_of_delivery,
        crate::inbound::http::products::create_order,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CostOfDeliveryRequestBody,
        CostOfDeliveryResponse,
        CreateOrderRequestBody,
        OrderResponse,
        OrderSummaryResponse,
        OrderDetailsResponse,
        ProductResponse,
        ErrorSchema,
    )),
    tags(
        (name = "products", description = "Delivery quotes and order placement"),
        (name = "orders", description = "Placed orders"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
