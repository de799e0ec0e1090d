//! Product delivery endpoints.
//!
//! ```text
//! POST /api/v1/products/{id}/cost-of-delivery  Quote a delivery
//! POST /api/v1/products/{id}/order             Place a delivery order
//! ```
//!
//! The body is decoded before the path id is parsed, so a request with both
//! a bad body and a bad id reports the body.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DeliveryTime;
use crate::domain::ports::{CreateOrderRequest, DeliveryPrice, DeliveryQuote, DeliveryQuoteRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::orders::OrderResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{deserialize_delivery_time, parse_path_id};

/// Body of a delivery quote request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CostOfDeliveryRequestBody {
    /// Free-text delivery address. Absent means empty.
    #[serde(default)]
    #[schema(example = "Bolshaya Sadovaya, 302")]
    pub destination: String,
}

/// Quoted delivery.
#[derive(Debug, Serialize, ToSchema)]
pub struct CostOfDeliveryResponse {
    #[schema(example = "Tverskoy Boulevard, 25")]
    pub from: String,
    #[schema(example = "Bolshaya Sadovaya, 302")]
    pub destination: String,
    /// Price in whole currency units: 300 to 2000 in steps of 100.
    #[schema(example = 700)]
    pub price: DeliveryPrice,
}

impl From<DeliveryQuote> for CostOfDeliveryResponse {
    fn from(quote: DeliveryQuote) -> Self {
        Self {
            from: quote.from,
            destination: quote.destination,
            price: quote.price,
        }
    }
}

/// Body of an order placement request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequestBody {
    #[serde(default)]
    #[schema(example = "Bolshaya Sadovaya, 302")]
    pub destination: String,
    /// Scheduled delivery time, `YYYY-MM-DDTHH:MM:SSZ`.
    #[serde(deserialize_with = "deserialize_delivery_time")]
    #[schema(value_type = String, example = "2020-05-17T09:30:00Z")]
    pub time: DeliveryTime,
}

/// Quote delivery of a product.
#[utoipa::path(
    post,
    path = "/api/v1/products/{id}/cost-of-delivery",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body = CostOfDeliveryRequestBody,
    responses(
        (status = 200, description = "Delivery quote", body = CostOfDeliveryResponse),
        (status = 400, description = "Malformed body or invalid id", body = ErrorSchema),
        (status = 404, description = "Product not found", body = ErrorSchema),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["products"],
    operation_id = "costOfDelivery"
)]
#[post("/products/{id}/cost-of-delivery")]
pub async fn cost_of_delivery(
    state: web::Data<HttpState>,
    payload: web::Json<CostOfDeliveryRequestBody>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CostOfDeliveryResponse>> {
    let CostOfDeliveryRequestBody { destination } = payload.into_inner();
    let product_id = parse_path_id(&path)?;

    let quote = state
        .delivery
        .quote_delivery(DeliveryQuoteRequest {
            product_id,
            destination,
        })
        .await?;
    Ok(web::Json(quote.into()))
}

/// Place a delivery order for a product.
///
/// Every successful call inserts a new order.
#[utoipa::path(
    post,
    path = "/api/v1/products/{id}/order",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body = CreateOrderRequestBody,
    responses(
        (status = 200, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Malformed body or invalid id", body = ErrorSchema),
        (status = 404, description = "Product not found", body = ErrorSchema),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["products"],
    operation_id = "createOrder"
)]
#[post("/products/{id}/order")]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrderRequestBody>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderResponse>> {
    let CreateOrderRequestBody { destination, time } = payload.into_inner();
    let product_id = parse_path_id(&path)?;

    let order = state
        .delivery
        .create_order(CreateOrderRequest {
            product_id,
            destination,
            time,
        })
        .await?;
    Ok(web::Json(order.into()))
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
