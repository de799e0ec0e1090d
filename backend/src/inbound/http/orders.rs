//! Order read endpoints and the order response payloads.
//!
//! ```text
//! GET /api/v1/orders
//! GET /api/v1/orders/{id}
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Order, OrderDetails, OrderSummary, Product};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

/// Persisted order as returned after creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub product_id: i64,
    /// Product name captured when the order was placed.
    #[schema(example = "wardrobe")]
    pub name: String,
    /// Product origin captured when the order was placed.
    #[schema(example = "Tverskoy Boulevard, 25")]
    pub from: String,
    #[schema(example = "Bolshaya Sadovaya, 302")]
    pub destination: String,
    #[schema(example = "2020-05-17T09:30:00Z")]
    pub time: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.get(),
            product_id: order.product_id.get(),
            name: order.name,
            from: order.from,
            destination: order.destination,
            time: order.time.to_string(),
        }
    }
}

/// Redacted order used in listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummaryResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub product_id: i64,
    #[schema(example = "wardrobe")]
    pub name: String,
}

impl From<OrderSummary> for OrderSummaryResponse {
    fn from(summary: OrderSummary) -> Self {
        Self {
            id: summary.id.get(),
            product_id: summary.product_id.get(),
            name: summary.name,
        }
    }
}

/// Catalogue product embedded in order details.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "wardrobe")]
    pub name: String,
    pub width: f32,
    pub length: f32,
    pub height: f32,
    pub weight: f32,
    #[schema(example = "Tverskoy Boulevard, 25")]
    pub place: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name,
            width: product.size.width,
            length: product.size.length,
            height: product.size.height,
            weight: product.weight,
            place: product.place,
        }
    }
}

/// Order joined with its current product record.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailsResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub product: ProductResponse,
    #[schema(example = "Tverskoy Boulevard, 25")]
    pub from: String,
    #[schema(example = "Bolshaya Sadovaya, 302")]
    pub destination: String,
    #[schema(example = "2020-05-17T09:30:00Z")]
    pub time: String,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            id: details.id.get(),
            product: details.product.into(),
            from: details.from,
            destination: details.destination,
            time: details.time.to_string(),
        }
    }
}

/// List every order without delivery details.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Redacted orders", body = [OrderSummaryResponse]),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<OrderSummaryResponse>>> {
    let summaries = state.orders.list_orders().await?;
    Ok(web::Json(
        summaries.into_iter().map(OrderSummaryResponse::from).collect(),
    ))
}

/// Fetch one order together with its product.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = i64, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order details", body = OrderDetailsResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Order or product not found", body = ErrorSchema),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderDetailsResponse>> {
    let order_id = parse_path_id(&path)?;
    let details = state.orders.get_order(order_id).await?;
    Ok(web::Json(details.into()))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
