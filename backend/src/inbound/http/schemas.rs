//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! Domain types stay framework-agnostic, so the error envelope written by the
//! HTTP error mapping is described here instead.

use utoipa::ToSchema;

/// OpenAPI schema for the error envelope returned alongside 400 and 404
/// responses that carry a message.
#[derive(ToSchema)]
#[schema(as = ErrorResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "can't find product with id= 1")]
    error: String,
}
