//! Delivery backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
