//! HTTP inbound adapter exposing the delivery REST endpoints.

pub mod error;
pub mod health;
pub mod orders;
pub mod products;
pub mod rate_limit;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::{ApiResult, json_config};
