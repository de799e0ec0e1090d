//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the product and order repository ports, backed
//! by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Database failures are mapped to the typed repository errors.
//!
//! # Example
//!
//! ```ignore
//! use delivery::outbound::persistence::{DbPool, DieselOrderRepository, PoolConfig};
//!
//! let pool = DbPool::connect(&PoolConfig::new("postgres://localhost/delivery")).await?;
//! let orders = DieselOrderRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_order_repository;
mod diesel_product_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
