//! Embedded schema migrations applied at startup.
//!
//! Diesel's migration harness is synchronous, so the run happens on a blocking
//! thread with a dedicated `PgConnection`.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors surfaced while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("database migration failed: {message}")]
    Apply { message: String },
    #[error("migration task aborted: {message}")]
    Aborted { message: String },
}

impl MigrationError {
    fn connect(error: impl std::fmt::Display) -> Self {
        Self::Connect {
            message: error.to_string(),
        }
    }

    fn apply(error: impl std::fmt::Display) -> Self {
        Self::Apply {
            message: error.to_string(),
        }
    }
}

fn apply_pending(database_url: &str) -> Result<usize, MigrationError> {
    let mut connection = PgConnection::establish(database_url).map_err(MigrationError::connect)?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(MigrationError::apply)?;
    Ok(applied.len())
}

/// Apply every pending embedded migration to the database at `database_url`.
///
/// Returns the number of migrations that ran.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_pending(&url))
        .await
        .map_err(|err| MigrationError::Aborted {
            message: err.to_string(),
        })??;
    info!(applied, "database migrations complete");
    Ok(applied)
}
