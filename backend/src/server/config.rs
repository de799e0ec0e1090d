//! HTTP server settings and the configuration object built from them.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use delivery::domain::RateLimitConfig;
use delivery::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// Settings loaded from CLI flags, `DELIVERY_*` environment variables and the
/// configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DELIVERY")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string. In-memory fixtures are used when unset.
    pub database_url: Option<String>,
    /// Upper bound on reading a client request, in seconds.
    #[ortho_config(default = 60)]
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests on shutdown, in seconds.
    #[ortho_config(default = 5)]
    pub shutdown_timeout_secs: u64,
    /// Rate limiter refill rate in tokens per second.
    pub rate_limit_per_second: Option<u32>,
    /// Rate limiter bucket capacity.
    pub rate_limit_burst: Option<u32>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to `0.0.0.0:5000`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Build the rate limiter configuration, keeping the default timings.
    pub fn rate_limit(&self) -> RateLimitConfig {
        let defaults = RateLimitConfig::default();
        RateLimitConfig::new(
            self.rate_limit_per_second
                .unwrap_or(defaults.refill_per_second),
            self.rate_limit_burst.unwrap_or(defaults.burst),
        )
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) request_timeout: Duration,
    pub(crate) shutdown_timeout: Duration,
    pub(crate) rate_limit: RateLimitConfig,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration with default timeouts and limits.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            rate_limit: RateLimitConfig::default(),
            db_pool: None,
        }
    }

    /// Construct a server configuration from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &ServerSettings) -> Self {
        Self::new(settings.bind_addr())
            .with_request_timeout(settings.request_timeout())
            .with_shutdown_timeout(settings.shutdown_timeout())
            .with_rate_limit(settings.rate_limit())
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server falls back to in-memory fixtures.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
