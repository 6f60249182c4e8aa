// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. This macro is appropriate for non-critical
/// tuning parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
/// All required configuration is validated eagerly during initialization.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: database::DatabaseConfig,
    pub server: server::ServerConfig,
    pub metrics: metrics::MetricsConfig,
    pub site: site::SiteConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            database: database::DatabaseConfig::from_env()?,
            server: server::ServerConfig::from_env(),
            metrics: metrics::MetricsConfig::from_env()?,
            site: site::SiteConfig::from_env(),
        })
    }
}

// ============================================================
// Database configuration
// ============================================================

mod database {
    // ---
    use super::*;
    use anyhow::Context;
    use sqlx::postgres::PgConnectOptions;

    /// Database-related configuration derived from environment variables.
    #[derive(Debug, Clone)]
    pub struct DatabaseConfig {
        /// Parsed PostgreSQL connection settings.
        pub connect_options: PgConnectOptions,

        /// Number of connection attempts before giving up. Defaults to 50.
        pub retry_count: u32,

        /// Pause between connection attempts. Defaults to 1 second.
        pub retry_delay: Duration,

        /// Maximum time to wait when acquiring a connection from the pool. Defaults to 30 seconds.
        pub acquire_timeout: Duration,

        /// Minimum number of connections to keep in the pool, even when idle. Defaults to 2.
        pub min_connections: u32,

        /// Maximum number of connections open concurrently. Defaults to 15.
        pub max_connections: u32,
    }

    impl DatabaseConfig {
        /// Builds a [`DatabaseConfig`] from environment variables.
        ///
        /// `DATABASE_URL` wins when present. Otherwise the options are built
        /// from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
        ///
        /// # Errors
        /// Returns an error if neither form of connection settings is available,
        /// or if `DATABASE_URL` is not a valid PostgreSQL URL.
        pub fn from_env() -> Result<Self> {
            // ---
            let connect_options = match options_from_parts() {
                Some(options) if std::env::var("DATABASE_URL").is_err() => options,
                _ => required_env!("DATABASE_URL")
                    .parse::<PgConnectOptions>()
                    .context("Invalid configuration: DATABASE_URL")?,
            };
            let retry_count = optional_env_parse!("PORTFOLIO_DB_RETRY_COUNT", u32, 50);
            let retry_delay_ms = optional_env_parse!("PORTFOLIO_DB_RETRY_DELAY_MS", u64, 1000);
            let acquire_timeout_secs =
                optional_env_parse!("PORTFOLIO_DB_ACQUIRE_TIMEOUT_SEC", u64, 30);
            let min_connections = optional_env_parse!("PORTFOLIO_DB_MIN_CONNECTIONS", u32, 2);
            let max_connections = optional_env_parse!("PORTFOLIO_DB_MAX_CONNECTIONS", u32, 15);

            Ok(Self {
                connect_options,
                retry_count,
                retry_delay: Duration::from_millis(retry_delay_ms),
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
                min_connections,
                max_connections,
            })
        }
    }

    /// Builds connection options from the discrete `DB_*` variables.
    ///
    /// Values are handed to the driver as-is, so credentials may contain any
    /// character. Returns `None` unless host, user and database name are all set.
    fn options_from_parts() -> Option<PgConnectOptions> {
        // ---
        let host = std::env::var("DB_HOST").ok()?;
        let user = std::env::var("DB_USER").ok()?;
        let name = std::env::var("DB_NAME").ok()?;
        let port = optional_env_parse!("DB_PORT", u16, 5432);

        let options = PgConnectOptions::new()
            .host(&host)
            .port(port)
            .username(&user)
            .database(&name);

        Some(match std::env::var("DB_PASSWORD") {
            Ok(password) => options.password(&password),
            Err(_) => options,
        })
    }
}
pub use database::DatabaseConfig;

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---

    /// HTTP listener configuration.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Socket address the server binds to.
        pub bind_addr: String,
    }

    impl ServerConfig {
        /// Reads `PORTFOLIO_BIND_ADDR`, falling back to `0.0.0.0:$PORT`,
        /// then to `0.0.0.0:8080`.
        pub fn from_env() -> Self {
            // ---
            let bind_addr = std::env::var("PORTFOLIO_BIND_ADDR").unwrap_or_else(|_| {
                let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
                format!("0.0.0.0:{port}")
            });

            Self { bind_addr }
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Metrics configuration
// ============================================================

mod metrics {
    // ---
    use super::*;

    /// Which metrics backend the service records into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetricsBackend {
        /// Prometheus registry exposed on `/metrics`.
        Prometheus,
        /// Discard everything.
        Noop,
    }

    #[derive(Debug, Clone)]
    pub struct MetricsConfig {
        pub backend: MetricsBackend,
    }

    impl MetricsConfig {
        /// Reads `PORTFOLIO_METRICS_TYPE` (`prom` or `noop`, default `prom`).
        ///
        /// # Errors
        /// Returns an error for any other value.
        pub fn from_env() -> Result<Self> {
            // ---
            let backend = match std::env::var("PORTFOLIO_METRICS_TYPE").as_deref() {
                Err(_) | Ok("prom") => MetricsBackend::Prometheus,
                Ok("noop") => MetricsBackend::Noop,
                Ok(other) => anyhow::bail!(
                    "Invalid configuration: PORTFOLIO_METRICS_TYPE must be 'prom' or 'noop', got '{other}'"
                ),
            };

            Ok(Self { backend })
        }
    }
}
pub use metrics::{MetricsBackend, MetricsConfig};

// ============================================================
// Site configuration
// ============================================================

mod site {
    // ---

    /// Presentation and content settings for the website itself.
    #[derive(Debug, Clone)]
    pub struct SiteConfig {
        /// Title rendered in the homepage header. Defaults to "Portfolio".
        pub title: String,

        /// Seed default section content at startup. Defaults to true.
        pub seed_content: bool,

        /// Number of entries shown on the homepage. Defaults to 10, never negative.
        pub home_entry_limit: i64,
    }

    impl SiteConfig {
        pub fn from_env() -> Self {
            // ---
            Self {
                title: std::env::var("PORTFOLIO_SITE_TITLE")
                    .unwrap_or_else(|_| "Portfolio".to_string()),
                seed_content: optional_env_parse!("PORTFOLIO_SEED_CONTENT", bool, true),
                home_entry_limit: optional_env_parse!("PORTFOLIO_HOME_ENTRY_LIMIT", i64, 10)
                    .max(0),
            }
        }
    }

    impl Default for SiteConfig {
        fn default() -> Self {
            Self {
                title: "Portfolio".to_string(),
                seed_content: true,
                home_entry_limit: 10,
            }
        }
    }
}
pub use site::SiteConfig;

// ============================================================
// Tests
// ============================================================
