//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ROSTER_*` environment variables, and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings controlling the HTTP listener, storage, and startup data.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. In-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_size: Option<u32>,
    /// Seed example people and models into empty stores on startup.
    #[ortho_config(default = true)]
    pub example_data: bool,
}

/// Invalid setting values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        /// Rejected value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

impl AppSettings {
    /// Return the configured bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("roster")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("ROSTER_BIND_ADDR", None::<String>),
            ("ROSTER_DATABASE_URL", None::<String>),
            ("ROSTER_POOL_SIZE", None::<String>),
            ("ROSTER_EXAMPLE_DATA", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert!(settings.database_url().is_none());
        assert!(settings.pool_size.is_none());
        assert!(settings.example_data);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ROSTER_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "ROSTER_DATABASE_URL",
                Some("postgres://roster@localhost/roster".to_owned()),
            ),
            ("ROSTER_POOL_SIZE", Some("4".to_owned())),
            ("ROSTER_EXAMPLE_DATA", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://roster@localhost/roster")
        );
        assert_eq!(settings.pool_size, Some(4));
        assert!(!settings.example_data);
    }

    #[rstest]
    #[case(Some("   "))]
    #[case(None)]
    fn blank_database_url_selects_memory(#[case] url: Option<&str>) {
        let settings = AppSettings {
            bind_addr: None,
            database_url: url.map(str::to_owned),
            pool_size: None,
            example_data: true,
        };
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = AppSettings {
            bind_addr: Some("localhost".to_owned()),
            database_url: None,
            pool_size: None,
            example_data: false,
        };
        let err = settings.bind_addr().expect_err("missing port");
        assert!(matches!(err, SettingsError::BindAddr { .. }));
    }
}
