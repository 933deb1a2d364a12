//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. The file path defaults to `config.yaml` but can be specified
//! via the `-f` flag or the `CATALOGD_CONFIG` environment variable.
//!
//! ## Loading Priority
//!
//! Sources are merged in order (later sources override earlier ones):
//!
//! 1. **YAML config file** - base configuration (default: `config.yaml`)
//! 2. **Environment variables** - variables prefixed with `CATALOGD_`
//! 3. **DATABASE_URL** - special case: overrides `database_url` if set
//!
//! For nested values use double underscores, e.g.
//! `CATALOGD_AUTH__SESSION__COOKIE_NAME=catalog_session`.

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::Error;
use crate::locale::Locale;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "CATALOGD_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// All fields have defaults suitable for local development; production
/// deployments must at least set `secret_key` and `database_url`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Email address for the initial admin user (created on first startup)
    pub admin_email: String,
    /// Password for the initial admin user (optional, can be set via environment)
    pub admin_password: Option<String>,
    /// Secret key for JWT signing (required for production)
    pub secret_key: Option<String>,
    /// Locale used when a request does not specify `lang`
    pub default_locale: Locale,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// CORS configuration for browser clients
    pub cors: CorsConfig,
}

/// Authentication configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Session cookie configuration
    pub session: SessionConfig,
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Session timeout duration
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Cookie name for the session token
    pub cookie_name: String,
    /// Set Secure flag on cookies (HTTPS only)
    pub cookie_secure: bool,
    /// SameSite cookie attribute ("strict", "lax", or "none")
    pub cookie_same_site: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(24 * 60 * 60), // 24 hours
            cookie_name: "catalog_session".to_string(),
            cookie_secure: true,
            cookie_same_site: "strict".to_string(),
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<String>,
    /// Allow credentials (cookies) in CORS requests
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allow_credentials: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            database_url: "postgres://localhost:5432/catalog".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: Some("admin123".to_string()),
            secret_key: None,
            default_locale: Locale::Zh,
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.secret_key.is_none() {
            return Err(Error::Internal {
                operation: "Config validation: secret_key is not configured. \
                     Please set the CATALOGD_SECRET_KEY environment variable or add secret_key to the config file."
                    .to_string(),
            });
        }

        if self.auth.session.timeout.as_secs() < 300 {
            // Less than 5 minutes
            return Err(Error::Internal {
                operation: "Config validation: session timeout is too short (minimum 5 minutes)".to_string(),
            });
        }

        if self.auth.session.timeout.as_secs() > 86400 * 30 {
            // More than 30 days
            return Err(Error::Internal {
                operation: "Config validation: session timeout is too long (maximum 30 days)".to_string(),
            });
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: CORS allowed_origins cannot be empty. Add at least one allowed origin.".to_string(),
            });
        }

        let has_wildcard = self.cors.allowed_origins.iter().any(|origin| origin == "*");
        if has_wildcard && self.cors.allow_credentials {
            return Err(Error::Internal {
                operation: "Config validation: CORS cannot use wildcard origin '*' with allow_credentials=true. Specify explicit origins."
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("CATALOGD_").split("__"))
            // Common DATABASE_URL pattern
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn test_args(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_defaults_fail_validation_without_secret_key() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_and_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
                port: 4000
                secret_key: yaml-secret
                default_locale: en
                "#,
            )?;
            jail.set_env("CATALOGD_PORT", "5000");
            jail.set_env("CATALOGD_AUTH__SESSION__COOKIE_NAME", "test_session");

            let config = Config::load(&test_args("config.yaml")).expect("config should load");
            // Env beats YAML
            assert_eq!(config.port, 5000);
            assert_eq!(config.secret_key.as_deref(), Some("yaml-secret"));
            assert_eq!(config.default_locale, Locale::En);
            assert_eq!(config.auth.session.cookie_name, "test_session");
            Ok(())
        });
    }

    #[test]
    fn test_database_url_env_special_case() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "secret_key: s\n")?;
            jail.set_env("DATABASE_URL", "postgres://db.internal:5432/catalog");

            let config = Config::load(&test_args("config.yaml")).expect("config should load");
            assert_eq!(config.database_url, "postgres://db.internal:5432/catalog");
            Ok(())
        });
    }

    #[test]
    fn test_session_timeout_bounds() {
        let mut config = Config {
            secret_key: Some("s".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.auth.session.timeout = Duration::from_secs(60);
        assert!(config.validate().is_err());

        config.auth.session.timeout = Duration::from_secs(86400 * 60);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wildcard_origin_with_credentials_is_rejected() {
        let mut config = Config {
            secret_key: Some("s".to_string()),
            ..Default::default()
        };
        config.cors.allowed_origins = vec!["*".to_string()];
        assert!(config.validate().is_err());

        config.cors.allow_credentials = false;
        assert!(config.validate().is_ok());
    }
}
