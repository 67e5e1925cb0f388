//! Configuration types for the hook service
//!
//! Configuration is layered with the `config` crate. Sources applied in
//! order, later sources overriding earlier ones:
//!
//! 1. `/etc/ztc-hooks/service.yaml` - system-wide defaults
//! 2. `./config/service.yaml` - deployment-local override
//! 3. The file named by `ZTC_CONFIG_FILE` - operator-specified file
//! 4. Environment variables prefixed `ZTC__` with `__` separators,
//!    e.g. `ZTC__SERVER__PORT=9090` sets `server.port`
//!
//! Every field carries a serde default, so an absent file yields the
//! built-in defaults. The pre-shared key has no default and must be
//! supplied by one of the sources.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;
use ztc_hooks_core::{HookVerifier, PreSharedKey};

/// Environment variable naming an explicit configuration file
pub const CONFIG_FILE_ENV: &str = "ZTC_CONFIG_FILE";

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "ZTC";

/// Service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Hook endpoint settings
    pub webhooks: WebhookConfig,

    /// Signature verification settings
    pub verification: VerificationConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from the layered sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if a present file is malformed, the
    /// explicit file is missing, or a value cannot be coerced to its type.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(
                config::File::with_name("/etc/ztc-hooks/service")
                    .required(false)
                    .format(config::FileFormat::Yaml),
            )
            .add_source(
                config::File::with_name("config/service")
                    .required(false)
                    .format(config::FileFormat::Yaml),
            );

        if let Ok(explicit_path) = std::env::var(CONFIG_FILE_ENV) {
            if !explicit_path.is_empty() {
                info!(path = %explicit_path, "Loading configuration from explicit path");
                builder = builder.add_source(
                    config::File::with_name(&explicit_path)
                        .required(true)
                        .format(config::FileFormat::Yaml),
                );
            }
        }

        let config = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check that the configuration can run a service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.verification.pre_shared_key()?;

        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                field: "server.port".to_string(),
                message: "must be between 1 and 65535".to_string(),
            });
        }

        if self.webhooks.signature_header.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "webhooks.signature_header".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if !self.webhooks.endpoint_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "webhooks.endpoint_path".to_string(),
                message: "must start with '/'".to_string(),
            });
        }

        if !is_literal_route(&self.webhooks.endpoint_path) {
            return Err(ConfigError::Invalid {
                field: "webhooks.endpoint_path".to_string(),
                message: "must be a literal path without captures or wildcards".to_string(),
            });
        }

        Ok(())
    }

    /// Build the signature verifier described by the verification section.
    pub fn verifier(&self) -> Result<HookVerifier, ConfigError> {
        let key = self.verification.pre_shared_key()?;
        Ok(HookVerifier::new(key, self.verification.tolerance())
            .require_signature(self.verification.require_signature))
    }
}

/// The router treats `{`, `}` and `*` as capture syntax and rejects segments
/// starting with `:`; such paths would fail when the route is registered.
fn is_literal_route(path: &str) -> bool {
    !path.contains(['{', '}', '*']) && !path.split('/').any(|segment| segment.starts_with(':'))
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Hook endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Path hooks are posted to
    pub endpoint_path: String,

    /// Header carrying the signature
    pub signature_header: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            endpoint_path: "/".to_string(),
            signature_header: ztc_hooks_core::signature::SIGNATURE_HEADER.to_string(),
        }
    }
}

/// Signature verification configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Organization pre-shared key, hex encoded
    #[serde(skip_serializing)]
    pub pre_shared_key: Option<String>,

    /// Replay window in seconds
    pub tolerance_seconds: u64,

    /// Reject hooks that carry no signature header
    pub require_signature: bool,
}

impl VerificationConfig {
    /// Replay window as a duration
    pub fn tolerance(&self) -> Duration {
        Duration::from_secs(self.tolerance_seconds)
    }

    fn pre_shared_key(&self) -> Result<PreSharedKey, ConfigError> {
        let text = self
            .pre_shared_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::Invalid {
                field: "verification.pre_shared_key".to_string(),
                message: "is required".to_string(),
            })?;

        PreSharedKey::from_hex(text).map_err(|_| ConfigError::Invalid {
            field: "verification.pre_shared_key".to_string(),
            message: "must be hexadecimal".to_string(),
        })
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            pre_shared_key: None,
            tolerance_seconds: ztc_hooks_core::DEFAULT_TOLERANCE.as_secs(),
            require_signature: true,
        }
    }
}

// Security: Don't expose the pre-shared key in debug output
impl std::fmt::Debug for VerificationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationConfig")
            .field(
                "pre_shared_key",
                &self.pre_shared_key.as_ref().map(|_| "<REDACTED>"),
            )
            .field("tolerance_seconds", &self.tolerance_seconds)
            .field("require_signature", &self.require_signature)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging level, overridden by `RUST_LOG` when set
    pub level: String,

    /// Enable JSON structured logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration for {field}: {message}")]
    Invalid { field: String, message: String },
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
