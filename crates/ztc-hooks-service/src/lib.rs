//! # ZTC Hooks Service
//!
//! HTTP server receiving hooks from ZeroTier Central.
//!
//! This service provides:
//! - A hook endpoint that verifies the `X-ZTC-Signature` header, decodes the
//!   hook and dispatches it to a [`HookHandler`]
//! - A health check endpoint
//!
//! Verification failures are answered with one uniform `401` response; the
//! specific reason is only logged.

pub mod config;
pub mod handler;

pub use crate::config::{
    ConfigError, LoggingConfig, ServerConfig, ServiceConfig, VerificationConfig, WebhookConfig,
};
pub use handler::{HookHandler, LoggingHookHandler};

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ztc_hooks_core::{HookError, HookEvent, HookType, HookVerifier, SignatureError};

/// Message returned for every verification failure
pub const UNAUTHORIZED_MESSAGE: &str = "signature verification failed";

// ============================================================================
// Application State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration for the service
    pub config: Arc<ServiceConfig>,

    /// Verifier bound to the organization's pre-shared key
    pub verifier: Arc<HookVerifier>,

    /// Receiver of verified hooks
    pub handler: Arc<dyn HookHandler>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: ServiceConfig,
        verifier: HookVerifier,
        handler: Arc<dyn HookHandler>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            handler,
        }
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_body_size;

    Router::new()
        .route(&state.config.webhooks.endpoint_path, post(handle_hook))
        .route("/health", get(handle_health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_size))
                .into_inner(),
        )
        .with_state(state)
}

/// Start HTTP server
///
/// Runs until SIGINT or SIGTERM is received. In-flight requests are allowed
/// to finish before the function returns.
pub async fn start_server(
    config: ServiceConfig,
    handler: Arc<dyn HookHandler>,
) -> Result<(), ServiceError> {
    let verifier = config.verifier()?;
    let address = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(config, verifier, handler);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| ServiceError::BindFailed {
            address: address.clone(),
            message: e.to_string(),
        })?;

    info!("Starting HTTP server on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", logging.level)));

    if logging.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

// ============================================================================
// Hook Handlers
// ============================================================================

/// Handle a hook delivered by ZeroTier Central
///
/// 1. Verify the signature header against the raw body
/// 2. Decode the hook
/// 3. Dispatch known hook types to the configured handler
///
/// Hooks of unknown type are acknowledged without dispatch so that kinds
/// added upstream are not retried forever.
#[instrument(skip(state, headers, body))]
pub async fn handle_hook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<HookResponse>, HookHandlerError> {
    let signature = match headers.get(state.config.webhooks.signature_header.as_str()) {
        Some(value) => Some(value.to_str().map_err(|_| {
            HookHandlerError::Unauthorized(SignatureError::MalformedHeader {
                reason: "header value is not visible ASCII".to_string(),
            })
        })?),
        None => None,
    };

    state
        .verifier
        .verify(signature, &body)
        .map_err(HookHandlerError::Unauthorized)?;

    let event = HookEvent::from_payload(&body)?;
    let hook_type = event.hook_type();

    if hook_type == HookType::Unknown {
        warn!(
            hook_id = %event.base().hook_id,
            org_id = %event.base().org_id,
            "Ignoring hook of unknown type"
        );
        return Ok(Json(HookResponse {
            status: "ignored".to_string(),
            hook_type,
        }));
    }

    info!(
        hook_id = %event.base().hook_id,
        hook_type = %hook_type,
        "Received verified hook"
    );

    state.handler.handle(event).await?;

    Ok(Json(HookResponse {
        status: "processed".to_string(),
        hook_type,
    }))
}

/// Basic health check endpoint
async fn handle_health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Response Types
// ============================================================================

/// Response to an accepted hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookResponse {
    /// `processed` when dispatched, `ignored` for unknown hook types
    pub status: String,
    pub hook_type: HookType,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

// ============================================================================
// Error Types
// ============================================================================

/// Hook handler errors with HTTP status code mapping
///
/// - `401 Unauthorized`: any signature verification failure. The body is the
///   same for every cause so callers cannot probe which check failed.
/// - `400 Bad Request`: a verified payload that is not a valid hook document
/// - `500 Internal Server Error`: the hook handler failed; details are
///   logged and a generic message is returned
#[derive(Debug, thiserror::Error)]
pub enum HookHandlerError {
    #[error("Signature verification failed: {0}")]
    Unauthorized(SignatureError),

    #[error("Invalid hook payload: {0}")]
    InvalidPayload(#[from] HookError),

    #[error("Hook handler failed: {message}")]
    HandlerFailed { message: String },
}

impl IntoResponse for HookHandlerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized(ref e) => {
                warn!(
                    kind = e.kind(),
                    category = ?e.error_category(),
                    error = %e,
                    "Rejected hook"
                );
                (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE.to_string())
            }
            Self::InvalidPayload(ref e) => {
                warn!(error = %e, "Verified hook has an invalid payload");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::HandlerFailed { ref message } => {
                // Log detailed error server-side but return generic message to client
                error!(error = %message, "Hook handler failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error occurred. Please try again later.".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        (status, Json(body)).into_response()
    }
}

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("Server failed: {message}")]
    ServerFailed { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
