//! Common test utilities for ztc-hooks-service integration tests
//!
//! This module provides:
//! - A recording hook handler
//! - Helpers for building routers and signed requests
//! - Sample hook payloads

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use ztc_hooks_core::{sign_payload, HookEvent, PreSharedKey};
use ztc_hooks_service::{create_router, AppState, HookHandler, HookHandlerError, ServiceConfig};

pub const PSK: &str = "778c6dab5feca625c7831644d18c4d0e4b3a337bff8a1e1c8f938f9cc20e6536";

#[allow(dead_code)]
pub const OTHER_PSK: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

#[allow(dead_code)]
pub const NETWORK_JOIN: &str = r#"{"hook_id":"ae76d4c0-c94e-4025-a648-2c504eb90e3c","org_id":"1bb4dc96-f311-4c4a-ac93-551cbc0fa3da","hook_type":"NETWORK_JOIN","network_id":"19d9808567a17ccf","member_id":"a02505e545"}"#;

#[allow(dead_code)]
pub const NETWORK_CONFIG_CHANGED: &str = r#"{"org_id": "1bb4dc96-f311-4c4a-ac93-551cbc0fa3da", "hook_id": "ae76d4c0-c94e-4025-a648-2c504eb90e3c", "user_id": "5fb96260-df39-4f18-b0ad-f37930ec613d", "hook_type": "NETWORK_CONFIG_CHANGED", "network_id": "19d9808567a2c324", "new_config": {"id": "19d9808567a2c324", "mtu": 2800, "name": "hook test 01", "private": true, "revision": 4, "routes": [{"target": "10.144.0.0/16"}], "rules": [{"type": "ACTION_ACCEPT"}]}, "old_config": {"id": "19d9808567a2c324", "mtu": 2800, "name": "hook test 01", "private": true, "revision": 3, "routes": [{"target": "10.144.0.0/16"}], "rules": [{"type": "ACTION_ACCEPT"}]}, "user_email": "admin@example.com"}"#;

// ============================================================================
// Recording Hook Handler
// ============================================================================

/// Hook handler that records every event and optionally fails
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct RecordingHookHandler {
    events: Arc<Mutex<Vec<HookEvent>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl RecordingHookHandler {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn set_failure(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    #[allow(dead_code)]
    pub fn events(&self) -> Vec<HookEvent> {
        self.events.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl HookHandler for RecordingHookHandler {
    async fn handle(&self, event: HookEvent) -> Result<(), HookHandlerError> {
        self.events.lock().unwrap().push(event);

        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(HookHandlerError::HandlerFailed { message }),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Test Fixtures
// ============================================================================

/// Service configuration bound to [`PSK`]
#[allow(dead_code)]
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.verification.pre_shared_key = Some(PSK.to_string());
    config
}

/// Build a router from a configuration and handler
#[allow(dead_code)]
pub fn create_test_router(config: ServiceConfig, handler: RecordingHookHandler) -> Router {
    let verifier = config.verifier().unwrap();
    create_router(AppState::new(config, verifier, Arc::new(handler)))
}

/// Signature header for `payload` signed with `key` at `timestamp`
#[allow(dead_code)]
pub fn signature_at(key: &str, timestamp: i64, payload: &str) -> String {
    let key = PreSharedKey::from_hex(key).unwrap();
    sign_payload(&key, timestamp, payload.as_bytes()).unwrap()
}

/// Signature header for `payload` signed with [`PSK`] now
#[allow(dead_code)]
pub fn signature_now(payload: &str) -> String {
    signature_at(PSK, chrono::Utc::now().timestamp(), payload)
}

/// POST request to `/` carrying an optional signature header
#[allow(dead_code)]
pub fn hook_request(signature: Option<&str>, payload: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json");

    if let Some(signature) = signature {
        builder = builder.header("X-ZTC-Signature", signature);
    }

    builder.body(Body::from(payload.to_string())).unwrap()
}

/// Send one request through the router
#[allow(dead_code)]
pub async fn send(router: Router, request: Request<Body>) -> Response<Body> {
    router.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
