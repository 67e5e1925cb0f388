//! # ZTC Hooks Core
//!
//! Verification and decoding of webhooks ("hooks") fired by ZeroTier Central.
//!
//! This crate contains:
//! - [`signature`]: the `X-ZTC-Signature` header parser, the HMAC-SHA256
//!   signature calculator and the verifier that enforces the replay window
//! - [`hooks`]: the hook-type resolver and the typed hook event documents
//!
//! Verification is stateless. Every call works only on the key, header,
//! payload and tolerance it is given plus a single reading of the clock.
//!
//! ## Usage
//!
//! ```rust
//! use ztc_hooks_core::{verify_hook_signature, get_hook_type, HookType};
//! use std::time::Duration;
//!
//! let psk = "778c6dab5feca625c7831644d18c4d0e4b3a337bff8a1e1c8f938f9cc20e6536";
//! let header = "t=1694033429,v1=04d87956d1953f28ac04d441f139fc655109e9b5c64396fb55dbdf567c735f86";
//! let payload = br#"{"hook_id":"ae76d4c0-c94e-4025-a648-2c504eb90e3c","org_id":"1bb4dc96-f311-4c4a-ac93-551cbc0fa3da","hook_type":"NETWORK_JOIN","network_id":"19d9808567a17ccf","member_id":"a02505e545"}"#;
//!
//! verify_hook_signature(psk, header, payload, Duration::from_secs(65535 * 3600))?;
//! assert_eq!(get_hook_type(payload)?, HookType::NetworkJoin);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

/// High-level error categorization for alerting decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Failures caused by the content of an inbound request
    Security,
    /// Malformed input that will never succeed when resent unchanged
    Permanent,
    /// Local misconfiguration that must be fixed by an operator
    Configuration,
}

// ============================================================================
// Module declarations
// ============================================================================

/// Hook signature parsing, calculation and verification
pub mod signature;

/// Hook type resolution and typed hook documents
pub mod hooks;

// Re-export key types for convenience
pub use hooks::{get_hook_type, HookBase, HookError, HookEvent, HookType};
pub use signature::{
    compute_signature, sign_payload, verify_hook_signature, HookVerifier, PreSharedKey,
    SignatureError, SignedHeader, DEFAULT_TOLERANCE,
};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
