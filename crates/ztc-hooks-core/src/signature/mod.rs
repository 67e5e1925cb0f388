//! # Hook Signature Module
//!
//! Authenticates hooks delivered by ZeroTier Central with the pre-shared key
//! configured for the organization.
//!
//! The signature header carries a timestamp and one or more hex-encoded
//! HMAC-SHA256 digests:
//!
//! ```text
//! t=1694033429,v1=04d87956d1953f28ac04d441f139fc655109e9b5c64396fb55dbdf567c735f86
//! ```
//!
//! The signed message is the decimal timestamp, a single comma, then the raw
//! request body. Several `v{N}` tokens may be present while keys are rotated;
//! the hook is authentic when any one of them matches.
//!
//! # Components
//!
//! - [`SignedHeader`] - parses the header and enforces the replay window
//! - [`PreSharedKey`] / [`compute_signature`] - derive the expected digest
//! - [`verify_hook_signature`] / [`HookVerifier`] - combine both
//!
//! # Examples
//!
//! ```rust
//! use ztc_hooks_core::signature::{sign_payload, verify_hook_signature, PreSharedKey, DEFAULT_TOLERANCE};
//!
//! let psk = "778c6dab5feca625c7831644d18c4d0e4b3a337bff8a1e1c8f938f9cc20e6536";
//! let payload = br#"{"hook_type":"NETWORK_JOIN"}"#;
//!
//! let key = PreSharedKey::from_hex(psk)?;
//! let header = sign_payload(&key, chrono::Utc::now().timestamp(), payload)?;
//!
//! verify_hook_signature(psk, &header, payload, DEFAULT_TOLERANCE)?;
//! # Ok::<(), ztc_hooks_core::signature::SignatureError>(())
//! ```

use crate::ErrorCategory;
use std::time::Duration;

mod calculator;
mod header;
mod verifier;

pub use calculator::{compute_signature, sign_payload, PreSharedKey, SIGNATURE_VERSION};
pub use header::SignedHeader;
pub use verifier::{verify_hook_signature, HookVerifier};

/// Name of the HTTP header carrying the hook signature
pub const SIGNATURE_HEADER: &str = "X-ZTC-Signature";

/// Replay window callers can opt into when they have no stricter requirement
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(5 * 60);

// ============================================================================
// Error Types
// ============================================================================

/// Reasons a hook can fail signature verification.
///
/// Every variant is terminal for the request it was produced for. HTTP
/// facing callers must answer all of them identically so the response does
/// not reveal which check failed; the variant is for server-side diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// The signature header is empty but the caller requires authentication.
    #[error("Hook has no signature header")]
    MissingSignatureHeader,

    /// A header token is not a `key=value` pair or the timestamp is unusable.
    #[error("Hook has a malformed signature header: {reason}")]
    MalformedHeader { reason: String },

    /// No signature token survived hex decoding.
    #[error("Hook has no valid signature")]
    NoValidSignature,

    /// The signed timestamp is missing or further from the current time than allowed.
    #[error("Hook timestamp {timestamp} is outside the tolerance window (skew {skew_seconds}s)")]
    TimestampExpired { timestamp: i64, skew_seconds: u64 },

    /// The configured pre-shared key is not valid hexadecimal.
    #[error("Invalid pre-shared key")]
    InvalidPreSharedKey,

    /// None of the supplied signatures matches the computed digest.
    #[error("Hook signature does not match")]
    SignatureMismatch,
}

impl SignatureError {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingSignatureHeader => "missing_signature_header",
            Self::MalformedHeader { .. } => "malformed_header",
            Self::NoValidSignature => "no_valid_signature",
            Self::TimestampExpired { .. } => "timestamp_expired",
            Self::InvalidPreSharedKey => "invalid_pre_shared_key",
            Self::SignatureMismatch => "signature_mismatch",
        }
    }

    /// Verification failures never succeed on retry
    pub fn is_transient(&self) -> bool {
        false
    }

    /// Get error category for monitoring
    pub fn error_category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPreSharedKey => ErrorCategory::Configuration,
            Self::MissingSignatureHeader
            | Self::MalformedHeader { .. }
            | Self::NoValidSignature
            | Self::TimestampExpired { .. }
            | Self::SignatureMismatch => ErrorCategory::Security,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
