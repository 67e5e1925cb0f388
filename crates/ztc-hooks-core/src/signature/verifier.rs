//! Hook signature verification.

use super::{compute_signature, PreSharedKey, SignatureError, SignedHeader};
use chrono::{DateTime, Utc};
use std::time::Duration;
use subtle::{Choice, ConstantTimeEq};
use tracing::debug;

/// Verify a hook signature.
///
/// An empty `header` skips verification and succeeds: callers that require
/// every hook to be signed must reject empty headers before calling this, or
/// use [`HookVerifier::require_signature`].
///
/// # Arguments
///
/// * `pre_shared_key` - The organization's pre-shared key, hex encoded
/// * `header` - The value of the `X-ZTC-Signature` header
/// * `payload` - The raw request body
/// * `tolerance` - Maximum allowed distance between the signed timestamp and now
///
/// # Errors
///
/// Any failure of the header parser or the signature calculator is returned
/// unchanged; [`SignatureError::SignatureMismatch`] if no candidate matches.
pub fn verify_hook_signature(
    pre_shared_key: &str,
    header: &str,
    payload: &[u8],
    tolerance: Duration,
) -> Result<(), SignatureError> {
    if header.is_empty() {
        debug!("Signature header is empty; verification skipped");
        return Ok(());
    }

    let signed = SignedHeader::parse(header, tolerance)?;
    let expected = compute_signature(signed.timestamp(), pre_shared_key, payload)?;

    match_any(&signed, &expected)
}

/// Compare every candidate in constant time, without stopping at the first hit.
fn match_any(header: &SignedHeader, expected: &[u8]) -> Result<(), SignatureError> {
    let matched = header
        .signatures()
        .iter()
        .fold(Choice::from(0), |acc, candidate| {
            acc | candidate.as_slice().ct_eq(expected)
        });

    if bool::from(matched) {
        Ok(())
    } else {
        Err(SignatureError::SignatureMismatch)
    }
}

/// Reusable verifier bound to one pre-shared key and one replay window.
///
/// Built once from configuration and shared between request handlers. It
/// holds no mutable state, so concurrent calls need no locking.
///
/// # Examples
///
/// ```rust
/// use ztc_hooks_core::signature::{HookVerifier, PreSharedKey, SignatureError, DEFAULT_TOLERANCE};
///
/// let key = PreSharedKey::from_hex("00112233")?;
/// let verifier = HookVerifier::new(key, DEFAULT_TOLERANCE).require_signature(true);
///
/// assert_eq!(
///     verifier.verify(None, b"{}"),
///     Err(SignatureError::MissingSignatureHeader)
/// );
/// # Ok::<(), SignatureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HookVerifier {
    key: PreSharedKey,
    tolerance: Duration,
    require_signature: bool,
}

impl HookVerifier {
    /// Create a verifier that skips unsigned hooks.
    pub fn new(key: PreSharedKey, tolerance: Duration) -> Self {
        Self {
            key,
            tolerance,
            require_signature: false,
        }
    }

    /// Reject hooks without a signature header instead of skipping verification.
    pub fn require_signature(mut self, required: bool) -> Self {
        self.require_signature = required;
        self
    }

    /// Replay window this verifier enforces
    pub fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// Whether unsigned hooks are rejected
    pub fn requires_signature(&self) -> bool {
        self.require_signature
    }

    /// Verify a hook against the current time.
    ///
    /// # Errors
    ///
    /// [`SignatureError::MissingSignatureHeader`] when the header is absent or
    /// empty and signatures are required, otherwise the same failures as
    /// [`verify_hook_signature`].
    pub fn verify(&self, header: Option<&str>, payload: &[u8]) -> Result<(), SignatureError> {
        self.verify_at(header, payload, Utc::now())
    }

    /// Verify a hook against an explicit clock reading.
    pub fn verify_at(
        &self,
        header: Option<&str>,
        payload: &[u8],
        now: DateTime<Utc>,
    ) -> Result<(), SignatureError> {
        let header = header.unwrap_or_default();
        if header.is_empty() {
            if self.require_signature {
                return Err(SignatureError::MissingSignatureHeader);
            }

            debug!("Signature header is empty; verification skipped");
            return Ok(());
        }

        let signed = SignedHeader::parse_at(header, self.tolerance, now)?;
        let expected = self.key.signature(signed.timestamp(), payload)?;

        match_any(&signed, &expected)
    }
}

#[cfg(test)]
#[path = "verifier_tests.rs"]
mod tests;
