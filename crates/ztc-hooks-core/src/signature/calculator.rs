//! Expected-signature calculation.
//!
//! The signing input is `<decimal timestamp>,<raw payload>` keyed with the
//! decoded pre-shared key. The payload is used exactly as received; any
//! re-encoding would change the digest.

use super::SignatureError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha256 = Hmac<Sha256>;

/// Version tag written by [`sign_payload`]
pub const SIGNATURE_VERSION: &str = "v1";

/// Pre-shared key used to sign and verify hooks.
///
/// The key is configured as hexadecimal text and held here as raw bytes.
/// The bytes are zeroed when the key is dropped and are never printed.
///
/// # Examples
///
/// ```rust
/// use ztc_hooks_core::signature::PreSharedKey;
///
/// let key = PreSharedKey::from_hex("778c6dab5feca625c7831644d18c4d0e4b3a337bff8a1e1c8f938f9cc20e6536")?;
/// assert_eq!(format!("{:?}", key), "PreSharedKey { bytes: \"<REDACTED>\" }");
/// # Ok::<(), ztc_hooks_core::signature::SignatureError>(())
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PreSharedKey {
    bytes: Vec<u8>,
}

impl PreSharedKey {
    /// Decode a key from its hexadecimal representation.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::InvalidPreSharedKey`] if `text` is not valid hex.
    pub fn from_hex(text: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(text).map_err(|_| SignatureError::InvalidPreSharedKey)?;
        Ok(Self { bytes })
    }

    /// Compute the raw HMAC-SHA256 digest for `payload` signed at `timestamp`.
    pub fn signature(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, SignatureError> {
        let mut mac = HmacSha256::new_from_slice(&self.bytes)
            .map_err(|_| SignatureError::InvalidPreSharedKey)?;

        mac.update(timestamp.to_string().as_bytes());
        mac.update(b",");
        mac.update(payload);

        Ok(mac.finalize().into_bytes().to_vec())
    }
}

// Security: Don't expose key material in debug output
impl std::fmt::Debug for PreSharedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreSharedKey")
            .field("bytes", &"<REDACTED>")
            .finish()
    }
}

/// Compute the expected signature for a hook.
///
/// # Arguments
///
/// * `timestamp` - The timestamp taken from the signature header
/// * `pre_shared_key` - The organization's pre-shared key, hex encoded
/// * `payload` - The raw request body
///
/// # Returns
///
/// The raw (not hex encoded) HMAC-SHA256 digest.
///
/// # Errors
///
/// Returns [`SignatureError::InvalidPreSharedKey`] if the key is not valid hex.
pub fn compute_signature(
    timestamp: i64,
    pre_shared_key: &str,
    payload: &[u8],
) -> Result<Vec<u8>, SignatureError> {
    PreSharedKey::from_hex(pre_shared_key)?.signature(timestamp, payload)
}

/// Build a complete signature header for `payload`.
///
/// Produces `t=<timestamp>,v1=<hex digest>`, the same form ZeroTier Central
/// sends, so test fixtures and sending tools stay byte-compatible with
/// real traffic.
pub fn sign_payload(
    key: &PreSharedKey,
    timestamp: i64,
    payload: &[u8],
) -> Result<String, SignatureError> {
    let signature = key.signature(timestamp, payload)?;
    Ok(format!(
        "t={},{}={}",
        timestamp,
        SIGNATURE_VERSION,
        hex::encode(signature)
    ))
}

#[cfg(test)]
#[path = "calculator_tests.rs"]
mod tests;
