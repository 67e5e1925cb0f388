//! Signature header parsing.

use super::SignatureError;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;

const TIMESTAMP_KEY: &str = "t";
const SIGNATURE_KEY_MARKER: char = 'v';

/// A parsed `X-ZTC-Signature` header.
///
/// Holds the signed timestamp and every candidate signature that decoded
/// as hexadecimal. A successfully parsed header always carries at least one
/// candidate and a timestamp inside the tolerance window it was parsed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeader {
    timestamp: i64,
    signatures: Vec<Vec<u8>>,
}

impl SignedHeader {
    /// Parse a signature header, checking the timestamp against the current time.
    ///
    /// # Arguments
    ///
    /// * `header` - The raw header value, e.g. `t=1694033429,v1=04d8...`
    /// * `tolerance` - Maximum allowed distance between the signed timestamp and now
    ///
    /// # Errors
    ///
    /// - [`SignatureError::MissingSignatureHeader`] if `header` is empty
    /// - [`SignatureError::MalformedHeader`] if a token has no `=` or the
    ///   timestamp is not an integer
    /// - [`SignatureError::TimestampExpired`] if the timestamp is missing or
    ///   outside `tolerance`, whatever signatures were supplied
    /// - [`SignatureError::NoValidSignature`] if no signature decoded as hex
    pub fn parse(header: &str, tolerance: Duration) -> Result<Self, SignatureError> {
        Self::parse_at(header, tolerance, Utc::now())
    }

    /// Parse a signature header against an explicit clock reading.
    ///
    /// Identical to [`SignedHeader::parse`] except that `now` is supplied by
    /// the caller, which makes the replay check reproducible.
    pub fn parse_at(
        header: &str,
        tolerance: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, SignatureError> {
        if header.is_empty() {
            return Err(SignatureError::MissingSignatureHeader);
        }

        let mut timestamp = None;
        let mut signatures = Vec::new();

        for token in header.split(',') {
            let (key, value) =
                token
                    .split_once('=')
                    .ok_or_else(|| SignatureError::MalformedHeader {
                        reason: "token is not a key=value pair".to_string(),
                    })?;

            if key == TIMESTAMP_KEY {
                let parsed =
                    value
                        .parse::<i64>()
                        .map_err(|_| SignatureError::MalformedHeader {
                            reason: "timestamp is not an integer".to_string(),
                        })?;
                timestamp = Some(parsed);
                continue;
            }

            if key.contains(SIGNATURE_KEY_MARKER) {
                // A single undecodable version slot must not discard the others.
                match hex::decode(value) {
                    Ok(signature) => signatures.push(signature),
                    Err(e) => {
                        debug!(version = %key, error = %e, "Skipping signature that is not valid hex")
                    }
                }
            }
        }

        // A header without `t` carries no signing time and can never be fresh.
        let Some(timestamp) = timestamp else {
            return Err(SignatureError::TimestampExpired {
                timestamp: 0,
                skew_seconds: now.timestamp().unsigned_abs(),
            });
        };

        if !within_tolerance(timestamp, tolerance, now) {
            return Err(SignatureError::TimestampExpired {
                timestamp,
                skew_seconds: now.timestamp().abs_diff(timestamp),
            });
        }

        if signatures.is_empty() {
            return Err(SignatureError::NoValidSignature);
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }

    /// Signed timestamp in seconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Candidate signatures in header order
    pub fn signatures(&self) -> &[Vec<u8>] {
        &self.signatures
    }
}

/// `|now - timestamp| <= tolerance`, measured with the sub-second part of `now`.
fn within_tolerance(timestamp: i64, tolerance: Duration, now: DateTime<Utc>) -> bool {
    let Some(signed_at) = DateTime::from_timestamp(timestamp, 0) else {
        return false;
    };

    match (now - signed_at).abs().to_std() {
        Ok(skew) => skew <= tolerance,
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod tests;
