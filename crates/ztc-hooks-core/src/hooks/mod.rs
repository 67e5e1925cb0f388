//! # Hooks Module
//!
//! Resolves the kind of a hook and decodes it into a typed document.
//!
//! Every hook sent by ZeroTier Central is a JSON object carrying a common
//! envelope ([`HookBase`]) and kind-specific fields. The kind is named by the
//! `hook_type` field. Names this crate does not know resolve to
//! [`HookType::Unknown`] rather than failing, so new kinds added upstream do
//! not break existing receivers.
//!
//! Decode hooks only after their signature has been verified.

use crate::ErrorCategory;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

mod events;

pub use events::{
    MemberConfigChanged, MemberDeleted, NetworkConfigChanged, NetworkCreated, NetworkDeleted,
    NetworkMemberAuth, NetworkMemberDeauth, NetworkSsoLogin, NetworkSsoLoginError,
    NewMemberJoined, OrgInviteAccepted, OrgInviteRejected, OrgInviteSent, OrgMemberRemoved,
};

// ============================================================================
// Hook Types
// ============================================================================

/// Kind of event a hook reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HookType {
    NetworkJoin,
    NetworkAuth,
    NetworkDeauth,
    NetworkSsoLogin,
    NetworkSsoLoginError,
    NetworkCreated,
    NetworkConfigChanged,
    NetworkDeleted,
    MemberConfigChanged,
    MemberDeleted,
    OrgInviteSent,
    OrgInviteAccepted,
    OrgInviteRejected,
    OrgMemberRemoved,
    /// Any `hook_type` value not listed above, including a missing one
    #[default]
    Unknown,
}

/// Wire name of every hook type. All conversions go through this table.
const HOOK_TYPE_TABLE: &[(HookType, &str)] = &[
    (HookType::NetworkJoin, "NETWORK_JOIN"),
    (HookType::NetworkAuth, "NETWORK_AUTH"),
    (HookType::NetworkDeauth, "NETWORK_DEAUTH"),
    (HookType::NetworkSsoLogin, "NETWORK_SSO_LOGIN"),
    (HookType::NetworkSsoLoginError, "NETWORK_SSO_LOGIN_ERROR"),
    (HookType::NetworkCreated, "NETWORK_CREATED"),
    (HookType::NetworkConfigChanged, "NETWORK_CONFIG_CHANGED"),
    (HookType::NetworkDeleted, "NETWORK_DELETED"),
    (HookType::MemberConfigChanged, "MEMBER_CONFIG_CHANGED"),
    (HookType::MemberDeleted, "MEMBER_DELETED"),
    (HookType::OrgInviteSent, "ORG_INVITE_SENT"),
    (HookType::OrgInviteAccepted, "ORG_INVITE_ACCEPTED"),
    (HookType::OrgInviteRejected, "ORG_INVITE_REJECTED"),
    (HookType::OrgMemberRemoved, "ORG_MEMBER_REMOVED"),
    (HookType::Unknown, "UNKNOWN"),
];

impl HookType {
    /// Resolve a wire name. Matching is exact; anything unrecognized is [`HookType::Unknown`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ztc_hooks_core::HookType;
    ///
    /// assert_eq!(HookType::from_wire("MEMBER_DELETED"), HookType::MemberDeleted);
    /// assert_eq!(HookType::from_wire("member_deleted"), HookType::Unknown);
    /// ```
    pub fn from_wire(name: &str) -> Self {
        HOOK_TYPE_TABLE
            .iter()
            .find(|(_, wire)| *wire == name)
            .map(|(hook_type, _)| *hook_type)
            .unwrap_or(Self::Unknown)
    }

    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        HOOK_TYPE_TABLE
            .iter()
            .find(|(hook_type, _)| hook_type == self)
            .map(|(_, wire)| *wire)
            .unwrap_or("UNKNOWN")
    }

    /// All known hook types, excluding [`HookType::Unknown`]
    pub fn known() -> impl Iterator<Item = HookType> {
        HOOK_TYPE_TABLE
            .iter()
            .map(|(hook_type, _)| *hook_type)
            .filter(|hook_type| *hook_type != Self::Unknown)
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_wire(s))
    }
}

impl From<String> for HookType {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl From<HookType> for String {
    fn from(value: HookType) -> Self {
        value.as_str().to_string()
    }
}

// ============================================================================
// Hook Envelope
// ============================================================================

/// Fields present in every hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookBase {
    /// Central's identifier of the hook configuration that fired
    pub hook_id: String,
    /// Organization the hook belongs to
    pub org_id: String,
    pub hook_type: HookType,
}

/// Resolve the kind of a hook payload.
///
/// Only the envelope is decoded; kind-specific fields are not inspected.
///
/// # Errors
///
/// Returns [`HookError::InvalidPayload`] if the payload is not a JSON object.
///
/// # Examples
///
/// ```rust
/// use ztc_hooks_core::{get_hook_type, HookType};
///
/// let hook_type = get_hook_type(br#"{"hook_type":"ORG_INVITE_SENT"}"#)?;
/// assert_eq!(hook_type, HookType::OrgInviteSent);
/// # Ok::<(), ztc_hooks_core::HookError>(())
/// ```
pub fn get_hook_type(payload: &[u8]) -> Result<HookType, HookError> {
    let base: HookBase = serde_json::from_slice(payload)?;
    Ok(base.hook_type)
}

// ============================================================================
// Typed Hook Events
// ============================================================================

/// A decoded hook of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum HookEvent {
    NetworkJoin(NewMemberJoined),
    NetworkAuth(NetworkMemberAuth),
    NetworkDeauth(NetworkMemberDeauth),
    NetworkSsoLogin(NetworkSsoLogin),
    NetworkSsoLoginError(NetworkSsoLoginError),
    NetworkCreated(NetworkCreated),
    NetworkConfigChanged(NetworkConfigChanged),
    NetworkDeleted(NetworkDeleted),
    MemberConfigChanged(MemberConfigChanged),
    MemberDeleted(MemberDeleted),
    OrgInviteSent(OrgInviteSent),
    OrgInviteAccepted(OrgInviteAccepted),
    OrgInviteRejected(OrgInviteRejected),
    OrgMemberRemoved(OrgMemberRemoved),
    /// A hook of a kind this crate does not model; the full document is kept
    Unknown {
        base: HookBase,
        payload: serde_json::Value,
    },
}

impl HookEvent {
    /// Decode a hook payload into its typed form.
    ///
    /// The payload is parsed once. The envelope selects the document type and
    /// the remaining fields are decoded from the already parsed tree.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidPayload`] if the payload is not JSON or a
    /// field has the wrong JSON type for its kind.
    pub fn from_payload(payload: &[u8]) -> Result<Self, HookError> {
        let document: serde_json::Value = serde_json::from_slice(payload)?;
        let base = HookBase::deserialize(&document)?;

        let event = match base.hook_type {
            HookType::NetworkJoin => Self::NetworkJoin(serde_json::from_value(document)?),
            HookType::NetworkAuth => Self::NetworkAuth(serde_json::from_value(document)?),
            HookType::NetworkDeauth => Self::NetworkDeauth(serde_json::from_value(document)?),
            HookType::NetworkSsoLogin => Self::NetworkSsoLogin(serde_json::from_value(document)?),
            HookType::NetworkSsoLoginError => {
                Self::NetworkSsoLoginError(serde_json::from_value(document)?)
            }
            HookType::NetworkCreated => Self::NetworkCreated(serde_json::from_value(document)?),
            HookType::NetworkConfigChanged => {
                Self::NetworkConfigChanged(serde_json::from_value(document)?)
            }
            HookType::NetworkDeleted => Self::NetworkDeleted(serde_json::from_value(document)?),
            HookType::MemberConfigChanged => {
                Self::MemberConfigChanged(serde_json::from_value(document)?)
            }
            HookType::MemberDeleted => Self::MemberDeleted(serde_json::from_value(document)?),
            HookType::OrgInviteSent => Self::OrgInviteSent(serde_json::from_value(document)?),
            HookType::OrgInviteAccepted => {
                Self::OrgInviteAccepted(serde_json::from_value(document)?)
            }
            HookType::OrgInviteRejected => {
                Self::OrgInviteRejected(serde_json::from_value(document)?)
            }
            HookType::OrgMemberRemoved => {
                Self::OrgMemberRemoved(serde_json::from_value(document)?)
            }
            HookType::Unknown => Self::Unknown {
                base,
                payload: document,
            },
        };

        Ok(event)
    }

    /// Kind of this hook
    pub fn hook_type(&self) -> HookType {
        self.base().hook_type
    }

    /// Envelope fields shared by every kind
    pub fn base(&self) -> &HookBase {
        match self {
            Self::NetworkJoin(e) => &e.base,
            Self::NetworkAuth(e) => &e.base,
            Self::NetworkDeauth(e) => &e.base,
            Self::NetworkSsoLogin(e) => &e.base,
            Self::NetworkSsoLoginError(e) => &e.base,
            Self::NetworkCreated(e) => &e.base,
            Self::NetworkConfigChanged(e) => &e.base,
            Self::NetworkDeleted(e) => &e.base,
            Self::MemberConfigChanged(e) => &e.base,
            Self::MemberDeleted(e) => &e.base,
            Self::OrgInviteSent(e) => &e.base,
            Self::OrgInviteAccepted(e) => &e.base,
            Self::OrgInviteRejected(e) => &e.base,
            Self::OrgMemberRemoved(e) => &e.base,
            Self::Unknown { base, .. } => base,
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors from decoding hook payloads
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Hook payload is not a valid hook document: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl HookError {
    /// Resending the same payload will always fail the same way
    pub fn is_transient(&self) -> bool {
        false
    }

    /// Get error category for monitoring
    pub fn error_category(&self) -> ErrorCategory {
        ErrorCategory::Permanent
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
