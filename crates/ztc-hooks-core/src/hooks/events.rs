//! Typed hook documents, one per hook kind.
//!
//! Every document flattens [`HookBase`] so the envelope and kind-specific
//! fields sit at the same JSON level, as Central sends them. Absent fields
//! decode to empty values and unrecognized fields are ignored. Configuration
//! snapshots are kept as untyped JSON because their schema belongs to
//! Central and changes independently of this crate.

use super::HookBase;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `NETWORK_JOIN`: a member the controller has not seen before asked to join a network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewMemberJoined {
    #[serde(flatten)]
    pub base: HookBase,
    pub network_id: String,
    pub member_id: String,
}

/// `NETWORK_AUTH`: a member was authorized on a network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkMemberAuth {
    #[serde(flatten)]
    pub base: HookBase,
    pub network_id: String,
    pub member_id: String,
    /// User that performed the authorization
    pub user_id: String,
    pub user_email: String,
}

/// `NETWORK_DEAUTH`: a member was deauthorized from a network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkMemberDeauth {
    #[serde(flatten)]
    pub base: HookBase,
    pub network_id: String,
    pub member_id: String,
    /// User that performed the deauthorization
    pub user_id: String,
    pub user_email: String,
}

/// `NETWORK_SSO_LOGIN`: a user logged into a network through its OIDC provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSsoLogin {
    #[serde(flatten)]
    pub base: HookBase,
    pub network_id: String,
    pub member_id: String,
    pub sso_user_email: String,
}

/// `NETWORK_SSO_LOGIN_ERROR`: an SSO login attempt failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSsoLoginError {
    #[serde(flatten)]
    pub base: HookBase,
    pub network_id: String,
    pub member_id: String,
    pub sso_user_email: String,
    /// Description of the failure as reported by Central
    pub error: String,
}

/// `NETWORK_CREATED`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkCreated {
    #[serde(flatten)]
    pub base: HookBase,
    pub network_id: String,
    /// Initial configuration of the new network
    pub network_config: Value,
    pub user_id: String,
    pub user_email: String,
}

/// `NETWORK_CONFIG_CHANGED`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfigChanged {
    #[serde(flatten)]
    pub base: HookBase,
    pub network_id: String,
    pub user_id: String,
    pub user_email: String,
    pub old_config: Value,
    pub new_config: Value,
}

/// `NETWORK_DELETED`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDeleted {
    #[serde(flatten)]
    pub base: HookBase,
    pub network_id: String,
    /// Configuration of the network at the time it was deleted
    pub old_config: Value,
    pub user_id: String,
    pub user_email: String,
}

/// `MEMBER_CONFIG_CHANGED`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberConfigChanged {
    #[serde(flatten)]
    pub base: HookBase,
    pub network_id: String,
    pub member_id: String,
    pub old_config: Value,
    pub new_config: Value,
    pub user_id: String,
    pub user_email: String,
}

/// `MEMBER_DELETED`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberDeleted {
    #[serde(flatten)]
    pub base: HookBase,
    pub network_id: String,
    pub member_id: String,
    pub old_config: Value,
    pub user_id: String,
    pub user_email: String,
}

/// `ORG_INVITE_SENT`: someone was invited to the organization.
///
/// Only the organization owner can invite, so the inviter is not reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgInviteSent {
    #[serde(flatten)]
    pub base: HookBase,
    pub user_id: String,
    pub invitee_email: String,
}

/// `ORG_INVITE_ACCEPTED`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgInviteAccepted {
    #[serde(flatten)]
    pub base: HookBase,
    pub user_id: String,
    pub user_email: String,
    pub network_ids: Vec<String>,
}

/// `ORG_INVITE_REJECTED`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgInviteRejected {
    #[serde(flatten)]
    pub base: HookBase,
    pub user_id: String,
    pub user_email: String,
}

/// `ORG_MEMBER_REMOVED`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgMemberRemoved {
    #[serde(flatten)]
    pub base: HookBase,
    pub user_id: String,
    pub user_email: String,
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
