//! Tests for the per-kind hook documents.

use super::*;
use crate::HookType;
use serde_json::json;

#[test]
fn test_envelope_is_flattened() {
    let joined: NewMemberJoined = serde_json::from_value(json!({
        "hook_id": "h",
        "org_id": "o",
        "hook_type": "NETWORK_JOIN",
        "network_id": "n",
        "member_id": "m"
    }))
    .unwrap();

    assert_eq!(joined.base.hook_id, "h");
    assert_eq!(joined.base.org_id, "o");
    assert_eq!(joined.base.hook_type, HookType::NetworkJoin);
    assert_eq!(joined.network_id, "n");
    assert_eq!(joined.member_id, "m");
}

#[test]
fn test_serialized_document_is_flat() {
    let removed = OrgMemberRemoved {
        base: HookBase {
            hook_id: "h".to_string(),
            org_id: "o".to_string(),
            hook_type: HookType::OrgMemberRemoved,
        },
        user_id: "u".to_string(),
        user_email: "u@example.com".to_string(),
    };

    assert_eq!(
        serde_json::to_value(&removed).unwrap(),
        json!({
            "hook_id": "h",
            "org_id": "o",
            "hook_type": "ORG_MEMBER_REMOVED",
            "user_id": "u",
            "user_email": "u@example.com"
        })
    );
}

#[test]
fn test_unknown_fields_are_ignored() {
    let rejected: OrgInviteRejected = serde_json::from_value(json!({
        "hook_type": "ORG_INVITE_REJECTED",
        "user_id": "u",
        "reason": "not interested"
    }))
    .unwrap();

    assert_eq!(rejected.user_id, "u");
    assert_eq!(rejected.user_email, "");
}

#[test]
fn test_invite_accepted_network_ids() {
    let accepted: OrgInviteAccepted = serde_json::from_value(json!({
        "hook_type": "ORG_INVITE_ACCEPTED",
        "user_id": "u",
        "user_email": "u@example.com",
        "network_ids": ["19d9808567a2c324", "19d9808567057972"]
    }))
    .unwrap();

    assert_eq!(
        accepted.network_ids,
        vec!["19d9808567a2c324".to_string(), "19d9808567057972".to_string()]
    );
}

#[test]
fn test_absent_config_is_null() {
    let deleted: MemberDeleted = serde_json::from_value(json!({
        "hook_type": "MEMBER_DELETED",
        "network_id": "n",
        "member_id": "m"
    }))
    .unwrap();

    assert!(deleted.old_config.is_null());
}

#[test]
fn test_sso_login_error_message() {
    let failed: NetworkSsoLoginError = serde_json::from_value(json!({
        "hook_type": "NETWORK_SSO_LOGIN_ERROR",
        "network_id": "n",
        "member_id": "m",
        "sso_user_email": "user@example.com",
        "error": "token expired"
    }))
    .unwrap();

    assert_eq!(failed.sso_user_email, "user@example.com");
    assert_eq!(failed.error, "token expired");
}
