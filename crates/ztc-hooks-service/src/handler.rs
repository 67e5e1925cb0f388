//! Hook handlers
//!
//! A [`HookHandler`] receives every hook that passed signature verification
//! and decoded into a known [`HookEvent`]. The service ships with
//! [`LoggingHookHandler`]; embedders supply their own implementation to act
//! on hooks.

use crate::HookHandlerError;
use async_trait::async_trait;
use tracing::info;
use ztc_hooks_core::HookEvent;

/// Interface for acting on verified hooks
#[async_trait]
pub trait HookHandler: Send + Sync {
    /// Handle one verified hook.
    ///
    /// # Errors
    ///
    /// Return [`HookHandlerError::HandlerFailed`] when the hook could not be
    /// processed. The caller answers with a generic `500` and logs the message.
    async fn handle(&self, event: HookEvent) -> Result<(), HookHandlerError>;
}

/// Handler that records each hook in the log and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHookHandler;

#[async_trait]
impl HookHandler for LoggingHookHandler {
    async fn handle(&self, event: HookEvent) -> Result<(), HookHandlerError> {
        let base = event.base();

        match &event {
            HookEvent::NetworkJoin(e) => info!(
                hook_id = %base.hook_id,
                org_id = %base.org_id,
                network_id = %e.network_id,
                member_id = %e.member_id,
                "New member joined network"
            ),
            HookEvent::NetworkAuth(e) => info!(
                hook_id = %base.hook_id,
                network_id = %e.network_id,
                member_id = %e.member_id,
                user_id = %e.user_id,
                "Member authorized"
            ),
            HookEvent::NetworkDeauth(e) => info!(
                hook_id = %base.hook_id,
                network_id = %e.network_id,
                member_id = %e.member_id,
                user_id = %e.user_id,
                "Member deauthorized"
            ),
            HookEvent::NetworkSsoLogin(e) => info!(
                hook_id = %base.hook_id,
                network_id = %e.network_id,
                member_id = %e.member_id,
                "SSO login"
            ),
            HookEvent::NetworkSsoLoginError(e) => info!(
                hook_id = %base.hook_id,
                network_id = %e.network_id,
                member_id = %e.member_id,
                error = %e.error,
                "SSO login failed"
            ),
            HookEvent::NetworkCreated(e) => info!(
                hook_id = %base.hook_id,
                network_id = %e.network_id,
                user_id = %e.user_id,
                "Network created"
            ),
            HookEvent::NetworkConfigChanged(e) => info!(
                hook_id = %base.hook_id,
                network_id = %e.network_id,
                user_id = %e.user_id,
                "Network configuration changed"
            ),
            HookEvent::NetworkDeleted(e) => info!(
                hook_id = %base.hook_id,
                network_id = %e.network_id,
                user_id = %e.user_id,
                "Network deleted"
            ),
            HookEvent::MemberConfigChanged(e) => info!(
                hook_id = %base.hook_id,
                network_id = %e.network_id,
                member_id = %e.member_id,
                user_id = %e.user_id,
                "Member configuration changed"
            ),
            HookEvent::MemberDeleted(e) => info!(
                hook_id = %base.hook_id,
                network_id = %e.network_id,
                member_id = %e.member_id,
                user_id = %e.user_id,
                "Member deleted"
            ),
            HookEvent::OrgInviteSent(e) => info!(
                hook_id = %base.hook_id,
                org_id = %base.org_id,
                user_id = %e.user_id,
                "Organization invite sent"
            ),
            HookEvent::OrgInviteAccepted(e) => info!(
                hook_id = %base.hook_id,
                org_id = %base.org_id,
                user_id = %e.user_id,
                networks = e.network_ids.len(),
                "Organization invite accepted"
            ),
            HookEvent::OrgInviteRejected(e) => info!(
                hook_id = %base.hook_id,
                org_id = %base.org_id,
                user_id = %e.user_id,
                "Organization invite rejected"
            ),
            HookEvent::OrgMemberRemoved(e) => info!(
                hook_id = %base.hook_id,
                org_id = %base.org_id,
                user_id = %e.user_id,
                "Organization member removed"
            ),
            HookEvent::Unknown { .. } => info!(
                hook_id = %base.hook_id,
                org_id = %base.org_id,
                "Hook of unknown type"
            ),
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
