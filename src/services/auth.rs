//! Trigger authorization for the purge webhook.
//!
//! Two ways in: the Ghost signature (verified against the shared webhook
//! secret) or the operator-held manual trigger token, which skips signature
//! verification entirely so scheduled and ad-hoc purges keep working while
//! a CMS integration is being debugged.

use axum::http::HeaderMap;
use tracing::debug;

use crate::config::RelayConfig;
use crate::services::signature;
use crate::utils::compare::timing_safe_eq;

pub const SIGNATURE_HEADER: &str = "x-ghost-signature";
pub const MANUAL_TRIGGER_HEADER: &str = "manualtriggertoken";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Allowed,
    Denied,
}

/// Decides whether a purge request may proceed.
///
/// The bypass token is compared in constant time; it gates the same risk
/// class as the signature. An empty configured token never matches, so a
/// deployment that unsets it simply has no bypass.
pub fn authorize(
    headers: &HeaderMap,
    body: &[u8],
    config: &RelayConfig,
    now_millis: i64,
) -> AuthDecision {
    if let Some(token) = headers
        .get(MANUAL_TRIGGER_HEADER)
        .and_then(|v| v.to_str().ok())
        && !config.manual_trigger_token.is_empty()
        && timing_safe_eq(token.as_bytes(), config.manual_trigger_token.as_bytes())
    {
        debug!("manual trigger token accepted, skipping signature check");
        return AuthDecision::Allowed;
    }

    let header = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    if signature::verify(body, header, &config.webhook_secret, now_millis) {
        AuthDecision::Allowed
    } else {
        AuthDecision::Denied
    }
}
