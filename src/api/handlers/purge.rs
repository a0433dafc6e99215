use axum::{body::Bytes, extract::State, http::HeaderMap, response::IntoResponse};
use chrono::Utc;
use tracing::info;

use crate::AppState;
use crate::api::error::AppError;
use crate::services::auth::{self, AuthDecision};
use crate::services::purge;

/// Webhook entry point for `POST /purge-full-cache`.
///
/// The request body is single-read: axum buffers it into `body` exactly
/// once here, and those captured bytes are what the signature is verified
/// against. The payload is opaque HMAC input and is never parsed, so any
/// byte sequence is accepted.
pub async fn purge_full_cache(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let now_millis = Utc::now().timestamp_millis();

    if auth::authorize(&headers, &body, &state.config, now_millis) == AuthDecision::Denied {
        return Err(AppError::InvalidSignature);
    }

    info!("purge trigger authorized");
    let tally = purge::purge_and_clean(state.cdn.as_ref()).await?;

    Ok(format!(
        "Full cache purge initiated successfully. Cleanup result: {tally}"
    ))
}
