//! Ghost webhook signature verification.
//!
//! Ghost signs each webhook delivery with HMAC-SHA256 over the raw request
//! body concatenated with a millisecond timestamp, and sends the result in
//! the `X-Ghost-Signature` header as `sha256=<hex>, t=<millis>`. The
//! timestamp doubles as a replay guard: signatures older (or newer) than
//! five minutes are rejected even when the hash matches.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::utils::compare::timing_safe_eq;

type HmacSha256 = Hmac<Sha256>;

/// Tolerated skew between the signed timestamp and server time.
pub const REPLAY_WINDOW_MS: i64 = 5 * 60 * 1000;

/// Parsed `X-Ghost-Signature` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureToken {
    pub hash: String,
    pub timestamp_millis: i64,
}

impl SignatureToken {
    /// Parses `sha256=<hex>, t=<millis>`. Both parts must be present and
    /// well-formed; anything else is `None`.
    pub fn parse(header: &str) -> Option<Self> {
        let mut parts = header.split(',');
        let hash_part = parts.next()?.trim();
        let time_part = parts.next()?.trim();
        if parts.next().is_some() {
            return None;
        }

        let hash = hash_part.strip_prefix("sha256=")?;
        if hash.is_empty() {
            return None;
        }
        let timestamp_millis = time_part.strip_prefix("t=")?.parse::<i64>().ok()?;

        Some(Self {
            hash: hash.to_string(),
            timestamp_millis,
        })
    }
}

/// Computes the expected signature hex for a body and timestamp.
///
/// The signed message is the raw body bytes followed by the decimal
/// timestamp string. Useful for crafting valid headers in tests or from an
/// operator script.
pub fn sign(body: &[u8], secret: &str, timestamp_millis: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    mac.update(timestamp_millis.to_string().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a webhook signature header against the raw body.
///
/// Fails closed: a missing header, a malformed header, a timestamp outside
/// the replay window, or an empty secret all return `false`. Never panics
/// and never surfaces an error past this boundary.
pub fn verify(body: &[u8], header: Option<&str>, secret: &str, now_millis: i64) -> bool {
    if secret.is_empty() {
        return false;
    }

    let Some(token) = header.and_then(SignatureToken::parse) else {
        return false;
    };

    if now_millis.abs_diff(token.timestamp_millis) > REPLAY_WINDOW_MS as u64 {
        return false;
    }

    let expected = sign(body, secret, token.timestamp_millis);
    timing_safe_eq(token.hash.as_bytes(), expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_webhook_secret";
    const NOW: i64 = 1_700_000_000_000;

    fn valid_header(body: &[u8], timestamp: i64) -> String {
        format!("sha256={}, t={}", sign(body, SECRET, timestamp), timestamp)
    }

    #[test]
    fn verify_accepts_valid_signature() {
        let body = b"post.published payload";
        let header = valid_header(body, NOW);
        assert!(verify(body, Some(&header), SECRET, NOW));
    }

    #[test]
    fn verify_rejects_missing_header() {
        assert!(!verify(b"body", None, SECRET, NOW));
    }

    #[test]
    fn verify_rejects_malformed_header() {
        for header in [
            "",
            "sha256=abc123",
            "t=12345",
            "md5=abc, t=12345",
            "sha256=abc, t=notanumber",
            "sha256=, t=12345",
            "sha256=abc, t=1, extra=2",
        ] {
            assert!(!verify(b"body", Some(header), SECRET, NOW), "{header:?}");
        }
    }

    #[test]
    fn verify_rejects_stale_timestamp() {
        let body = b"body";
        let stale = NOW - REPLAY_WINDOW_MS - 1;
        // Hash is correct for the stale timestamp, window still rejects it.
        let header = valid_header(body, stale);
        assert!(!verify(body, Some(&header), SECRET, NOW));
    }

    #[test]
    fn verify_rejects_future_timestamp() {
        let body = b"body";
        let future = NOW + REPLAY_WINDOW_MS + 1;
        let header = valid_header(body, future);
        assert!(!verify(body, Some(&header), SECRET, NOW));
    }

    #[test]
    fn verify_accepts_edge_of_window() {
        let body = b"body";
        let edge = NOW - REPLAY_WINDOW_MS;
        let header = valid_header(body, edge);
        assert!(verify(body, Some(&header), SECRET, NOW));
    }

    #[test]
    fn verify_rejects_extreme_timestamps_without_panicking() {
        // i64 extremes are valid header timestamps; the window arithmetic
        // must reject them, not overflow.
        for extreme in [i64::MIN, i64::MAX] {
            let header = format!("sha256={}, t={}", "0".repeat(64), extreme);
            assert!(!verify(b"body", Some(&header), SECRET, NOW));
            let signed = valid_header(b"body", extreme);
            assert!(!verify(b"body", Some(&signed), SECRET, NOW));
        }
    }

    #[test]
    fn verify_rejects_empty_secret() {
        let body = b"body";
        let header = format!("sha256={}, t={}", sign(body, "", NOW), NOW);
        assert!(!verify(body, Some(&header), "", NOW));
    }

    #[test]
    fn verify_rejects_wrong_hash() {
        let body = b"body";
        let header = format!("sha256={}, t={}", "0".repeat(64), NOW);
        assert!(!verify(body, Some(&header), SECRET, NOW));
    }

    #[test]
    fn sign_is_deterministic() {
        let a = sign(b"body", SECRET, NOW);
        let b = sign(b"body", SECRET, NOW);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64); // SHA256 hex is 64 chars
    }

    #[test]
    fn sign_changes_with_any_input() {
        let base = sign(b"body", SECRET, NOW);
        assert_ne!(base, sign(b"other body", SECRET, NOW));
        assert_ne!(base, sign(b"body", "other_secret", NOW));
        assert_ne!(base, sign(b"body", SECRET, NOW + 1));
    }

    #[test]
    fn parse_round_trip() {
        let token = SignatureToken::parse("sha256=abc123, t=1700000000000").unwrap();
        assert_eq!(token.hash, "abc123");
        assert_eq!(token.timestamp_millis, 1_700_000_000_000);
    }

    #[test]
    fn parse_tolerates_missing_space() {
        let token = SignatureToken::parse("sha256=abc123,t=42").unwrap();
        assert_eq!(token.timestamp_millis, 42);
    }
}
