// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JWT inspection — read the expiry claim without verifying the signature.
//
// The client never trusts these claims for authorisation; it only uses `exp`
// to decide whether a stored session is worth restoring and whether a 401
// should trigger a refresh.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, TimeZone, Utc};
use pandi_core::error::{PandiError, Result};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Claims the client cares about.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Expiry as seconds since the Unix epoch. Tokens without it never expire.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at, seconds since the Unix epoch.
    #[serde(default)]
    pub iat: Option<i64>,
    /// Subject / user id, under whichever name the backend uses.
    #[serde(default, alias = "sub", alias = "userId")]
    pub id: Option<String>,
}

impl TokenClaims {
    /// Decode the payload segment of `token`.
    pub fn decode(token: &str) -> Result<Self> {
        let mut segments = token.trim().split('.');
        let payload = match (segments.next(), segments.next()) {
            (Some(_header), Some(payload)) if !payload.is_empty() => payload,
            _ => return Err(PandiError::InvalidToken("expected header.payload.signature".into())),
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| PandiError::InvalidToken(format!("payload is not base64url: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| PandiError::InvalidToken(format!("payload is not JSON claims: {e}")))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// A token is usable until its `exp`; one without `exp` always is.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            None => true,
            Some(exp) => exp > now.timestamp(),
        }
    }

    /// Expired, or expiring within `buffer` of `now`.
    pub fn needs_refresh_at(&self, now: DateTime<Utc>, buffer: Duration) -> bool {
        match self.exp {
            None => false,
            Some(exp) => exp <= (now + buffer).timestamp(),
        }
    }
}

/// Short, non-reversible tag for a token, safe to put in logs.
pub fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(&digest[..6])
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an unsigned JWT carrying `claims`.
    pub(crate) fn jwt(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    #[test]
    fn decodes_expiry_and_subject() {
        let claims = TokenClaims::decode(&jwt(serde_json::json!({
            "sub": "u1", "exp": 2_000, "iat": 1_000
        })))
        .expect("decode");
        assert_eq!(claims.exp, Some(2_000));
        assert_eq!(claims.id.as_deref(), Some("u1"));
        assert_eq!(claims.expires_at(), Some(at(2_000)));
    }

    #[test]
    fn token_without_exp_is_always_valid() {
        let claims = TokenClaims::decode(&jwt(serde_json::json!({ "id": "u1" }))).expect("decode");
        assert!(claims.is_valid_at(at(i64::from(i32::MAX))));
        assert!(!claims.needs_refresh_at(at(0), Duration::seconds(300)));
    }

    #[test]
    fn expiry_is_exclusive() {
        let claims = TokenClaims {
            exp: Some(1_000),
            ..Default::default()
        };
        assert!(claims.is_valid_at(at(999)));
        assert!(!claims.is_valid_at(at(1_000)));
    }

    #[test]
    fn refresh_window_is_five_minutes_before_expiry() {
        let claims = TokenClaims {
            exp: Some(10_000),
            ..Default::default()
        };
        let buffer = Duration::seconds(300);
        assert!(!claims.needs_refresh_at(at(9_699), buffer));
        assert!(claims.needs_refresh_at(at(9_700), buffer));
        assert!(claims.needs_refresh_at(at(20_000), buffer));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for bad in ["", "no-dots", "a..c", "a.!!!.c", "a.bm90IGpzb24.c"] {
            assert!(
                matches!(TokenClaims::decode(bad), Err(PandiError::InvalidToken(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn fingerprint_is_stable_and_short() {
        assert_eq!(fingerprint("abc"), fingerprint("abc"));
        assert_ne!(fingerprint("abc"), fingerprint("abd"));
        assert_eq!(fingerprint("abc").len(), 12);
    }
}
