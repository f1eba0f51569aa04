// Session token service
// Decision: Use HS256 algorithm for simplicity (symmetric key)
// Decision: Tokens are not stored server-side; validity is signature + expiry only

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, Result};

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Mints and verifies signed session tokens
#[derive(Clone)]
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: StdDuration,
}

impl std::fmt::Debug for SessionTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionTokenService {
    /// Create a token service from a shared secret and token lifetime.
    ///
    /// Fails with [`AuthError::TokenIssuance`] for an empty secret or a
    /// sub-second or out-of-range lifetime.
    pub fn new(secret: &str, ttl: StdDuration) -> Result<Self> {
        if secret.is_empty() {
            return Err(AuthError::token_issuance("signing secret is empty"));
        }
        // Claims carry whole seconds
        if ttl.as_secs() == 0 {
            return Err(AuthError::token_issuance(
                "token lifetime must be at least one second",
            ));
        }
        let lifetime = Duration::from_std(ttl).map_err(AuthError::token_issuance)?;
        // Every issued token must have a representable expiry
        Utc::now()
            .checked_add_signed(lifetime)
            .ok_or_else(|| AuthError::token_issuance("token lifetime is out of range"))?;

        // Only HS256 is accepted; "none" and every other algorithm fail here
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    /// Token lifetime
    pub fn ttl(&self) -> StdDuration {
        self.ttl
    }

    /// Mint a token for a user, valid from now until now + ttl
    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Mint a token as if issued at `issued_at`
    pub fn issue_at(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> Result<String> {
        let lifetime = Duration::from_std(self.ttl).map_err(AuthError::token_issuance)?;
        let exp = issued_at
            .checked_add_signed(lifetime)
            .ok_or_else(|| AuthError::token_issuance("token expiry is out of range"))?;

        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::token_issuance(format!("failed to sign token: {}", e)))
    }

    /// Verify a token and return the user ID it was issued for.
    ///
    /// Every failure (malformed, wrong algorithm, bad signature, expired,
    /// unreadable subject) is [`AuthError::Unauthenticated`].
    pub fn verify(&self, token: &str) -> Result<Uuid> {
        let claims = self.verify_claims(token)?;

        Uuid::parse_str(&claims.sub).map_err(|_| {
            tracing::debug!("Session token subject is not a user ID");
            AuthError::Unauthenticated
        })
    }

    /// Verify a token and return its claims
    pub fn verify_claims(&self, token: &str) -> Result<SessionClaims> {
        if token.is_empty() {
            return Err(AuthError::Unauthenticated);
        }

        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                tracing::debug!("Session token validation failed: {}", e);
                AuthError::Unauthenticated
            },
        )?;

        // Expired once now reaches exp
        if data.claims.exp <= Utc::now().timestamp() {
            tracing::debug!("Session token expired");
            return Err(AuthError::Unauthenticated);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    const SECRET: &str = "test-secret-key-for-testing";

    fn service() -> SessionTokenService {
        SessionTokenService::new(SECRET, StdDuration::from_secs(900)).unwrap()
    }

    fn b64(value: serde_json::Value) -> String {
        URL_SAFE_NO_PAD.encode(value.to_string())
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();
        let user_id = Uuid::now_v7();
        let token = service.issue(user_id).unwrap();

        // Three dot-separated parts
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_claims_window() {
        let service = service();
        let issued_at = Utc::now();
        let token = service.issue_at(Uuid::nil(), issued_at).unwrap();

        let claims = service.verify_claims(&token).unwrap();
        assert_eq!(claims.sub, Uuid::nil().to_string());
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service();
        let token = service
            .issue_at(Uuid::now_v7(), Utc::now() - Duration::seconds(901))
            .unwrap();
        assert!(matches!(
            service.verify(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_token_expiring_now_rejected() {
        let service = service();
        let token = service
            .issue_at(Uuid::now_v7(), Utc::now() - Duration::seconds(900))
            .unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_different_secret_rejected() {
        let other = SessionTokenService::new("another-secret", StdDuration::from_secs(900)).unwrap();
        let token = other.issue(Uuid::now_v7()).unwrap();
        assert!(matches!(
            service().verify(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_alg_none_rejected() {
        let now = Utc::now().timestamp();
        let header = b64(serde_json::json!({"alg": "none", "typ": "JWT"}));
        let payload = b64(serde_json::json!({
            "sub": Uuid::now_v7().to_string(),
            "iat": now,
            "exp": now + 900,
        }));

        for token in [
            format!("{}.{}.", header, payload),
            format!("{}.{}", header, payload),
        ] {
            assert!(matches!(
                service().verify(&token),
                Err(AuthError::Unauthenticated)
            ));
        }
    }

    #[test]
    fn test_other_hmac_algorithm_rejected() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::now_v7().to_string(),
            iat: now,
            exp: now + 900,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let service = service();
        let token = service.issue(Uuid::now_v7()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let now = Utc::now().timestamp();
        let forged = b64(serde_json::json!({
            "sub": Uuid::now_v7().to_string(),
            "iat": now,
            "exp": now + 900,
        }));
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert!(service.verify(&tampered).is_err());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let service = service();
        for token in ["", "invalid-token", "a.b", "a.b.c", "...", "a.b.c.d"] {
            assert!(matches!(
                service.verify(token),
                Err(AuthError::Unauthenticated)
            ));
        }
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "507f1f77bcf86cd799439011".to_string(),
            iat: now,
            exp: now + 900,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let service = service();
        assert!(service.verify_claims(&token).is_ok());
        assert!(matches!(
            service.verify(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_missing_exp_rejected() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "sub": Uuid::now_v7().to_string(), "iat": 0 }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(matches!(
            SessionTokenService::new("", StdDuration::from_secs(60)),
            Err(AuthError::TokenIssuance(_))
        ));
        assert!(matches!(
            SessionTokenService::new(SECRET, StdDuration::ZERO),
            Err(AuthError::TokenIssuance(_))
        ));
        assert!(matches!(
            SessionTokenService::new(SECRET, StdDuration::from_millis(500)),
            Err(AuthError::TokenIssuance(_))
        ));
        assert!(matches!(
            SessionTokenService::new(SECRET, StdDuration::MAX),
            Err(AuthError::TokenIssuance(_))
        ));
        // Fits a chrono duration but not a calendar date
        assert!(matches!(
            SessionTokenService::new(SECRET, StdDuration::from_secs(100_000_000_000 * 86_400)),
            Err(AuthError::TokenIssuance(_))
        ));
    }
}
