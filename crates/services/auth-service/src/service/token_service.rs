//! Session tokens: signing, verification and rotation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{ObjectId, Role, SECONDS_PER_MINUTE, TOKEN_TYPE_BEARER};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id (hex ObjectId) for every role
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique per issued token
    pub jti: Uuid,
}

impl Claims {
    pub fn role(&self) -> Role {
        Role::from(self.role.as_str())
    }

    /// A subject that is not an ObjectId cannot name any principal.
    pub fn subject(&self) -> AppResult<ObjectId> {
        ObjectId::parse_str(&self.sub).map_err(|_| AppError::Unauthorized)
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
}

/// HS256 signer and verifier with a fixed session lifetime.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_minutes,
        }
    }

    pub fn ttl_minutes(&self) -> i64 {
        self.ttl_minutes
    }

    pub fn issue(&self, subject: ObjectId, role: Role) -> AppResult<TokenResponse> {
        self.issue_at(subject, role, Utc::now())
    }

    /// Sign a token whose lifetime starts at `now`.
    pub fn issue_at(
        &self,
        subject: ObjectId,
        role: Role,
        now: DateTime<Utc>,
    ) -> AppResult<TokenResponse> {
        let expires_at = now + Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            sub: subject.to_hex(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.ttl_minutes * SECONDS_PER_MINUTE,
        })
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_err;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_issue_then_verify_keeps_subject_and_role() {
        let issuer = TokenIssuer::new(SECRET, 60);
        let id = ObjectId::new();

        let token = issuer.issue(id, Role::Company).unwrap();
        let claims = issuer.verify(&token.access_token).unwrap();

        assert_eq!(claims.subject().unwrap(), id);
        assert_eq!(claims.role(), Role::Company);
        assert_eq!(claims.role, "empresa");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(token.expires_in, 3600);
        assert_eq!(token.token_type, "Bearer");
    }

    #[test]
    fn test_every_token_is_unique() {
        let issuer = TokenIssuer::new(SECRET, 60);
        let id = ObjectId::new();
        let now = Utc::now();

        let first = issuer.issue_at(id, Role::User, now).unwrap();
        let second = issuer.issue_at(id, Role::User, now).unwrap();

        assert_ne!(first.access_token, second.access_token);
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = TokenIssuer::new(SECRET, 60);
        let token = issuer
            .issue_at(ObjectId::new(), Role::User, Utc::now() - Duration::hours(3))
            .unwrap();

        let err = issuer.verify(&token.access_token).unwrap_err();
        assert_eq!(err.status().as_u16(), 401);
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let issuer = TokenIssuer::new(SECRET, 60);
        let other = TokenIssuer::new(b"another-secret-another-secret-123", 60);
        let token = other.issue(ObjectId::new(), Role::Admin).unwrap();

        assert_err!(issuer.verify(&token.access_token));
        assert_err!(issuer.verify("not-a-jwt"));
    }

    #[test]
    fn test_malformed_subject_is_unauthorized() {
        let claims = Claims {
            sub: "12345".to_string(),
            role: "user".to_string(),
            iat: 0,
            exp: 0,
            jti: Uuid::new_v4(),
        };
        assert!(matches!(claims.subject(), Err(AppError::Unauthorized)));
    }
}
