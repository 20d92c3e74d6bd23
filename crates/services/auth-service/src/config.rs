//! Auth service configuration.

use common::{JwtConfig, VerificationConfig};
use domain::{
    DEFAULT_RESET_CODE_TTL_MINUTES, DEFAULT_SESSION_TTL_MINUTES,
    DEFAULT_VERIFICATION_CODE_TTL_MINUTES,
};

/// Auth service configuration.
#[derive(Clone)]
pub struct AuthServiceConfig {
    /// JWT secret for signing tokens (min 32 characters)
    pub jwt_secret: String,
    /// Lifetime of login and rotated tokens
    pub session_ttl_minutes: i64,
    /// Lifetime of email confirmation codes
    pub verification_ttl_minutes: i64,
    /// Lifetime of password reset codes
    pub reset_ttl_minutes: i64,
}

impl AuthServiceConfig {
    pub fn from_parts(jwt: &JwtConfig, codes: &VerificationConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            session_ttl_minutes: jwt.session_ttl_minutes,
            verification_ttl_minutes: codes.verification_ttl_minutes,
            reset_ttl_minutes: codes.reset_ttl_minutes,
        }
    }

    /// Get JWT secret as bytes.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

impl std::fmt::Debug for AuthServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .field("verification_ttl_minutes", &self.verification_ttl_minutes)
            .field("reset_ttl_minutes", &self.reset_ttl_minutes)
            .finish()
    }
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            verification_ttl_minutes: DEFAULT_VERIFICATION_CODE_TTL_MINUTES,
            reset_ttl_minutes: DEFAULT_RESET_CODE_TTL_MINUTES,
        }
    }
}
