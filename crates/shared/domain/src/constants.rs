//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Role tag for candidates (also the fallback for unknown tags)
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

/// Role tag carried by company tokens
pub const ROLE_COMPANY: &str = "empresa";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN, ROLE_COMPANY];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Collections
// =============================================================================

pub const USERS_COLLECTION: &str = "users";
pub const ADMINS_COLLECTION: &str = "admins";
pub const COMPANIES_COLLECTION: &str = "companies";
pub const JOBS_COLLECTION: &str = "jobs";
pub const APPLICATIONS_COLLECTION: &str = "applications";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: usize = 1;

/// CPF: eleven digits, no punctuation
pub const CPF_LENGTH: usize = 11;

/// CNPJ: fourteen digits, no punctuation
pub const CNPJ_LENGTH: usize = 14;

// =============================================================================
// Verification codes
// =============================================================================

/// Smallest verification code (inclusive)
pub const VERIFICATION_CODE_MIN: u32 = 100_000;

/// Largest verification code (inclusive)
pub const VERIFICATION_CODE_MAX: u32 = 999_999;

/// Default lifetime of an email-verification code
pub const DEFAULT_VERIFICATION_CODE_TTL_MINUTES: i64 = 24 * 60;

/// Default lifetime of a password-reset code
pub const DEFAULT_RESET_CODE_TTL_MINUTES: i64 = 60;

// =============================================================================
// Authentication
// =============================================================================

/// Default session window; every authenticated request restarts it
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Applications
// =============================================================================

/// Status given to a freshly submitted application
pub const APPLICATION_STATUS_PENDING: &str = "Pending";
