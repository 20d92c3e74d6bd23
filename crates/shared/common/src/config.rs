//! Shared configuration structures.

use serde::{Deserialize, Serialize};

use domain::{
    DEFAULT_RESET_CODE_TTL_MINUTES, DEFAULT_SESSION_TTL_MINUTES,
    DEFAULT_VERIFICATION_CODE_TTL_MINUTES,
};

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origin; `None` allows any
    pub cors_origin: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "job-board".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origin: None,
        }
    }
}

/// Which document store backs the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    /// Process-local, lost on restart
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Document database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub uri: String,
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Mongo,
            uri: "mongodb://localhost:27017".to_string(),
            database: "job_board".to_string(),
        }
    }
}

/// JWT configuration for session tokens.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    /// Lifetime of every issued token, including rotated ones
    pub session_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }
}

/// Lifetimes of emailed verification and reset codes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    pub verification_ttl_minutes: i64,
    pub reset_ttl_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            verification_ttl_minutes: DEFAULT_VERIFICATION_CODE_TTL_MINUTES,
            reset_ttl_minutes: DEFAULT_RESET_CODE_TTL_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!("mongo".parse::<StoreBackend>(), Ok(StoreBackend::Mongo));
        assert_eq!("MEMORY".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("redis".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_jwt_debug_redacts_secret() {
        let config = JwtConfig {
            secret: "super-secret-value-that-is-long-enough".to_string(),
            ..JwtConfig::default()
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
