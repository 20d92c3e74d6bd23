//! Gateway configuration.

use std::env;
use std::str::FromStr;

use common::{AppError, AppResult, DatabaseConfig, JwtConfig, ServiceConfig, VerificationConfig};
use domain::{
    DEFAULT_RESET_CODE_TTL_MINUTES, DEFAULT_SESSION_TTL_MINUTES,
    DEFAULT_VERIFICATION_CODE_TTL_MINUTES, MIN_JWT_SECRET_LENGTH,
};
use query::LocationSchema;

/// Everything the gateway process needs, read from the environment.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub codes: VerificationConfig,
    /// Shape of job locations in this deployment
    pub location_schema: LocationSchema,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::internal("JWT_SECRET must be set"))?;
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            backend: parsed("STORE_BACKEND", defaults.backend)?,
            uri: env::var("MONGODB_URI").unwrap_or(defaults.uri),
            database: env::var("MONGODB_DATABASE").unwrap_or(defaults.database),
        };

        let server = ServiceConfig {
            service_name: "gateway".to_string(),
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed("GATEWAY_PORT", 3000)?,
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|o| !o.is_empty()),
        };

        Ok(Self {
            server,
            database,
            jwt: JwtConfig {
                secret,
                session_ttl_minutes: parsed("SESSION_TTL_MINUTES", DEFAULT_SESSION_TTL_MINUTES)?,
            },
            codes: VerificationConfig {
                verification_ttl_minutes: parsed(
                    "VERIFICATION_CODE_TTL_MINUTES",
                    DEFAULT_VERIFICATION_CODE_TTL_MINUTES,
                )?,
                reset_ttl_minutes: parsed("RESET_CODE_TTL_MINUTES", DEFAULT_RESET_CODE_TTL_MINUTES)?,
            },
            location_schema: parsed("JOB_LOCATION_SCHEMA", LocationSchema::default())?,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parsed<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::internal(format!("Invalid {}: {}", key, e))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variable_uses_default() {
        let port: u16 = parsed("GATEWAY_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_malformed_variable_is_an_error() {
        env::set_var("GATEWAY_TEST_BAD_SCHEMA", "sideways");
        let schema = parsed("GATEWAY_TEST_BAD_SCHEMA", LocationSchema::Split);
        assert!(schema.is_err());
    }
}
