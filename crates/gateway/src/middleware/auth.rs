//! Bearer authentication with sliding sessions.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::Response,
};

use common::{AppError, AppResult};
use domain::{Company, Principal, User, BEARER_TOKEN_PREFIX};

use crate::state::AppState;

/// Principal loaded for the current request.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl CurrentPrincipal {
    pub fn principal(&self) -> &Principal {
        &self.0
    }

    /// The company behind the request, or 403 for any other role.
    pub fn company(&self) -> AppResult<&Company> {
        match &self.0 {
            Principal::Company(company) => Ok(company),
            _ => Err(AppError::Forbidden),
        }
    }

    /// The candidate behind the request, or 403 for any other role.
    pub fn user(&self) -> AppResult<&User> {
        match &self.0 {
            Principal::User(user) => Ok(user),
            _ => Err(AppError::Forbidden),
        }
    }
}

/// Authentication middleware.
///
/// Resolves the bearer token to a loaded principal, injects it as
/// [`CurrentPrincipal`] and returns a freshly signed token in the
/// response's `Authorization` header.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?.to_string();
    let session = state.auth.authenticate(&token).await?;

    let rotated = HeaderValue::from_str(&format!(
        "{}{}",
        BEARER_TOKEN_PREFIX, session.token.access_token
    ))
    .map_err(|e| AppError::internal(format!("Unencodable token header: {}", e)))?;

    request
        .extensions_mut()
        .insert(CurrentPrincipal(session.principal));

    let mut response = next.run(request).await;
    response.headers_mut().insert(AUTHORIZATION, rotated);
    Ok(response)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request) -> AppResult<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/api/jobs");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token(&request(Some("Bearer abc.def"))).unwrap(), "abc.def");
    }

    #[test]
    fn test_rejects_missing_or_foreign_scheme() {
        assert!(extract_token(&request(None)).is_err());
        assert!(extract_token(&request(Some("Basic dXNlcjpwYXNz"))).is_err());
        assert!(extract_token(&request(Some("Bearer "))).is_err());
    }
}
