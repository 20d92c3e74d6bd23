//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use auth_service_lib::{LoginResponse, Registration};
use common::AppResult;
use domain::{CandidateResponse, PrincipalResponse};

use super::MessageResponse;
use crate::extractors::ValidatedJson;
use crate::middleware::CurrentPrincipal;
use crate::state::AppState;

/// CPF with or without its usual punctuation.
static CPF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}\.?\d{3}\.?\d{3}-?\d{2}$").expect("valid CPF pattern"));

static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{6}$").expect("valid code pattern"));

/// Candidate sign-up request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ana")]
    pub name: String,
    #[validate(length(min = 1, message = "Surname is required"))]
    #[schema(example = "Souza")]
    pub surname: String,
    #[validate(regex(path = *CPF_PATTERN, message = "CPF must have 11 digits"))]
    #[schema(example = "123.456.789-01")]
    pub cpf: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct VerifyEmailRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(regex(path = *CODE_PATTERN, message = "Code must have 6 digits"))]
    #[schema(example = "482910")]
    pub code: String,
}

/// Body of the endpoints that only need an address
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct EmailRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@example.com")]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ResetPasswordRequest {
    #[validate(regex(path = *CODE_PATTERN, message = "Code must have 6 digits"))]
    pub code: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/verify", post(verify_email))
        .route("/auth/resend-code", post(resend_code))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        .route("/auth/login", post(login))
        .route("/auth/login-company", post(login_company))
}

/// Routes that need an authenticated principal
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// Register a candidate and mail a confirmation code
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Candidate registered", body = CandidateResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or CPF already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<CandidateResponse>)> {
    let registration = Registration {
        name: payload.name,
        surname: payload.surname,
        cpf: payload.cpf.chars().filter(char::is_ascii_digit).collect(),
        email: payload.email,
        password: payload.password,
    };
    let user = state.auth.register(registration).await?;

    Ok((StatusCode::CREATED, Json(CandidateResponse::from(user))))
}

/// Confirm an email address
#[utoipa::path(
    post,
    path = "/api/auth/verify",
    tag = "Authentication",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Email confirmed", body = MessageResponse),
        (status = 400, description = "Wrong or expired code")
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyEmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.auth.verify_email(&payload.email, &payload.code).await?;
    Ok(Json(MessageResponse::new("Email verified")))
}

/// Send a new confirmation code
#[utoipa::path(
    post,
    path = "/api/auth/resend-code",
    tag = "Authentication",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Code sent", body = MessageResponse),
        (status = 400, description = "Already verified"),
        (status = 404, description = "Unknown email")
    )
)]
pub async fn resend_code(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.auth.resend_code(&payload.email).await?;
    Ok(Json(MessageResponse::new("Verification code sent")))
}

/// Mail a password reset code
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "Authentication",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Reset code sent", body = MessageResponse),
        (status = 404, description = "Unknown email")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.auth.request_password_reset(&payload.email).await?;
    Ok(Json(MessageResponse::new("Password reset code sent")))
}

/// Set a new password with a reset code
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = "Authentication",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Wrong or expired code")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth
        .reset_password(&payload.code, &payload.password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated")))
}

/// Candidate or administrator login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Email not verified")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(response))
}

/// Company login
#[utoipa::path(
    post,
    path = "/api/auth/login-company",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Company disabled")
    )
)]
pub async fn login_company(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state
        .auth
        .login_company(&payload.email, &payload.password)
        .await?;
    Ok(Json(response))
}

/// The authenticated principal
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current principal", body = PrincipalResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(Extension(current): Extension<CurrentPrincipal>) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::from(current.principal()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_accepts_punctuated_and_bare() {
        assert!(CPF_PATTERN.is_match("123.456.789-01"));
        assert!(CPF_PATTERN.is_match("12345678901"));
        assert!(!CPF_PATTERN.is_match("1234567890"));
        assert!(!CPF_PATTERN.is_match("123.456.789-0a"));
    }

    #[test]
    fn test_code_must_be_six_digits() {
        let request = VerifyEmailRequest {
            email: "ana@example.com".into(),
            code: "12345".into(),
        };
        assert!(request.validate().is_err());
    }
}
