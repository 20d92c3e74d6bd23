//! Authentication service - logins, session resolution and account codes.
//!
//! Tokens are stateless: nothing is stored per session, and every
//! authenticated call hands back a freshly signed token (sliding session).
//! Earlier tokens stay valid until their own expiry.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::client::{CodePurpose, Mailer, PrincipalDirectory};
use crate::config::AuthServiceConfig;
use crate::service::token_service::{TokenIssuer, TokenResponse};
use common::{AppError, AppResult, OptionExt};
use domain::{
    verification::{create_token, is_token_expired, token_expiry_from},
    Admin, DomainError, ObjectId, Password, Principal, Role, User, DUMMY_PASSWORD_HASH,
};

/// Body returned by both login flows.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[cfg_attr(feature = "openapi", schema(example = "Bearer"))]
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user_id: String,
    #[cfg_attr(feature = "openapi", schema(example = "user"))]
    pub role: String,
    /// True while a candidate has not completed their profile
    pub first_login: bool,
}

impl LoginResponse {
    fn new(token: TokenResponse, id: ObjectId, role: Role, first_login: bool) -> Self {
        Self {
            token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user_id: id.to_hex(),
            role: role.to_string(),
            first_login,
        }
    }
}

/// Candidate sign-up data, already shape-checked by the caller.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub surname: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
}

/// A resolved request principal plus the rotated token to hand back.
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: Principal,
    pub token: TokenResponse,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an unverified candidate and mail a confirmation code
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Confirm a candidate's email with the mailed code
    async fn verify_email(&self, email: &str, code: &str) -> AppResult<()>;

    /// Issue a new confirmation code to an unverified candidate
    async fn resend_code(&self, email: &str) -> AppResult<()>;

    /// Mail a password reset code to a verified candidate
    async fn request_password_reset(&self, email: &str) -> AppResult<()>;

    async fn reset_password(&self, code: &str, password: &str) -> AppResult<()>;

    /// Candidate or administrator login
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse>;

    async fn login_company(&self, email: &str, password: &str) -> AppResult<LoginResponse>;

    /// Verify a bearer token, load its principal and issue the rotated token
    async fn authenticate(&self, token: &str) -> AppResult<Session>;

    /// Admin-only gate: the role must be admin and the record must still exist
    async fn require_admin(&self, principal: &Principal) -> AppResult<Admin>;

    /// Seed an administrator account
    async fn create_admin(&self, name: String, email: String, password: String) -> AppResult<Admin>;
}

/// Concrete implementation of AuthService over a principal directory.
pub struct Authenticator {
    directory: Arc<dyn PrincipalDirectory>,
    mailer: Arc<dyn Mailer>,
    tokens: TokenIssuer,
    config: AuthServiceConfig,
}

impl Authenticator {
    pub fn new(
        directory: Arc<dyn PrincipalDirectory>,
        mailer: Arc<dyn Mailer>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            directory,
            mailer,
            tokens: TokenIssuer::new(config.jwt_secret_bytes(), config.session_ttl_minutes),
            config,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Burn the same hashing cost as a real check when the account is missing.
    fn reject_unknown_account(password: &str) -> AppError {
        let _ = Password::from_hash(DUMMY_PASSWORD_HASH).verify(password);
        AppError::InvalidCredentials
    }

    async fn send_code(&self, user: &User, code: &str, purpose: CodePurpose) -> AppResult<()> {
        self.mailer
            .send_code(&user.email, &user.name, code, purpose)
            .await
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        let email = normalize_email(&registration.email);

        // Check-then-insert; a unique index is the real backstop
        if self.directory.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }
        if self
            .directory
            .find_user_by_cpf(&registration.cpf)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("CPF"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();

        let mut user = User::new(
            registration.name,
            registration.surname,
            registration.cpf,
            email,
            password_hash,
        );
        let code = create_token();
        user.set_verification_code(
            code.clone(),
            token_expiry_from(Utc::now(), self.config.verification_ttl_minutes),
        );

        self.directory.insert_user(&user).await?;
        self.send_code(&user, &code, CodePurpose::Verification)
            .await?;

        info!(user_id = %user.id, "Registered candidate");
        Ok(user)
    }

    async fn verify_email(&self, email: &str, code: &str) -> AppResult<()> {
        let invalid = || AppError::validation("Invalid verification code");

        let mut user = self
            .directory
            .find_user_by_email(&normalize_email(email))
            .await?
            .ok_or_else(invalid)?;

        if user.verification_token.as_deref() != Some(code.trim()) {
            return Err(invalid());
        }
        if user.token_expiry().map_or(true, is_token_expired) {
            return Err(DomainError::expired("Verification code").into());
        }

        user.mark_verified();
        self.directory.save_user(&user).await?;

        info!(user_id = %user.id, "Email verified");
        Ok(())
    }

    async fn resend_code(&self, email: &str) -> AppResult<()> {
        let mut user = self
            .directory
            .find_user_by_email(&normalize_email(email))
            .await?
            .ok_or_not_found()?;

        if user.is_verified {
            return Err(AppError::validation("Email is already verified"));
        }

        let code = create_token();
        user.set_verification_code(
            code.clone(),
            token_expiry_from(Utc::now(), self.config.verification_ttl_minutes),
        );
        self.directory.save_user(&user).await?;

        self.send_code(&user, &code, CodePurpose::Verification).await
    }

    async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        let mut user = self
            .directory
            .find_user_by_email(&normalize_email(email))
            .await?
            .ok_or_not_found()?;

        if !user.is_verified {
            return Err(AppError::validation("Email is not verified"));
        }

        let code = create_token();
        user.set_reset_code(
            code.clone(),
            token_expiry_from(Utc::now(), self.config.reset_ttl_minutes),
        );
        self.directory.save_user(&user).await?;

        debug!(user_id = %user.id, "Password reset requested");
        self.send_code(&user, &code, CodePurpose::PasswordReset).await
    }

    async fn reset_password(&self, code: &str, password: &str) -> AppResult<()> {
        let mut user = self
            .directory
            .find_user_by_reset_code(code.trim(), Utc::now())
            .await?
            .ok_or_else(|| AppError::validation("Invalid or expired reset code"))?;

        let password_hash = Password::new(password)?.into_string();
        user.reset_password(password_hash);
        self.directory.save_user(&user).await?;

        info!(user_id = %user.id, "Password reset");
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let email = normalize_email(email);
        let now = Utc::now();

        if let Some(mut user) = self.directory.find_user_by_email(&email).await? {
            if !Password::from_hash(user.password_hash.as_str()).verify(password) {
                warn!(user_id = %user.id, "Rejected login: wrong password");
                return Err(AppError::InvalidCredentials);
            }
            if !user.is_verified {
                return Err(AppError::Forbidden);
            }

            user.record_access(now);
            self.directory.save_user(&user).await?;

            let token = self.tokens.issue_at(user.id, Role::User, now)?;
            info!(user_id = %user.id, "Candidate logged in");
            return Ok(LoginResponse::new(
                token,
                user.id,
                Role::User,
                !user.profile_completed,
            ));
        }

        if let Some(mut admin) = self.directory.find_admin_by_email(&email).await? {
            if !Password::from_hash(admin.password_hash.as_str()).verify(password) {
                warn!(admin_id = %admin.id, "Rejected login: wrong password");
                return Err(AppError::InvalidCredentials);
            }

            admin.record_access(now);
            self.directory.save_admin(&admin).await?;

            let token = self.tokens.issue_at(admin.id, Role::Admin, now)?;
            info!(admin_id = %admin.id, "Administrator logged in");
            return Ok(LoginResponse::new(token, admin.id, Role::Admin, false));
        }

        warn!("Rejected login: unknown account");
        Err(Self::reject_unknown_account(password))
    }

    async fn login_company(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let email = normalize_email(email);
        let now = Utc::now();

        let Some(mut company) = self.directory.find_company_by_email(&email).await? else {
            warn!("Rejected company login: unknown account");
            return Err(Self::reject_unknown_account(password));
        };

        if !Password::from_hash(company.password_hash.as_str()).verify(password) {
            warn!(company_id = %company.id, "Rejected company login: wrong password");
            return Err(AppError::InvalidCredentials);
        }
        if !company.is_enabled() {
            return Err(AppError::Forbidden);
        }

        company.record_access(now);
        self.directory.save_company(&company).await?;

        let token = self.tokens.issue_at(company.id, Role::Company, now)?;
        info!(company_id = %company.id, "Company logged in");
        Ok(LoginResponse::new(token, company.id, Role::Company, false))
    }

    async fn authenticate(&self, token: &str) -> AppResult<Session> {
        let claims = self.tokens.verify(token)?;
        let role = claims.role();
        let subject = claims.subject()?;

        let principal = self
            .directory
            .find_principal(role, subject)
            .await?
            .ok_or_else(|| {
                warn!(%subject, %role, "Token subject no longer exists");
                AppError::Unauthorized
            })?;

        if principal.role() != role {
            warn!(%subject, %role, "Directory returned a principal of another role");
            return Err(AppError::Unauthorized);
        }

        let token = self.tokens.issue(subject, role)?;
        debug!(%subject, %role, "Session rotated");

        Ok(Session { principal, token })
    }

    async fn require_admin(&self, principal: &Principal) -> AppResult<Admin> {
        if !principal.role().is_admin() {
            return Err(AppError::Forbidden);
        }

        match self
            .directory
            .find_principal(Role::Admin, principal.id())
            .await?
        {
            Some(Principal::Admin(admin)) => Ok(admin),
            _ => {
                warn!(admin_id = %principal.id(), "Admin token without admin record");
                Err(AppError::Forbidden)
            }
        }
    }

    async fn create_admin(&self, name: String, email: String, password: String) -> AppResult<Admin> {
        let email = normalize_email(&email);
        if self.directory.find_admin_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Admin"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let admin = Admin::new(name, email, password_hash);
        self.directory.insert_admin(&admin).await?;

        info!(admin_id = %admin.id, "Administrator created");
        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockMailer, MockPrincipalDirectory};
    use chrono::Duration;
    use domain::Company;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";
    const PASSWORD: &str = "correct-horse-battery";

    fn config() -> AuthServiceConfig {
        AuthServiceConfig {
            jwt_secret: SECRET.to_string(),
            ..AuthServiceConfig::default()
        }
    }

    fn service(directory: MockPrincipalDirectory, mailer: MockMailer) -> Authenticator {
        Authenticator::new(Arc::new(directory), Arc::new(mailer), config())
    }

    fn hash(password: &str) -> String {
        Password::new(password).unwrap().into_string()
    }

    fn verified_user() -> User {
        let mut user = User::new(
            "Ana".into(),
            "Souza".into(),
            "12345678901".into(),
            "ana@example.com".into(),
            hash(PASSWORD),
        );
        user.is_verified = true;
        user
    }

    fn admin() -> Admin {
        Admin::new("Root".into(), "root@example.com".into(), hash(PASSWORD))
    }

    #[tokio::test]
    async fn test_login_user_first() {
        let user = verified_user();
        let user_id = user.id;

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        directory
            .expect_save_user()
            .withf(|user| user.last_access.is_some())
            .times(1)
            .returning(|_| Ok(()));
        directory.expect_find_admin_by_email().never();

        let auth = service(directory, MockMailer::new());
        let response = auth.login("ANA@example.com ", PASSWORD).await.unwrap();

        assert_eq!(response.user_id, user_id.to_hex());
        assert_eq!(response.role, "user");
        assert!(response.first_login);

        let claims = auth.tokens().verify(&response.token).unwrap();
        assert_eq!(claims.sub, user_id.to_hex());
    }

    #[tokio::test]
    async fn test_login_falls_back_to_admins() {
        let admin = admin();
        let admin_id = admin.id;

        let mut directory = MockPrincipalDirectory::new();
        directory.expect_find_user_by_email().returning(|_| Ok(None));
        directory
            .expect_find_admin_by_email()
            .returning(move |_| Ok(Some(admin.clone())));
        directory.expect_save_admin().times(1).returning(|_| Ok(()));

        let auth = service(directory, MockMailer::new());
        let response = auth.login("root@example.com", PASSWORD).await.unwrap();

        assert_eq!(response.role, "admin");
        assert_eq!(response.user_id, admin_id.to_hex());
        assert!(!response.first_login);
    }

    #[tokio::test]
    async fn test_login_unverified_user_forbidden() {
        let mut user = verified_user();
        user.is_verified = false;

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        directory.expect_save_user().never();

        let auth = service(directory, MockMailer::new());
        let result = auth.login("ana@example.com", PASSWORD).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let user = verified_user();

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = service(directory, MockMailer::new());
        let result = auth.login("ana@example.com", "wrong-password").await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_account() {
        let mut directory = MockPrincipalDirectory::new();
        directory.expect_find_user_by_email().returning(|_| Ok(None));
        directory.expect_find_admin_by_email().returning(|_| Ok(None));

        let auth = service(directory, MockMailer::new());
        let result = auth.login("ghost@example.com", PASSWORD).await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_disabled_company_cannot_log_in() {
        let mut company = Company::new(
            "Acme".into(),
            "12345678000199".into(),
            None,
            "jobs@acme.com".into(),
            hash(PASSWORD),
        );
        company.status = false;

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_company_by_email()
            .returning(move |_| Ok(Some(company.clone())));
        directory.expect_save_company().never();

        let auth = service(directory, MockMailer::new());
        let result = auth.login_company("jobs@acme.com", PASSWORD).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_authenticate_rotates_token() {
        let user = verified_user();
        let user_id = user.id;

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_principal()
            .with(eq(Role::User), eq(user_id))
            .times(1)
            .returning(move |_, _| Ok(Some(Principal::User(user.clone()))));

        let auth = service(directory, MockMailer::new());
        let original = auth.tokens().issue(user_id, Role::User).unwrap();

        let session = auth.authenticate(&original.access_token).await.unwrap();

        assert_eq!(session.principal.id(), user_id);
        assert_eq!(session.principal.role(), Role::User);
        assert_ne!(session.token.access_token, original.access_token);

        let rotated = auth.tokens().verify(&session.token.access_token).unwrap();
        assert_eq!(rotated.sub, user_id.to_hex());
        assert_eq!(rotated.role, "user");
    }

    #[tokio::test]
    async fn test_authenticate_dispatches_company_role() {
        let company = Company::new(
            "Acme".into(),
            "12345678000199".into(),
            Some("Tech".into()),
            "jobs@acme.com".into(),
            hash(PASSWORD),
        );
        let company_id = company.id;

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_principal()
            .with(eq(Role::Company), eq(company_id))
            .returning(move |_, _| Ok(Some(Principal::Company(company.clone()))));

        let auth = service(directory, MockMailer::new());
        let token = auth.tokens().issue(company_id, Role::Company).unwrap();

        let session = auth.authenticate(&token.access_token).await.unwrap();
        assert_eq!(session.principal.role(), Role::Company);
    }

    #[tokio::test]
    async fn test_authenticate_missing_principal_is_unauthorized() {
        let mut directory = MockPrincipalDirectory::new();
        directory.expect_find_principal().returning(|_, _| Ok(None));

        let auth = service(directory, MockMailer::new());
        let token = auth.tokens().issue(ObjectId::new(), Role::User).unwrap();

        let result = auth.authenticate(&token.access_token).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_expired_token_never_hits_directory() {
        let mut directory = MockPrincipalDirectory::new();
        directory.expect_find_principal().never();

        let auth = service(directory, MockMailer::new());
        let token = auth
            .tokens()
            .issue_at(ObjectId::new(), Role::User, Utc::now() - Duration::hours(2))
            .unwrap();

        let err = auth.authenticate(&token.access_token).await.unwrap_err();
        assert_eq!(err.status().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_require_admin_rejects_other_roles() {
        let mut directory = MockPrincipalDirectory::new();
        directory.expect_find_principal().never();

        let auth = service(directory, MockMailer::new());
        let result = auth.require_admin(&Principal::User(verified_user())).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_require_admin_rejects_demoted_admin() {
        let admin = admin();
        let admin_id = admin.id;

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_principal()
            .with(eq(Role::Admin), eq(admin_id))
            .times(1)
            .returning(|_, _| Ok(None));

        let auth = service(directory, MockMailer::new());
        let result = auth.require_admin(&Principal::Admin(admin)).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_require_admin_reloads_record() {
        let admin = admin();
        let reloaded = admin.clone();

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_principal()
            .returning(move |_, _| Ok(Some(Principal::Admin(reloaded.clone()))));

        let auth = service(directory, MockMailer::new());
        let loaded = auth.require_admin(&Principal::Admin(admin.clone())).await;

        assert_eq!(loaded.unwrap().id, admin.id);
    }

    #[tokio::test]
    async fn test_register_mails_verification_code() {
        let mut directory = MockPrincipalDirectory::new();
        directory.expect_find_user_by_email().returning(|_| Ok(None));
        directory.expect_find_user_by_cpf().returning(|_| Ok(None));
        directory
            .expect_insert_user()
            .withf(|user| {
                !user.is_verified && user.verification_token.is_some() && user.token_expiry.is_some()
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send_code()
            .withf(|recipient, _, code, purpose| {
                recipient.eq_ignore_ascii_case("ana@example.com")
                    && code.len() == 6
                    && *purpose == CodePurpose::Verification
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let auth = service(directory, mailer);
        let user = auth
            .register(Registration {
                name: "Ana".into(),
                surname: "Souza".into(),
                cpf: "12345678901".into(),
                email: " Ana@Example.com".into(),
                password: PASSWORD.into(),
            })
            .await
            .unwrap();

        assert_eq!(user.email, "ana@example.com");
        assert_ne!(user.password_hash, PASSWORD);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let existing = verified_user();

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_user_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        directory.expect_insert_user().never();

        let auth = service(directory, MockMailer::new());
        let result = auth
            .register(Registration {
                name: "Ana".into(),
                surname: "Souza".into(),
                cpf: "99999999999".into(),
                email: "ana@example.com".into(),
                password: PASSWORD.into(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_verify_email_consumes_code() {
        let mut user = verified_user();
        user.is_verified = false;
        user.set_verification_code("424242".into(), Utc::now() + Duration::minutes(10));

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        directory
            .expect_save_user()
            .withf(|user| user.is_verified && user.verification_token.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let auth = service(directory, MockMailer::new());
        assert_ok!(auth.verify_email("ana@example.com", "424242").await);
    }

    #[tokio::test]
    async fn test_verify_email_expired_code() {
        let mut user = verified_user();
        user.is_verified = false;
        user.set_verification_code("424242".into(), Utc::now() - Duration::minutes(1));

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        directory.expect_save_user().never();

        let auth = service(directory, MockMailer::new());
        let err = auth.verify_email("ana@example.com", "424242").await.unwrap_err();

        assert_eq!(err.status().as_u16(), 400);
        assert!(err.user_message().contains("expired"));
    }

    #[tokio::test]
    async fn test_verify_email_wrong_code() {
        let mut user = verified_user();
        user.is_verified = false;
        user.set_verification_code("424242".into(), Utc::now() + Duration::minutes(10));

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = service(directory, MockMailer::new());
        assert_err!(auth.verify_email("ana@example.com", "000000").await);
    }

    #[tokio::test]
    async fn test_reset_password_replaces_hash() {
        let mut user = verified_user();
        let old_hash = user.password_hash.clone();
        user.set_reset_code("131313".into(), Utc::now() + Duration::minutes(30));

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_user_by_reset_code()
            .withf(|code, now| code == "131313" && *now <= Utc::now())
            .returning(move |_, _| Ok(Some(user.clone())));
        directory
            .expect_save_user()
            .withf(move |user| {
                user.password_hash != old_hash && user.email_verification_token.is_none()
            })
            .times(1)
            .returning(|_| Ok(()));

        let auth = service(directory, MockMailer::new());
        assert_ok!(auth.reset_password("131313", "brand-new-secret").await);
    }

    #[tokio::test]
    async fn test_password_reset_requires_verified_email() {
        let mut user = verified_user();
        user.is_verified = false;

        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut mailer = MockMailer::new();
        mailer.expect_send_code().never();

        let auth = service(directory, mailer);
        assert_err!(auth.request_password_reset("ana@example.com").await);
    }

    #[tokio::test]
    async fn test_reset_password_without_live_code_is_rejected() {
        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_user_by_reset_code()
            .returning(|_, _| Ok(None));
        directory.expect_save_user().never();

        let auth = service(directory, MockMailer::new());
        let result = auth.reset_password("131313", "brand-new-secret").await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("expired")));
    }
}
