//! Account lookups needed by authentication.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use common::AppResult;
use domain::{Admin, Company, ObjectId, Principal, Role, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read and write access to the three principal collections.
///
/// Email lookups are exact; callers normalise addresses before asking.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    /// Load the principal of the given role. The returned variant always
    /// matches `role`.
    async fn find_principal(&self, role: Role, id: ObjectId) -> AppResult<Option<Principal>>;

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_user_by_cpf(&self, cpf: &str) -> AppResult<Option<User>>;

    /// Find the user holding `code` as a password-reset code that is still
    /// valid at `now`. Codes are short, so expired holders must not shadow a
    /// live one.
    async fn find_user_by_reset_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>>;

    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>>;

    async fn find_company_by_email(&self, email: &str) -> AppResult<Option<Company>>;

    async fn insert_user(&self, user: &User) -> AppResult<()>;

    /// Replace a stored user by id
    async fn save_user(&self, user: &User) -> AppResult<()>;

    async fn insert_admin(&self, admin: &Admin) -> AppResult<()>;

    async fn save_admin(&self, admin: &Admin) -> AppResult<()>;

    async fn save_company(&self, company: &Company) -> AppResult<()>;
}
