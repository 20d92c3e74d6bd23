//! Account collections: users, admins and companies.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use auth_service_lib::PrincipalDirectory;
use common::{AppError, AppResult};
use domain::{
    Admin, Company, ObjectId, Principal, Role, User, ADMINS_COLLECTION, COMPANIES_COLLECTION,
    USERS_COLLECTION,
};
use query::{FilterPlan, Paginated, Predicate};

use super::base::{fetch_page, find_by_id, find_first, to_document};
use crate::infra::DocumentStore;

/// Principal lookups and account listings over a document store.
#[derive(Clone)]
pub struct PrincipalStore {
    store: Arc<dyn DocumentStore>,
}

impl PrincipalStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_companies(&self, plan: &FilterPlan) -> AppResult<Paginated<Company>> {
        fetch_page(self.store.as_ref(), COMPANIES_COLLECTION, plan).await
    }

    pub async fn list_users(&self, plan: &FilterPlan) -> AppResult<Paginated<User>> {
        fetch_page(self.store.as_ref(), USERS_COLLECTION, plan).await
    }

    pub async fn insert_company(&self, company: &Company) -> AppResult<()> {
        self.store
            .insert(COMPANIES_COLLECTION, to_document(company)?)
            .await
    }

    async fn replace(&self, collection: &str, document: bson::Document) -> AppResult<()> {
        if self.store.replace(collection, document).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}

#[async_trait]
impl PrincipalDirectory for PrincipalStore {
    async fn find_principal(&self, role: Role, id: ObjectId) -> AppResult<Option<Principal>> {
        let store = self.store.as_ref();
        let collection = role.collection();

        let principal = match role {
            Role::User => find_by_id::<User>(store, collection, id)
                .await?
                .map(Principal::User),
            Role::Admin => find_by_id::<Admin>(store, collection, id)
                .await?
                .map(Principal::Admin),
            Role::Company => find_by_id::<Company>(store, collection, id)
                .await?
                .map(Principal::Company),
        };
        Ok(principal)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        find_first(
            self.store.as_ref(),
            USERS_COLLECTION,
            vec![Predicate::equals("email", email)],
        )
        .await
    }

    async fn find_user_by_cpf(&self, cpf: &str) -> AppResult<Option<User>> {
        find_first(
            self.store.as_ref(),
            USERS_COLLECTION,
            vec![Predicate::equals("cpf", cpf)],
        )
        .await
    }

    async fn find_user_by_reset_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        find_first(
            self.store.as_ref(),
            USERS_COLLECTION,
            vec![
                Predicate::equals("emailVerificationToken", code),
                Predicate::after("tokenExpiry", bson::DateTime::from_chrono(now)),
            ],
        )
        .await
    }

    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        find_first(
            self.store.as_ref(),
            ADMINS_COLLECTION,
            vec![Predicate::equals("email", email)],
        )
        .await
    }

    async fn find_company_by_email(&self, email: &str) -> AppResult<Option<Company>> {
        find_first(
            self.store.as_ref(),
            COMPANIES_COLLECTION,
            vec![Predicate::equals("email", email)],
        )
        .await
    }

    async fn insert_user(&self, user: &User) -> AppResult<()> {
        self.store
            .insert(USERS_COLLECTION, to_document(user)?)
            .await
    }

    async fn save_user(&self, user: &User) -> AppResult<()> {
        self.replace(USERS_COLLECTION, to_document(user)?).await
    }

    async fn insert_admin(&self, admin: &Admin) -> AppResult<()> {
        self.store
            .insert(ADMINS_COLLECTION, to_document(admin)?)
            .await
    }

    async fn save_admin(&self, admin: &Admin) -> AppResult<()> {
        self.replace(ADMINS_COLLECTION, to_document(admin)?).await
    }

    async fn save_company(&self, company: &Company) -> AppResult<()> {
        self.replace(COMPANIES_COLLECTION, to_document(company)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth_service_lib::{AuthService, AuthServiceConfig, Authenticator, LoggingMailer};
    use chrono::Duration;
    use domain::Password;

    use crate::infra::{MemoryStore, MockDocumentStore};

    fn user() -> User {
        User::new(
            "Ana".into(),
            "Souza".into(),
            "12345678901".into(),
            "ana@example.com".into(),
            "hash".into(),
        )
    }

    #[tokio::test]
    async fn test_role_selects_collection() {
        let directory = PrincipalStore::new(Arc::new(MemoryStore::new()));
        let user = user();
        directory.insert_user(&user).await.unwrap();

        let as_user = directory.find_principal(Role::User, user.id).await.unwrap();
        let as_admin = directory.find_principal(Role::Admin, user.id).await.unwrap();

        assert!(matches!(as_user, Some(Principal::User(found)) if found.id == user.id));
        assert!(as_admin.is_none());
    }

    #[tokio::test]
    async fn test_company_principal() {
        let directory = PrincipalStore::new(Arc::new(MemoryStore::new()));
        let company = Company::new(
            "Acme".into(),
            "12345678000199".into(),
            None,
            "jobs@acme.com".into(),
            "hash".into(),
        );
        directory.insert_company(&company).await.unwrap();

        let found = directory
            .find_principal(Role::Company, company.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.role(), Role::Company);
        assert_eq!(found.email(), "jobs@acme.com");
    }

    #[tokio::test]
    async fn test_save_round_trips_changes() {
        let directory = PrincipalStore::new(Arc::new(MemoryStore::new()));
        let mut user = user();
        directory.insert_user(&user).await.unwrap();

        user.set_reset_code("777777".into(), Utc::now() + Duration::minutes(10));
        directory.save_user(&user).await.unwrap();

        let found = directory
            .find_user_by_reset_code("777777", Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_reset_code_lookup_skips_expired_holders() {
        let directory = PrincipalStore::new(Arc::new(MemoryStore::new()));
        let now = Utc::now();

        let mut stale = user();
        stale.set_reset_code("123456".into(), now - Duration::minutes(5));
        directory.insert_user(&stale).await.unwrap();

        let mut live = User::new(
            "Bruno".into(),
            "Lima".into(),
            "98765432100".into(),
            "bruno@example.com".into(),
            "hash".into(),
        );
        live.set_reset_code("123456".into(), now + Duration::minutes(30));
        directory.insert_user(&live).await.unwrap();

        let found = directory
            .find_user_by_reset_code("123456", now)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, live.id);

        let later = now + Duration::hours(1);
        assert!(directory
            .find_user_by_reset_code("123456", later)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_password_reset_reaches_live_holder_of_shared_code() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let directory = Arc::new(PrincipalStore::new(store));
        let now = Utc::now();

        let mut stale = user();
        stale.is_verified = true;
        stale.set_reset_code("123456".into(), now - Duration::minutes(5));
        directory.insert_user(&stale).await.unwrap();

        let mut live = User::new(
            "Bruno".into(),
            "Lima".into(),
            "98765432100".into(),
            "bruno@example.com".into(),
            "hash".into(),
        );
        live.is_verified = true;
        live.set_reset_code("123456".into(), now + Duration::minutes(30));
        directory.insert_user(&live).await.unwrap();

        let auth = Authenticator::new(
            directory.clone(),
            Arc::new(LoggingMailer::default()),
            AuthServiceConfig {
                jwt_secret: "0123456789abcdef0123456789abcdef".into(),
                ..AuthServiceConfig::default()
            },
        );
        auth.reset_password("123456", "brand-new-secret").await.unwrap();

        let updated = directory
            .find_user_by_email("bruno@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(Password::from_hash(updated.password_hash).verify("brand-new-secret"));
        assert!(updated.email_verification_token.is_none());

        let untouched = directory
            .find_user_by_email("ana@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_saving_unknown_record_is_not_found() {
        let mut store = MockDocumentStore::new();
        store.expect_replace().times(1).returning(|_, _| Ok(false));

        let directory = PrincipalStore::new(Arc::new(store));
        let result = directory.save_user(&user()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_one()
            .returning(|_, _| Err(AppError::internal("connection reset")));

        let directory = PrincipalStore::new(Arc::new(store));
        assert!(directory.find_user_by_email("ana@example.com").await.is_err());
    }
}
