//! The authenticated entity behind a request.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::company::{Admin, Company};
use crate::role::Role;
use crate::user::User;

/// Fully loaded principal. The variant always agrees with the token's role.
#[derive(Debug, Clone, PartialEq)]
pub enum Principal {
    User(User),
    Admin(Admin),
    Company(Company),
}

impl Principal {
    pub fn id(&self) -> ObjectId {
        match self {
            Principal::User(user) => user.id,
            Principal::Admin(admin) => admin.id,
            Principal::Company(company) => company.id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Principal::User(_) => Role::User,
            Principal::Admin(_) => Role::Admin,
            Principal::Company(_) => Role::Company,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Principal::User(user) => &user.email,
            Principal::Admin(admin) => &admin.email,
            Principal::Company(company) => &company.email,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Principal::User(user) => user.full_name(),
            Principal::Admin(admin) => admin.name.clone(),
            Principal::Company(company) => company.name.clone(),
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Principal::User(user) => &user.password_hash,
            Principal::Admin(admin) => &admin.password_hash,
            Principal::Company(company) => &company.password_hash,
        }
    }
}

/// Public view of the current principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PrincipalResponse {
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "empresa"))]
    pub role: String,
    pub name: String,
    pub email: String,
}

impl From<&Principal> for PrincipalResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id().to_hex(),
            role: principal.role().to_string(),
            name: principal.display_name(),
            email: principal.email().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_determines_role() {
        let admin = Admin::new("Root".into(), "root@example.com".into(), "hash".into());
        let principal = Principal::Admin(admin.clone());

        assert_eq!(principal.role(), Role::Admin);
        assert_eq!(principal.id(), admin.id);

        let response = PrincipalResponse::from(&principal);
        assert_eq!(response.role, "admin");
        assert_eq!(response.id, admin.id.to_hex());
    }
}
