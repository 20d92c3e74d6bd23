//! Role tags carried by session tokens.

use crate::constants::{
    ADMINS_COLLECTION, COMPANIES_COLLECTION, ROLE_ADMIN, ROLE_COMPANY, ROLE_USER,
    USERS_COLLECTION,
};

/// Which principal collection a token subject lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
    Company,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
            Role::Company => ROLE_COMPANY,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Backing collection for subjects of this role.
    pub fn collection(&self) -> &'static str {
        match self {
            Role::User => USERS_COLLECTION,
            Role::Admin => ADMINS_COLLECTION,
            Role::Company => COMPANIES_COLLECTION,
        }
    }
}

/// Unknown tags fall back to `User`.
impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => Role::Admin,
            ROLE_COMPANY => Role::Company,
            _ => Role::User,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tags() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("empresa"), Role::Company);
        assert_eq!(Role::from("user"), Role::User);
        assert_eq!(Role::Company.to_string(), "empresa");
    }

    #[test]
    fn test_unknown_tag_is_user() {
        assert_eq!(Role::from("superuser"), Role::User);
        assert_eq!(Role::from(""), Role::User);
    }

    #[test]
    fn test_each_role_has_its_own_collection() {
        assert_eq!(Role::User.collection(), "users");
        assert_eq!(Role::Admin.collection(), "admins");
        assert_eq!(Role::Company.collection(), "companies");
    }
}
