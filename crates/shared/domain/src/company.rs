//! Company and administrator accounts.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employer account as stored in the `companies` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub cnpj: String,
    #[serde(default)]
    pub sector: Option<String>,
    pub email: String,
    pub password_hash: String,
    /// Disabled companies cannot log in
    #[serde(default = "enabled")]
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<bson::DateTime>,
    pub created_at: bson::DateTime,
}

fn enabled() -> bool {
    true
}

impl Company {
    pub fn new(
        name: String,
        cnpj: String,
        sector: Option<String>,
        email: String,
        password_hash: String,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            cnpj,
            sector,
            email,
            password_hash,
            status: true,
            logo: None,
            last_access: None,
            created_at: bson::DateTime::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.status
    }

    pub fn record_access(&mut self, at: DateTime<Utc>) {
        self.last_access = Some(bson::DateTime::from_chrono(at));
    }
}

/// Company listing row (no credentials).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: String,
    pub name: String,
    pub cnpj: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    pub email: String,
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id.to_hex(),
            name: company.name,
            cnpj: company.cnpj,
            sector: company.sector,
            email: company.email,
            status: company.status,
            logo: company.logo,
            created_at: company.created_at.to_chrono(),
        }
    }
}

/// Administrator account as stored in the `admins` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<bson::DateTime>,
    pub created_at: bson::DateTime,
}

impl Admin {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            email,
            password_hash,
            last_access: None,
            created_at: bson::DateTime::now(),
        }
    }

    pub fn record_access(&mut self, at: DateTime<Utc>) {
        self.last_access = Some(bson::DateTime::from_chrono(at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_status_defaults_to_enabled() {
        let company = Company::new(
            "Acme".to_string(),
            "12345678000199".to_string(),
            None,
            "hr@acme.example".to_string(),
            "hash".to_string(),
        );
        let mut document = bson::to_document(&company).unwrap();
        document.remove("status");

        let restored: Company = bson::from_document(document).unwrap();
        assert!(restored.is_enabled());
    }
}
