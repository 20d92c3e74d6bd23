//! Candidate accounts and their profile.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A previous position listed on a candidate profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<String>,
    #[serde(default)]
    pub current: bool,
}

/// A course listed on a candidate profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
}

/// Candidate account as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub surname: String,
    pub cpf: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub is_verified: bool,
    /// Pending email-confirmation code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    /// Pending password-reset code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verification_token: Option<String>,
    /// Expiry shared by whichever code is pending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_expiry: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<bson::DateTime>,
    #[serde(default)]
    pub profile_completed: bool,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub created_at: bson::DateTime,
}

impl User {
    /// New, unverified candidate.
    pub fn new(
        name: String,
        surname: String,
        cpf: String,
        email: String,
        password_hash: String,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            surname,
            cpf,
            email,
            password_hash,
            is_verified: false,
            verification_token: None,
            email_verification_token: None,
            token_expiry: None,
            last_access: None,
            profile_completed: false,
            experiences: Vec::new(),
            education: Vec::new(),
            created_at: bson::DateTime::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    pub fn token_expiry(&self) -> Option<DateTime<Utc>> {
        self.token_expiry.map(|at| at.to_chrono())
    }

    pub fn set_verification_code(&mut self, code: String, expiry: DateTime<Utc>) {
        self.verification_token = Some(code);
        self.token_expiry = Some(bson::DateTime::from_chrono(expiry));
    }

    pub fn set_reset_code(&mut self, code: String, expiry: DateTime<Utc>) {
        self.email_verification_token = Some(code);
        self.token_expiry = Some(bson::DateTime::from_chrono(expiry));
    }

    /// Confirms the email and consumes the pending code.
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.verification_token = None;
        self.token_expiry = None;
    }

    /// Swaps in a new password hash and consumes the reset code.
    pub fn reset_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.email_verification_token = None;
        self.token_expiry = None;
    }

    pub fn record_access(&mut self, at: DateTime<Utc>) {
        self.last_access = Some(bson::DateTime::from_chrono(at));
    }
}

/// Candidate profile as returned to companies and admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub is_verified: bool,
    pub profile_completed: bool,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_access: Option<DateTime<Utc>>,
}

impl From<User> for CandidateResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            surname: user.surname,
            email: user.email,
            is_verified: user.is_verified,
            profile_completed: user.profile_completed,
            experiences: user.experiences,
            education: user.education,
            last_access: user.last_access.map(|at| at.to_chrono()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn candidate() -> User {
        User::new(
            "Ana".to_string(),
            "Souza".to_string(),
            "12345678901".to_string(),
            "ana@example.com".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn test_mark_verified_consumes_code() {
        let mut user = candidate();
        user.set_verification_code("123456".to_string(), Utc::now() + Duration::hours(1));

        user.mark_verified();

        assert!(user.is_verified);
        assert!(user.verification_token.is_none());
        assert!(user.token_expiry.is_none());
    }

    #[test]
    fn test_reset_password_consumes_code() {
        let mut user = candidate();
        user.set_reset_code("654321".to_string(), Utc::now() + Duration::hours(1));

        user.reset_password("new-hash".to_string());

        assert_eq!(user.password_hash, "new-hash");
        assert!(user.email_verification_token.is_none());
    }

    #[test]
    fn test_stored_document_uses_mongo_id_and_skips_empty_codes() {
        let user = candidate();
        let document = bson::to_document(&user).unwrap();

        assert_eq!(document.get_object_id("_id").unwrap(), user.id);
        assert!(!document.contains_key("verificationToken"));
        assert!(document.contains_key("passwordHash"));
    }

    #[test]
    fn test_candidate_response_hides_credentials() {
        let json = serde_json::to_value(CandidateResponse::from(candidate())).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert!(json.get("cpf").is_none());
        assert_eq!(json["name"], "Ana");
    }
}
