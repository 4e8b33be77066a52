//! User types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;

/// User account
///
/// `password` holds the stored credential and is never written out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// User registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// User login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}

/// Public view of a seller's owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_never_serialized() {
        let user = User {
            id: "u1".into(),
            username: "kofi".into(),
            password: "secret".into(),
            email: "kofi@example.com".into(),
            role: Role::Buyer,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["createdAt"].is_string(), true);
    }

    #[test]
    fn test_role_defaults_to_buyer() {
        let req: NewUser = serde_json::from_str(
            r#"{"username": "ama", "password": "pw1234", "email": "ama@example.com"}"#,
        )
        .unwrap();
        assert_eq!(req.role, Role::Buyer);
    }
}
