use serde::{Deserialize, Serialize};

use super::repo_types::User;

/// Request body for user registration. Fields are optional so that a missing
/// field is reported as a validation error rather than a decode failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public part of the user returned by `/my-profile`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub full_name: String,
    pub email: String,
    pub username: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name,
            email: user.email,
            username: user.username,
        }
    }
}
