use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{LoginRequest, ProfileResponse, RegisterRequest};
use super::jwt::JwtKeys;
use super::password::{hash_password_async, verify_password_async};
use super::repo::UserRepo;
use super::repo_types::{NewUser, User};
use crate::error::AppError;

/// A field counts as provided only when present and non-empty.
fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

pub async fn register(users: &dyn UserRepo, req: RegisterRequest) -> Result<User, AppError> {
    let (Some(full_name), Some(email), Some(username), Some(password)) = (
        present(req.full_name),
        present(req.email),
        present(req.username),
        present(req.password),
    ) else {
        return Err(AppError::validation("All fields are required"));
    };

    // Fast path; the unique constraint on username still guards concurrent inserts.
    if users.find_by_username(&username).await?.is_some() {
        warn!(%username, "username already registered");
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let password_hash = hash_password_async(password).await?;

    let user = users
        .create(NewUser {
            full_name,
            email,
            username,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Returns a signed token. Unknown user and wrong password fail identically.
pub async fn login(
    users: &dyn UserRepo,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<String, AppError> {
    let (Some(username), Some(password)) = (present(req.username), present(req.password)) else {
        return Err(AppError::validation("Username and password are required"));
    };

    let Some(user) = users.find_by_username(&username).await? else {
        warn!(%username, "login unknown username");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password_async(password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let token = keys.sign(user.id, &user.username)?;
    info!(user_id = %user.id, "user logged in");
    Ok(token)
}

pub async fn profile(users: &dyn UserRepo, user_id: Uuid) -> Result<ProfileResponse, AppError> {
    users
        .find_by_id(user_id)
        .await?
        .map(ProfileResponse::from)
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::memory::MemoryStore;

    fn keys() -> JwtKeys {
        JwtKeys::from(&JwtConfig {
            secret: "test".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 60,
        })
    }

    fn register_req(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    fn login_req(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    #[tokio::test]
    async fn register_stores_hash_not_password() {
        let store = MemoryStore::default();
        let user = register(&store, register_req("ada", "analytical"))
            .await
            .expect("register");
        assert_eq!(user.username, "ada");
        assert_ne!(user.password_hash, "analytical");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_username_conflicts_and_keeps_one_user() {
        let store = MemoryStore::default();
        register(&store, register_req("ada", "first")).await.expect("first");
        let err = register(&store, register_req("ada", "second"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "Username already exists"));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn missing_or_empty_fields_are_rejected_without_storing() {
        let store = MemoryStore::default();
        let mut cases = Vec::new();
        for i in 0..4 {
            let mut req = register_req("ada", "pw");
            match i {
                0 => req.full_name = None,
                1 => req.email = Some(String::new()),
                2 => req.username = None,
                _ => req.password = Some(String::new()),
            }
            cases.push(req);
        }
        for req in cases {
            let err = register(&store, req).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(ref m) if m == "All fields are required"));
        }
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn login_issues_token_for_correct_password() {
        let store = MemoryStore::default();
        let user = register(&store, register_req("ada", "analytical"))
            .await
            .expect("register");

        let keys = keys();
        let token = login(&store, &keys, login_req("ada", "analytical"))
            .await
            .expect("login");
        let claims = keys.verify(&token).expect("token verifies");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "ada");
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let store = MemoryStore::default();
        register(&store, register_req("ada", "analytical"))
            .await
            .expect("register");
        let keys = keys();

        let wrong_pw = login(&store, &keys, login_req("ada", "difference"))
            .await
            .unwrap_err();
        let unknown = login(&store, &keys, login_req("babbage", "analytical"))
            .await
            .unwrap_err();
        assert!(matches!(wrong_pw, AppError::InvalidCredentials));
        assert!(matches!(unknown, AppError::InvalidCredentials));
        assert_eq!(wrong_pw.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let store = MemoryStore::default();
        let err = login(
            &store,
            &keys(),
            LoginRequest {
                username: Some("ada".into()),
                password: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Username and password are required"));
    }

    #[tokio::test]
    async fn profile_omits_hash_and_reports_missing_user() {
        let store = MemoryStore::default();
        let user = register(&store, register_req("ada", "analytical"))
            .await
            .expect("register");

        let profile = profile(&store, user.id).await.expect("profile");
        assert_eq!(
            profile,
            ProfileResponse {
                full_name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                username: "ada".into(),
            }
        );
        let json = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert!(json.get("password_hash").is_none());

        let err = super::profile(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
