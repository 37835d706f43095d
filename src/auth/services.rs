use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, warn};

use super::{
    dto::{RegisterRequest, TokenResponse},
    errors::AuthError,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::UserStore,
    repo_types::{NewUser, User},
};

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 100;
const MIN_PASSWORD_LEN: usize = 6;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    // Verified against when the email is unknown so both login failures cost the same.
    static ref DUMMY_HASH: String = hash_password("not-a-real-password").unwrap_or_default();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates, hashes and stores a new account.
pub async fn register(users: &dyn UserStore, req: RegisterRequest) -> Result<User, AuthError> {
    let email = normalize_email(&req.email);
    let full_name = req.full_name.trim().to_string();

    if full_name.is_empty() || full_name.chars().count() > MAX_NAME_LEN {
        return Err(AuthError::InvalidInput(format!(
            "full_name must be between 1 and {MAX_NAME_LEN} characters"
        )));
    }
    if email.len() > MAX_EMAIL_LEN || !is_valid_email(&email) {
        return Err(AuthError::InvalidInput("Invalid email".into()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AuthError::EmailTaken);
    }

    let password_hash = hash_password(&req.password)?;
    let user = users
        .create(NewUser {
            full_name,
            email,
            password_hash,
            role: req.role.as_str().to_string(),
        })
        .await?;

    info!(user_id = user.user_id, email = %user.email, "user registered");
    Ok(user)
}

/// Exchanges an email/password pair for a bearer token.
///
/// Unknown email and wrong password are the same `InvalidCredentials`. The
/// last-login write happens after the token is minted and never fails the login.
pub async fn login(
    keys: &JwtKeys,
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<TokenResponse, AuthError> {
    let email = normalize_email(email);

    let user = match users.find_by_email(&email).await? {
        Some(u) => u,
        None => {
            let _ = verify_password(password, &DUMMY_HASH);
            warn!(email = %email, "login failed");
            return Err(AuthError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password_hash) {
        warn!(email = %email, "login failed");
        return Err(AuthError::InvalidCredentials);
    }

    let token = keys.issue_for_subject(&user.email)?;

    if let Err(e) = users
        .touch_last_login(user.user_id, OffsetDateTime::now_utc())
        .await
    {
        warn!(error = %e, user_id = user.user_id, "failed to record last login");
    }

    info!(user_id = user.user_id, "user logged in");
    Ok(TokenResponse::bearer(token))
}

/// Verifies a bearer token and loads the user it names.
///
/// Every rejection (bad token, missing subject, vanished user) is the same
/// `Unauthenticated`; only a store outage surfaces differently.
pub async fn resolve_current_user(
    keys: &JwtKeys,
    users: &dyn UserStore,
    token: &str,
) -> Result<User, AuthError> {
    let claims = keys.verify(token).map_err(|_| AuthError::Unauthenticated)?;
    let email = claims.sub.ok_or(AuthError::Unauthenticated)?;
    match users.find_by_email(&email).await? {
        Some(user) => Ok(user),
        None => {
            warn!("token subject no longer exists");
            Err(AuthError::Unauthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jsonwebtoken::Header;
    use serde_json::Map;

    use super::*;
    use crate::auth::{
        claims::Claims,
        dto::Role,
        jwt::{flip_signature_byte, ALGORITHM},
        repo::memory::MemoryUserStore,
    };
    use crate::config::JwtConfig;

    fn keys() -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: "test-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 5,
        })
    }

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: "Test User".into(),
            email: email.into(),
            password: password.into(),
            role: Role::Free,
        }
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("x@y.com"));
        assert!(!is_valid_email("x@y"));
        assert!(!is_valid_email("no at sign.com"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn register_normalizes_and_hides_password() {
        let store = MemoryUserStore::new();
        let user = register(&store, request("  X@Y.com ", "secret123"))
            .await
            .unwrap();
        assert_eq!(user.email, "x@y.com");
        assert_eq!(user.role, "free");
        assert_ne!(user.password_hash, "secret123");
        assert!(verify_password("secret123", &user.password_hash));
    }

    #[tokio::test]
    async fn register_twice_is_email_taken() {
        let store = MemoryUserStore::new();
        register(&store, request("x@y.com", "secret123")).await.unwrap();
        let err = register(&store, request("x@y.com", "other-pass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn register_rejects_bad_input() {
        let store = MemoryUserStore::new();
        for req in [
            request("not-an-email", "secret123"),
            request("x@y.com", "short"),
            RegisterRequest {
                full_name: "   ".into(),
                ..request("x@y.com", "secret123")
            },
        ] {
            let err = register(&store, req).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn login_issues_resolvable_token_and_records_last_login() {
        let store = MemoryUserStore::new();
        let user = register(&store, request("x@y.com", "secret123")).await.unwrap();
        let keys = keys();

        let resp = login(&keys, &store, "X@Y.com", "secret123").await.unwrap();
        assert_eq!(resp.token_type, "bearer");

        let current = resolve_current_user(&keys, &store, &resp.access_token)
            .await
            .unwrap();
        assert_eq!(current.user_id, user.user_id);
        assert!(store.get(user.user_id).unwrap().last_login.is_some());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let store = MemoryUserStore::new();
        register(&store, request("x@y.com", "secret123")).await.unwrap();
        let keys = keys();

        for _ in 0..3 {
            let err = login(&keys, &store, "x@y.com", "wrong-pass").await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
        let err = login(&keys, &store, "nobody@y.com", "secret123")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn failing_last_login_write_does_not_fail_login() {
        let store = MemoryUserStore::with_failing_last_login();
        register(&store, request("x@y.com", "secret123")).await.unwrap();
        let resp = login(&keys(), &store, "x@y.com", "secret123").await;
        assert!(resp.is_ok());
    }

    #[tokio::test]
    async fn store_outage_is_not_reported_as_bad_credentials() {
        let store = MemoryUserStore::with_failing_lookups();
        let keys = keys();

        let err = login(&keys, &store, "x@y.com", "secret123").await.unwrap_err();
        assert!(matches!(err, AuthError::Unavailable(_)));

        let token = keys.issue_for_subject("x@y.com").unwrap();
        let err = resolve_current_user(&keys, &store, &token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unavailable(_)));
    }

    #[tokio::test]
    async fn tampered_and_expired_tokens_fail_alike() {
        let store = MemoryUserStore::new();
        register(&store, request("x@y.com", "secret123")).await.unwrap();
        let keys = keys();

        let good = keys.issue_for_subject("x@y.com").unwrap();
        let tampered = flip_signature_byte(&good);
        let mut claims = Map::new();
        claims.insert("sub".into(), "x@y.com".into());
        let expired = keys.issue(claims, Some(Duration::ZERO)).unwrap();

        let a = resolve_current_user(&keys, &store, &tampered).await.unwrap_err();
        let b = resolve_current_user(&keys, &store, &expired).await.unwrap_err();
        assert!(matches!(a, AuthError::Unauthenticated));
        assert!(matches!(b, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn token_without_subject_is_unauthenticated() {
        let store = MemoryUserStore::new();
        let keys = keys();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let token = keys.sign_raw(
            &Header::new(ALGORITHM),
            &Claims {
                sub: None,
                exp: now + 600,
                iat: now,
                iss: keys.issuer.clone(),
                aud: keys.audience.clone(),
                extra: Map::new(),
            },
        );
        let err = resolve_current_user(&keys, &store, &token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn deleted_user_token_is_unauthenticated() {
        let store = MemoryUserStore::new();
        register(&store, request("x@y.com", "secret123")).await.unwrap();
        let keys = keys();
        let resp = login(&keys, &store, "x@y.com", "secret123").await.unwrap();

        let user = store.find_by_email("x@y.com").await.unwrap().unwrap();
        assert!(store.delete(user.user_id).await.unwrap());

        let err = resolve_current_user(&keys, &store, &resp.access_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }
}
