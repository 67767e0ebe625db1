//! Authentication service: password hashing, tokens and session checks

use std::str::FromStr;

use chrono::Utc;
use jsonwebtoken::Algorithm;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{RegisterUser, User, UserClaims},
    repository::Repository,
};

/// Hash a password with bcrypt at the given cost
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    bcrypt::hash(password, cost).map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a bcrypt hash. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    algorithm: Algorithm,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> AppResult<Self> {
        let algorithm = Algorithm::from_str(&config.jwt_algorithm).map_err(|_| {
            AppError::Internal(format!("Unsupported JWT algorithm: {}", config.jwt_algorithm))
        })?;
        Ok(Self {
            repository,
            config,
            algorithm,
        })
    }

    /// Token lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.config.access_token_expire_minutes * 60
    }

    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        hash_password(password, self.config.bcrypt_cost)
    }

    /// Sign a fresh access token for `user`
    pub fn issue_token(&self, user: &User) -> AppResult<String> {
        UserClaims::for_user(user, Utc::now(), self.config.access_token_expire_minutes)
            .create_token(&self.config.jwt_secret, self.algorithm)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify token signature and expiry
    pub fn decode_token(&self, token: &str) -> AppResult<UserClaims> {
        UserClaims::from_token(token, &self.config.jwt_secret, self.algorithm)
            .map_err(|_| AppError::Authentication("Could not validate credentials".to_string()))
    }

    /// Resolve the active user behind a bearer token
    pub async fn current_active_user(&self, token: &str) -> AppResult<User> {
        let claims = self.decode_token(token)?;

        let user = self
            .repository
            .users
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::Authentication("Could not validate credentials".to_string()))?;

        if !user.is_active {
            return Err(AppError::BadRequest("Inactive user account".to_string()));
        }

        Ok(user)
    }

    /// Check credentials and return a token with the matching user.
    /// `identifier` is a username, or an e-mail address as fallback.
    pub async fn authenticate(&self, identifier: &str, password: &str) -> AppResult<(String, User)> {
        let user = match self.repository.users.get_by_username(identifier).await? {
            Some(user) => Some(user),
            None => self.repository.users.get_by_email(identifier).await?,
        };

        let user = user
            .filter(|u| verify_password(password, &u.password))
            .ok_or_else(|| AppError::Authentication("Incorrect username or password".to_string()))?;

        if !user.is_active {
            return Err(AppError::BadRequest("Inactive user account".to_string()));
        }

        self.repository.users.touch_last_login(user.id).await?;
        let token = self.issue_token(&user)?;

        tracing::info!(user_id = user.id, username = %user.username, "User logged in");

        Ok((token, user))
    }

    /// Create a new system user account
    pub async fn register(&self, data: RegisterUser) -> AppResult<User> {
        data.validate()?;
        if self.repository.users.username_exists(&data.username, None).await? {
            return Err(AppError::BusinessRule("Username already registered".to_string()));
        }
        if self.repository.users.email_exists(&data.email, None).await? {
            return Err(AppError::BusinessRule("Email already registered".to_string()));
        }

        let hash = self.hash_password(&data.password)?;
        let user = self.repository.users.create(&data, &hash).await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Password reset request; no mail transport is wired, the request is only logged
    pub async fn forgot_password(&self, email: &str) -> AppResult<()> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("No user with this email".to_string()))?;

        tracing::info!(user_id = user.id, "Password reset requested");
        Ok(())
    }

    /// Password reset confirmation; accepted and logged only
    pub async fn reset_password(&self, email: &str) -> AppResult<()> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("No user with this email".to_string()))?;

        tracing::info!(user_id = user.id, "Password reset submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse", 4).unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("same password", 4).unwrap();
        let second = hash_password("same password", 4).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
