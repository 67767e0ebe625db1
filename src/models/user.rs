//! System user model, JWT claims and related types

use chrono::{DateTime, Utc};
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Staff account as stored in database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: bool,
    pub lastname: String,
    pub firstname: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub last_login_date: Option<DateTime<Utc>>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 3, max = 50, message = "Username must be 3 to 50 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub lastname: String,
    #[validate(length(min = 1, max = 100))]
    pub firstname: String,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

/// Partial update of a user
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 50, message = "Username must be 3 to 50 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub is_active: Option<bool>,
    #[validate(length(min = 1, max = 100))]
    pub lastname: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub firstname: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Username
    pub sub: String,
    pub user_id: i32,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Claims for `user`, valid from `now` for `expire_minutes`
    pub fn for_user(user: &User, now: DateTime<Utc>, expire_minutes: i64) -> Self {
        Self {
            sub: user.username.clone(),
            user_id: user.id,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::minutes(expire_minutes)).timestamp(),
        }
    }

    /// Create a new JWT token
    pub fn create_token(
        &self,
        secret: &str,
        algorithm: Algorithm,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::new(algorithm),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token (signature, expiry, required claims)
    pub fn from_token(
        token: &str,
        secret: &str,
        algorithm: Algorithm,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn sample_user() -> User {
        User {
            id: 42,
            username: "librarian".to_string(),
            email: "librarian@example.org".to_string(),
            password: String::new(),
            is_active: true,
            lastname: "Doe".to_string(),
            firstname: "Jane".to_string(),
            address: None,
            phone: None,
            last_login_date: None,
            crea_date: Utc::now(),
            modif_date: None,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let claims = UserClaims::for_user(&sample_user(), Utc::now(), 30);
        let token = claims.create_token(SECRET, Algorithm::HS256).unwrap();

        let decoded = UserClaims::from_token(&token, SECRET, Algorithm::HS256).unwrap();
        assert_eq!(decoded.sub, "librarian");
        assert_eq!(decoded.user_id, 42);
        assert_eq!(decoded.exp - decoded.iat, 30 * 60);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = UserClaims::for_user(&sample_user(), Utc::now(), 30);
        let token = claims.create_token(SECRET, Algorithm::HS256).unwrap();

        assert!(UserClaims::from_token(&token, "other-secret", Algorithm::HS256).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Well past the default 60s leeway
        let issued = Utc::now() - chrono::Duration::hours(2);
        let claims = UserClaims::for_user(&sample_user(), issued, 30);
        let token = claims.create_token(SECRET, Algorithm::HS256).unwrap();

        assert!(UserClaims::from_token(&token, SECRET, Algorithm::HS256).is_err());
    }

    #[test]
    fn test_missing_user_id_rejected() {
        #[derive(Serialize)]
        struct PartialClaims {
            sub: String,
            exp: i64,
            iat: i64,
        }

        let now = Utc::now().timestamp();
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &PartialClaims {
                sub: "librarian".to_string(),
                exp: now + 600,
                iat: now,
            },
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(UserClaims::from_token(&token, SECRET, Algorithm::HS256).is_err());
    }

    #[test]
    fn test_password_never_serialized() {
        let mut user = sample_user();
        user.password = "$2b$12$hash".to_string();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_register_validation() {
        let request = RegisterUser {
            username: "jd".to_string(),
            password: "short".to_string(),
            email: "not-an-email".to_string(),
            lastname: "Doe".to_string(),
            firstname: "John".to_string(),
            address: None,
            phone: None,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
    }
}
