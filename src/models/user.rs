//! User account, session and token types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// User account from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserAccount {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    /// Set on accounts created by an administrator; cleared by the first password change
    pub must_change_password: bool,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
}

/// Self-service sign-up request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
}

/// Sign-in request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
}

/// Sign-in response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    /// When true, only the password change endpoint is usable until the password is updated
    pub must_change_password: bool,
    pub user: UserAccount,
}

/// Password update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Administrator-created account request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Temporary password, must be changed at first login
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub full_name: Option<String>,
    pub is_admin: Option<bool>,
}

/// Server-side session record, stored in Redis under `session:<session_id>`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub is_admin: bool,
    pub must_change_password: bool,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &UserAccount, session_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            user_id: user.user_id,
            email: user.email.clone(),
            is_admin: user.is_admin,
            must_change_password: user.must_change_password,
            expires_at,
        }
    }

    /// Reject sessions still waiting for a first password change
    pub fn require_password_current(&self) -> Result<(), AppError> {
        if self.must_change_password {
            Err(AppError::PasswordChangeRequired)
        } else {
            Ok(())
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }
}

/// JWT claims; the session itself lives server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub sub: Uuid,
    /// Session ID
    pub sid: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(must_change: bool, admin: bool) -> Session {
        Session {
            session_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            email: "tech@example.org".to_string(),
            is_admin: admin,
            must_change_password: must_change,
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            sid: Uuid::new_v4(),
            exp: now + 3600,
            iat: now,
        };
        let token = claims.create_token("secret").unwrap();
        let parsed = SessionClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.sub, claims.sub);
        assert_eq!(parsed.sid, claims.sid);
        assert!(SessionClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            sid: Uuid::new_v4(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = claims.create_token("secret").unwrap();
        assert!(SessionClaims::from_token(&token, "secret").is_err());
    }

    #[test]
    fn test_password_gate() {
        assert!(session(false, false).require_password_current().is_ok());
        assert!(matches!(
            session(true, false).require_password_current(),
            Err(AppError::PasswordChangeRequired)
        ));
    }

    #[test]
    fn test_admin_gate() {
        assert!(session(false, true).require_admin().is_ok());
        assert!(matches!(
            session(false, false).require_admin(),
            Err(AppError::Authorization(_))
        ));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = UserAccount {
            user_id: Uuid::new_v4(),
            email: "a@b.org".to_string(),
            full_name: None,
            password_hash: "$argon2id$...".to_string(),
            is_admin: false,
            must_change_password: false,
            password_changed_at: None,
            created_date: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@b.org");
    }
}
