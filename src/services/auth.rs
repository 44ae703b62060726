//! Authentication, sessions and account management

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::sessions::SessionStore;
use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{
        ChangePasswordRequest, CreateUserRequest, LoginRequest, LoginResponse, Session,
        SessionClaims, SignUpRequest, UserAccount,
    },
    repository::{users::NewUserAccount, Repository},
};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// How a new account obtains administrator rights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminGrant {
    Never,
    Always,
    /// Only when the account table is still empty at insert time
    IfFirstAccount,
}

impl From<bool> for AdminGrant {
    fn from(is_admin: bool) -> Self {
        if is_admin {
            AdminGrant::Always
        } else {
            AdminGrant::Never
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig, sessions: SessionStore) -> Self {
        Self { repository, config, sessions }
    }

    /// Self-service sign-up. The very first account becomes an administrator.
    pub async fn signup(&self, request: &SignUpRequest) -> AppResult<UserAccount> {
        if !self.config.allow_self_signup {
            return Err(AppError::Authorization("Self sign-up is disabled".to_string()));
        }

        let user = self
            .create_account(
                &request.email,
                request.full_name.as_deref(),
                &request.password,
                AdminGrant::IfFirstAccount,
                false,
            )
            .await?;

        tracing::info!(user_id = %user.user_id, admin = user.is_admin, "Account created by sign-up");
        Ok(user)
    }

    /// Administrator-created account; the holder must change the password at first login
    pub async fn create_user(&self, request: &CreateUserRequest) -> AppResult<UserAccount> {
        let user = self
            .create_account(
                &request.email,
                request.full_name.as_deref(),
                &request.password,
                AdminGrant::from(request.is_admin.unwrap_or(false)),
                true,
            )
            .await?;

        tracing::info!(user_id = %user.user_id, "Account created by administrator");
        Ok(user)
    }

    async fn create_account(
        &self,
        email: &str,
        full_name: Option<&str>,
        password: &str,
        admin: AdminGrant,
        must_change_password: bool,
    ) -> AppResult<UserAccount> {
        if self.repository.users.email_exists(email).await? {
            return Err(AppError::Conflict("An account with this email already exists".to_string()));
        }

        let password_hash = hash_password(password)?;
        self.repository
            .users
            .create(&NewUserAccount {
                email,
                full_name,
                password_hash: &password_hash,
                is_admin: admin == AdminGrant::Always,
                admin_if_first: admin == AdminGrant::IfFirstAccount,
                must_change_password,
            })
            .await
    }

    /// Check credentials, open a session and issue its token
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let user = self
            .repository
            .users
            .get_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !verify_password(&user.password_hash, &request.password)? {
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        let now = Utc::now();
        let lifetime = i64::try_from(self.config.jwt_expiration_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| AppError::Internal("Session lifetime out of range".to_string()))?;
        let expires_at = now + lifetime;
        let session = Session::for_user(&user, Uuid::new_v4(), expires_at);
        self.sessions.save(&session).await?;

        let claims = SessionClaims {
            sub: user.user_id,
            sid: session.session_id,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(user_id = %user.user_id, session_id = %session.session_id, "User signed in");

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_at,
            must_change_password: user.must_change_password,
            user,
        })
    }

    /// Resolve a bearer token to its live session
    pub async fn authenticate(&self, token: &str) -> AppResult<Session> {
        let claims = SessionClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        let session = self
            .sessions
            .load(claims.sid)
            .await?
            .ok_or_else(|| AppError::Authentication("Session expired or revoked".to_string()))?;

        if session.user_id != claims.sub {
            return Err(AppError::Authentication("Session does not match token".to_string()));
        }
        Ok(session)
    }

    /// Revoke the session
    pub async fn logout(&self, session: &Session) -> AppResult<()> {
        self.sessions.remove(session).await?;
        tracing::info!(user_id = %session.user_id, session_id = %session.session_id, "User signed out");
        Ok(())
    }

    pub async fn me(&self, session: &Session) -> AppResult<UserAccount> {
        self.repository.users.get_by_id(session.user_id).await
    }

    /// Replace the password, revoke the user's other sessions and lift the
    /// forced-change flag on the current one
    pub async fn change_password(
        &self,
        session: &Session,
        request: &ChangePasswordRequest,
    ) -> AppResult<UserAccount> {
        let user = self.repository.users.get_by_id(session.user_id).await?;

        if !verify_password(&user.password_hash, &request.current_password)? {
            return Err(AppError::Authentication("Current password is incorrect".to_string()));
        }
        if request.new_password == request.current_password {
            return Err(AppError::Validation(
                "New password must differ from the current password".to_string(),
            ));
        }

        let password_hash = hash_password(&request.new_password)?;
        let user = self
            .repository
            .users
            .update_password(user.user_id, &password_hash)
            .await?;

        let refreshed = Session {
            must_change_password: false,
            ..session.clone()
        };
        let revoked = self
            .sessions
            .remove_others(user.user_id, session.session_id)
            .await?;
        self.sessions.save(&refreshed).await?;

        tracing::info!(user_id = %user.user_id, revoked, "Password changed");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "correct horse").unwrap());
        assert!(!verify_password(&hash, "battery staple").unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_admin_grant_from_request_flag() {
        assert_eq!(AdminGrant::from(true), AdminGrant::Always);
        assert_eq!(AdminGrant::from(false), AdminGrant::Never);
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        assert!(matches!(
            verify_password("not-a-hash", "anything"),
            Err(AppError::Internal(_))
        ));
    }
}
