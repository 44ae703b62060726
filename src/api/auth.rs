//! Authentication and account endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{
        ChangePasswordRequest, CreateUserRequest, LoginRequest, LoginResponse, SignUpRequest,
        UserAccount,
    },
    AppState,
};

use super::{AuthenticatedUser, CurrentSession};

/// Create an account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = UserAccount),
        (status = 403, description = "Self sign-up disabled", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<UserAccount>)> {
    request.validate()?;
    let user = state.services.auth.signup(&request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    request.validate()?;
    let response = state.services.auth.login(&request).await?;
    Ok(Json(response))
}

/// Sign out (revokes the session)
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Signed out")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<StatusCode> {
    state.services.auth.logout(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current account
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = UserAccount),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<UserAccount>> {
    let user = state.services.auth.me(&session).await?;
    Ok(Json(user))
}

/// Change the password of the current account
#[utoipa::path(
    put,
    path = "/auth/password",
    tag = "auth",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = UserAccount),
        (status = 401, description = "Current password incorrect", body = crate::error::ErrorResponse)
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<ChangePasswordRequest>,
) -> AppResult<Json<UserAccount>> {
    request.validate()?;
    let user = state.services.auth.change_password(&session, &request).await?;
    Ok(Json(user))
}

/// Create an account on behalf of a user (administrators only)
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created; password change required at first login", body = UserAccount),
        (status = 403, description = "Not an administrator", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserAccount>)> {
    session.require_admin()?;
    request.validate()?;
    let user = state.services.auth.create_user(&request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
