//! Authentication endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::user::{RegisterUser, User},
    AppState,
};

use super::AuthenticatedUser;

/// JSON login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Username or e-mail address
    pub username: String,
    pub password: String,
}

/// OAuth2 password-flow form
#[derive(Deserialize, ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    pub email: String,
}

fn token_response(state: &AppState, access_token: String) -> TokenResponse {
    TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.services.auth.expires_in(),
    }
}

/// Register a new system user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Invalid input or duplicate username/email", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Obtain a token with the OAuth2 password flow (form encoded)
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "auth",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Inactive user account"),
        (status = 401, description = "Incorrect username or password")
    )
)]
pub async fn token(
    State(state): State<AppState>,
    Form(request): Form<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let (token, _) = state
        .services
        .auth
        .authenticate(&request.username, &request.password)
        .await?;
    Ok(Json(token_response(&state, token)))
}

/// Obtain a token with a JSON body
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Inactive user account"),
        (status = 401, description = "Incorrect username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let (token, _) = state
        .services
        .auth
        .authenticate(&request.username, &request.password)
        .await?;
    Ok(Json(token_response(&state, token)))
}

/// Log out. Tokens are stateless, so this only checks the caller's token.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(AuthenticatedUser(user): AuthenticatedUser) -> StatusCode {
    tracing::info!(user_id = user.id, "User logged out");
    StatusCode::NO_CONTENT
}

/// Issue a fresh token for the current user
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token refreshed", body = TokenResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> AppResult<Json<TokenResponse>> {
    let token = state.services.auth.issue_token(&user)?;
    Ok(Json(token_response(&state, token)))
}

/// Get the current user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

/// Request a password reset link
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "auth",
    params(EmailQuery),
    responses(
        (status = 204, description = "Reset requested"),
        (status = 404, description = "No user with this email")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<StatusCode> {
    state.services.auth.forgot_password(&query.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reset a password
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "auth",
    params(EmailQuery),
    responses(
        (status = 204, description = "Reset accepted"),
        (status = 404, description = "No user with this email")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<StatusCode> {
    state.services.auth.reset_password(&query.email).await?;
    Ok(StatusCode::NO_CONTENT)
}
