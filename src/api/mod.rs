//! API handlers for Biblio REST endpoints

pub mod auth;
pub mod catalog;
pub mod health;
pub mod loans;
pub mod members;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::User, AppState};

/// Extractor for the active user behind a bearer token
pub struct AuthenticatedUser(pub User);

/// Token part of an `Authorization: Bearer <token>` header
pub(crate) fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.services.auth.current_active_user(token).await?;
        Ok(AuthenticatedUser(user))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/register", post(auth::register))
        .route("/auth/token", post(auth::token))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        // Users, roles, permissions
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user).patch(users::update_user).delete(users::delete_user),
        )
        .route("/users/:id/roles", get(users::list_user_roles))
        .route(
            "/users/:id/roles/:role_id",
            put(users::assign_role).delete(users::remove_role),
        )
        .route("/roles", get(users::list_roles).post(users::create_role))
        .route(
            "/roles/:id",
            get(users::get_role).patch(users::update_role).delete(users::delete_role),
        )
        .route(
            "/roles/:id/permissions/:permission_id",
            put(users::grant_permission).delete(users::revoke_permission),
        )
        .route("/permissions", get(users::list_permissions).post(users::create_permission))
        .route(
            "/permissions/:id",
            get(users::get_permission)
                .patch(users::update_permission)
                .delete(users::delete_permission),
        )
        // Catalog
        .route("/authors", get(catalog::list_authors).post(catalog::create_author))
        .route(
            "/authors/:id",
            get(catalog::get_author).patch(catalog::update_author).delete(catalog::delete_author),
        )
        .route("/categories", get(catalog::list_categories).post(catalog::create_category))
        .route(
            "/categories/:id",
            get(catalog::get_category)
                .patch(catalog::update_category)
                .delete(catalog::delete_category),
        )
        .route("/categories/:id/children", get(catalog::list_category_children))
        .route("/publishers", get(catalog::list_publishers).post(catalog::create_publisher))
        .route(
            "/publishers/:id",
            get(catalog::get_publisher)
                .patch(catalog::update_publisher)
                .delete(catalog::delete_publisher),
        )
        .route("/locations", get(catalog::list_locations).post(catalog::create_location))
        .route(
            "/locations/:id",
            get(catalog::get_location)
                .patch(catalog::update_location)
                .delete(catalog::delete_location),
        )
        .route("/documents", get(catalog::list_documents).post(catalog::create_document))
        .route(
            "/documents/:id",
            get(catalog::get_document)
                .patch(catalog::update_document)
                .delete(catalog::delete_document),
        )
        .route("/copies", get(catalog::list_copies).post(catalog::create_copy))
        .route(
            "/copies/:id",
            get(catalog::get_copy).patch(catalog::update_copy).delete(catalog::delete_copy),
        )
        // Members
        .route("/member-types", get(members::list_member_types).post(members::create_member_type))
        .route(
            "/member-types/:id",
            get(members::get_member_type)
                .patch(members::update_member_type)
                .delete(members::delete_member_type),
        )
        .route("/members", get(members::list_members).post(members::create_member))
        .route(
            "/members/:id",
            get(members::get_member).patch(members::update_member).delete(members::delete_member),
        )
        .route("/members/:id/loans", get(members::list_member_loans))
        // Lending
        .route("/loans", get(loans::list_loans).post(loans::create_loan))
        .route(
            "/loans/:id",
            get(loans::get_loan).patch(loans::update_loan).delete(loans::delete_loan),
        )
        .route("/loans/:id/return", post(loans::return_loan))
        .route("/reservations", get(loans::list_reservations).post(loans::create_reservation))
        .route(
            "/reservations/:id",
            get(loans::get_reservation)
                .patch(loans::update_reservation)
                .delete(loans::delete_reservation),
        )
        .route("/penalties", get(loans::list_penalties).post(loans::create_penalty))
        .route(
            "/penalties/:id",
            get(loans::get_penalty).patch(loans::update_penalty).delete(loans::delete_penalty),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
