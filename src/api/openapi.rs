//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, catalog, health, loans, members, users};

/// Registers the `bearer_auth` scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblio API",
        version = "1.0.0",
        description = "Library management REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&SecurityAddon),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::token,
        auth::login,
        auth::logout,
        auth::refresh,
        auth::me,
        auth::forgot_password,
        auth::reset_password,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        users::list_user_roles,
        users::assign_role,
        users::remove_role,
        // Roles and permissions
        users::list_roles,
        users::get_role,
        users::create_role,
        users::update_role,
        users::delete_role,
        users::grant_permission,
        users::revoke_permission,
        users::list_permissions,
        users::get_permission,
        users::create_permission,
        users::update_permission,
        users::delete_permission,
        // Catalog
        catalog::list_authors,
        catalog::get_author,
        catalog::create_author,
        catalog::update_author,
        catalog::delete_author,
        catalog::list_categories,
        catalog::get_category,
        catalog::create_category,
        catalog::update_category,
        catalog::delete_category,
        catalog::list_category_children,
        catalog::list_publishers,
        catalog::get_publisher,
        catalog::create_publisher,
        catalog::update_publisher,
        catalog::delete_publisher,
        catalog::list_locations,
        catalog::get_location,
        catalog::create_location,
        catalog::update_location,
        catalog::delete_location,
        catalog::list_documents,
        catalog::get_document,
        catalog::create_document,
        catalog::update_document,
        catalog::delete_document,
        catalog::list_copies,
        catalog::get_copy,
        catalog::create_copy,
        catalog::update_copy,
        catalog::delete_copy,
        // Members
        members::list_member_types,
        members::get_member_type,
        members::create_member_type,
        members::update_member_type,
        members::delete_member_type,
        members::list_members,
        members::get_member,
        members::create_member,
        members::update_member,
        members::delete_member,
        members::list_member_loans,
        // Lending
        loans::list_loans,
        loans::get_loan,
        loans::create_loan,
        loans::update_loan,
        loans::delete_loan,
        loans::return_loan,
        loans::list_reservations,
        loans::get_reservation,
        loans::create_reservation,
        loans::update_reservation,
        loans::delete_reservation,
        loans::list_penalties,
        loans::get_penalty,
        loans::create_penalty,
        loans::update_penalty,
        loans::delete_penalty,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::TokenRequest,
            auth::TokenResponse,
            // Users
            crate::models::user::User,
            crate::models::user::RegisterUser,
            crate::models::user::UpdateUser,
            crate::models::role::Role,
            crate::models::role::RoleDetails,
            crate::models::role::Permission,
            crate::models::role::NamePayload,
            crate::models::role::UpdateNamePayload,
            // Catalog
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            crate::models::publisher::Publisher,
            crate::models::publisher::CreatePublisher,
            crate::models::publisher::UpdatePublisher,
            crate::models::location::Location,
            crate::models::location::CreateLocation,
            crate::models::location::UpdateLocation,
            crate::models::document::Document,
            crate::models::document::CreateDocument,
            crate::models::document::UpdateDocument,
            crate::models::copy::Copy,
            crate::models::copy::CreateCopy,
            crate::models::copy::UpdateCopy,
            crate::models::enums::CopyStatus,
            // Members
            crate::models::member::MemberType,
            crate::models::member::CreateMemberType,
            crate::models::member::UpdateMemberType,
            crate::models::member::Member,
            crate::models::member::CreateMember,
            crate::models::member::UpdateMember,
            // Lending
            crate::models::loan::Loan,
            crate::models::loan::CreateLoan,
            crate::models::loan::UpdateLoan,
            crate::models::loan::ReturnOutcome,
            crate::models::reservation::Reservation,
            crate::models::reservation::CreateReservation,
            crate::models::reservation::UpdateReservation,
            crate::models::enums::ReservationStatus,
            crate::models::penalty::Penalty,
            crate::models::penalty::CreatePenalty,
            crate::models::penalty::UpdatePenalty,
            crate::models::enums::PenaltyStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "System user management"),
        (name = "roles", description = "Roles and permissions"),
        (name = "authors", description = "Authors"),
        (name = "categories", description = "Category hierarchy"),
        (name = "publishers", description = "Publishers"),
        (name = "locations", description = "Shelf locations"),
        (name = "documents", description = "Catalog documents"),
        (name = "copies", description = "Physical copies"),
        (name = "members", description = "Members and member types"),
        (name = "loans", description = "Loans and returns"),
        (name = "reservations", description = "Reservations"),
        (name = "penalties", description = "Penalties")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
