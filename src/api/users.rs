//! System users, roles and permissions endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        role::{NamePayload, Permission, Role, RoleDetails, UpdateNamePayload},
        user::{RegisterUser, UpdateUser, User},
    },
    AppState,
};

use super::AuthenticatedUser;

/// List system users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.services.users.list().await?))
}

/// Get user details by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    Ok(Json(state.services.users.get(id).await?))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input or duplicate username/email")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(user): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let created = state.services.users.create(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing user
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid input or duplicate username/email"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(user): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    Ok(Json(state.services.users.update(id, user).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted user", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    Ok(Json(state.services.users.delete(id).await?))
}

/// List the roles of a user
#[utoipa::path(
    get,
    path = "/users/{id}/roles",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Roles of the user", body = Vec<Role>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_roles(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Role>>> {
    Ok(Json(state.services.users.roles_of(id).await?))
}

/// Assign a role to a user
#[utoipa::path(
    put,
    path = "/users/{id}/roles/{role_id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID"),
        ("role_id" = i32, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Roles of the user", body = Vec<Role>),
        (status = 404, description = "User or role not found")
    )
)]
pub async fn assign_role(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path((id, role_id)): Path<(i32, i32)>,
) -> AppResult<Json<Vec<Role>>> {
    Ok(Json(state.services.users.assign_role(id, role_id).await?))
}

/// Remove a role from a user
#[utoipa::path(
    delete,
    path = "/users/{id}/roles/{role_id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID"),
        ("role_id" = i32, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Roles of the user", body = Vec<Role>),
        (status = 404, description = "User not found or role not assigned")
    )
)]
pub async fn remove_role(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path((id, role_id)): Path<(i32, i32)>,
) -> AppResult<Json<Vec<Role>>> {
    Ok(Json(state.services.users.remove_role(id, role_id).await?))
}

/// List roles
#[utoipa::path(
    get,
    path = "/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "List of roles", body = Vec<Role>))
)]
pub async fn list_roles(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Role>>> {
    Ok(Json(state.services.users.list_roles().await?))
}

/// Get a role with its permissions
#[utoipa::path(
    get,
    path = "/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role details", body = RoleDetails),
        (status = 404, description = "Role not found")
    )
)]
pub async fn get_role(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RoleDetails>> {
    Ok(Json(state.services.users.get_role(id).await?))
}

/// Create a role
#[utoipa::path(
    post,
    path = "/roles",
    tag = "roles",
    security(("bearer_auth" = [])),
    request_body = NamePayload,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Invalid input or duplicate name")
    )
)]
pub async fn create_role(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(data): Json<NamePayload>,
) -> AppResult<(StatusCode, Json<Role>)> {
    let role = state.services.users.create_role(data).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Rename a role
#[utoipa::path(
    patch,
    path = "/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Role ID")),
    request_body = UpdateNamePayload,
    responses(
        (status = 200, description = "Role updated", body = Role),
        (status = 404, description = "Role not found")
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateNamePayload>,
) -> AppResult<Json<Role>> {
    Ok(Json(state.services.users.update_role(id, data).await?))
}

/// Delete a role
#[utoipa::path(
    delete,
    path = "/roles/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Deleted role", body = Role),
        (status = 404, description = "Role not found")
    )
)]
pub async fn delete_role(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Role>> {
    Ok(Json(state.services.users.delete_role(id).await?))
}

/// Grant a permission to a role
#[utoipa::path(
    put,
    path = "/roles/{id}/permissions/{permission_id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Role ID"),
        ("permission_id" = i32, Path, description = "Permission ID")
    ),
    responses(
        (status = 200, description = "Role with its permissions", body = RoleDetails),
        (status = 404, description = "Role or permission not found")
    )
)]
pub async fn grant_permission(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path((id, permission_id)): Path<(i32, i32)>,
) -> AppResult<Json<RoleDetails>> {
    Ok(Json(state.services.users.grant_permission(id, permission_id).await?))
}

/// Revoke a permission from a role
#[utoipa::path(
    delete,
    path = "/roles/{id}/permissions/{permission_id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Role ID"),
        ("permission_id" = i32, Path, description = "Permission ID")
    ),
    responses(
        (status = 200, description = "Role with its permissions", body = RoleDetails),
        (status = 404, description = "Role not found or permission not granted")
    )
)]
pub async fn revoke_permission(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path((id, permission_id)): Path<(i32, i32)>,
) -> AppResult<Json<RoleDetails>> {
    Ok(Json(state.services.users.revoke_permission(id, permission_id).await?))
}

/// List permissions
#[utoipa::path(
    get,
    path = "/permissions",
    tag = "roles",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "List of permissions", body = Vec<Permission>))
)]
pub async fn list_permissions(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Permission>>> {
    Ok(Json(state.services.users.list_permissions().await?))
}

/// Get a permission
#[utoipa::path(
    get,
    path = "/permissions/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Permission ID")),
    responses(
        (status = 200, description = "Permission", body = Permission),
        (status = 404, description = "Permission not found")
    )
)]
pub async fn get_permission(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Permission>> {
    Ok(Json(state.services.users.get_permission(id).await?))
}

/// Create a permission
#[utoipa::path(
    post,
    path = "/permissions",
    tag = "roles",
    security(("bearer_auth" = [])),
    request_body = NamePayload,
    responses(
        (status = 201, description = "Permission created", body = Permission),
        (status = 400, description = "Invalid input or duplicate name")
    )
)]
pub async fn create_permission(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(data): Json<NamePayload>,
) -> AppResult<(StatusCode, Json<Permission>)> {
    let permission = state.services.users.create_permission(data).await?;
    Ok((StatusCode::CREATED, Json(permission)))
}

/// Rename a permission
#[utoipa::path(
    patch,
    path = "/permissions/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Permission ID")),
    request_body = UpdateNamePayload,
    responses(
        (status = 200, description = "Permission updated", body = Permission),
        (status = 404, description = "Permission not found")
    )
)]
pub async fn update_permission(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateNamePayload>,
) -> AppResult<Json<Permission>> {
    Ok(Json(state.services.users.update_permission(id, data).await?))
}

/// Delete a permission
#[utoipa::path(
    delete,
    path = "/permissions/{id}",
    tag = "roles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Permission ID")),
    responses(
        (status = 200, description = "Deleted permission", body = Permission),
        (status = 404, description = "Permission not found")
    )
)]
pub async fn delete_permission(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Permission>> {
    Ok(Json(state.services.users.delete_permission(id).await?))
}
