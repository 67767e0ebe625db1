//! Member and member type endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        loan::Loan,
        member::{CreateMember, CreateMemberType, Member, MemberType, UpdateMember, UpdateMemberType},
    },
    AppState,
};

use super::AuthenticatedUser;

/// List member types
#[utoipa::path(
    get,
    path = "/member-types",
    tag = "members",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of member types", body = Vec<MemberType>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_member_types(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<MemberType>>> {
    Ok(Json(state.services.members.list_types().await?))
}

/// Get a member type by ID
#[utoipa::path(
    get,
    path = "/member-types/{id}",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Member type ID")),
    responses(
        (status = 200, description = "Member type details", body = MemberType),
        (status = 404, description = "Member type not found")
    )
)]
pub async fn get_member_type(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MemberType>> {
    Ok(Json(state.services.members.get_type(id).await?))
}

/// Create a member type
#[utoipa::path(
    post,
    path = "/member-types",
    tag = "members",
    security(("bearer_auth" = [])),
    request_body = CreateMemberType,
    responses(
        (status = 201, description = "Member type created", body = MemberType),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_member_type(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(data): Json<CreateMemberType>,
) -> AppResult<(StatusCode, Json<MemberType>)> {
    let created = state.services.members.create_type(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a member type
#[utoipa::path(
    patch,
    path = "/member-types/{id}",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Member type ID")),
    request_body = UpdateMemberType,
    responses(
        (status = 200, description = "Member type updated", body = MemberType),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Member type not found")
    )
)]
pub async fn update_member_type(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMemberType>,
) -> AppResult<Json<MemberType>> {
    Ok(Json(state.services.members.update_type(id, data).await?))
}

/// Delete a member type that no member uses
#[utoipa::path(
    delete,
    path = "/member-types/{id}",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Member type ID")),
    responses(
        (status = 200, description = "Deleted member type", body = MemberType),
        (status = 404, description = "Member type not found")
    )
)]
pub async fn delete_member_type(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MemberType>> {
    Ok(Json(state.services.members.delete_type(id).await?))
}

/// List members
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of members", body = Vec<Member>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Member>>> {
    Ok(Json(state.services.members.list().await?))
}

/// Get a member by ID
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member details", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Member>> {
    Ok(Json(state.services.members.get(id).await?))
}

/// Create a member
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    security(("bearer_auth" = [])),
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(data): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    let created = state.services.members.create(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a member
#[utoipa::path(
    patch,
    path = "/members/{id}",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Member ID")),
    request_body = UpdateMember,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Member not found")
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMember>,
) -> AppResult<Json<Member>> {
    Ok(Json(state.services.members.update(id, data).await?))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Deleted member", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_member(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Member>> {
    Ok(Json(state.services.members.delete(id).await?))
}

/// List the loans of a member, open loans first
#[utoipa::path(
    get,
    path = "/members/{id}/loans",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Loans of the member", body = Vec<Loan>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn list_member_loans(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Loan>>> {
    Ok(Json(state.services.members.loans(id).await?))
}
