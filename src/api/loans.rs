//! Lending endpoints: loans, returns, reservations and penalties

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        loan::{CreateLoan, Loan, ReturnOutcome, UpdateLoan},
        penalty::{CreatePenalty, Penalty, UpdatePenalty},
        reservation::{CreateReservation, Reservation, UpdateReservation},
    },
    AppState,
};

use super::AuthenticatedUser;

/// List loans
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of loans", body = Vec<Loan>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_loans(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Loan>>> {
    Ok(Json(state.services.loans.list().await?))
}

/// Get a loan by ID
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan details", body = Loan),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Loan>> {
    Ok(Json(state.services.loans.get(id).await?))
}

/// Lend a copy to a member
///
/// The copy must be available and the member below the loan limit of their
/// member type. `due_date` defaults to the member type's loan duration.
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(data): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let created = state.services.loans.create(data, user.id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a loan
#[utoipa::path(
    patch,
    path = "/loans/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    request_body = UpdateLoan,
    responses(
        (status = 200, description = "Loan updated", body = Loan),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn update_loan(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLoan>,
) -> AppResult<Json<Loan>> {
    Ok(Json(state.services.loans.update(id, data).await?))
}

/// Delete a loan
#[utoipa::path(
    delete,
    path = "/loans/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Deleted loan", body = Loan),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn delete_loan(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Loan>> {
    Ok(Json(state.services.loans.delete(id).await?))
}

/// Return a lent copy
///
/// Frees the copy and, when the loan is overdue, records a late-return penalty.
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan returned", body = ReturnOutcome),
        (status = 400, description = "Loan already returned", body = crate::error::ErrorResponse),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn return_loan(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ReturnOutcome>> {
    Ok(Json(state.services.loans.return_loan(id, user.id).await?))
}

/// List reservations
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of reservations", body = Vec<Reservation>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Reservation>>> {
    Ok(Json(state.services.loans.list_reservations().await?))
}

/// Get a reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(state.services.loans.get_reservation(id).await?))
}

/// Create a reservation
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation created", body = Reservation),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(data): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let created = state.services.loans.create_reservation(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a reservation
#[utoipa::path(
    patch,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservation,
    responses(
        (status = 200, description = "Reservation updated", body = Reservation),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateReservation>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(state.services.loans.update_reservation(id, data).await?))
}

/// Delete a reservation
#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Deleted reservation", body = Reservation),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Reservation>> {
    Ok(Json(state.services.loans.delete_reservation(id).await?))
}

/// List penalties
#[utoipa::path(
    get,
    path = "/penalties",
    tag = "penalties",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of penalties", body = Vec<Penalty>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_penalties(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<Penalty>>> {
    Ok(Json(state.services.loans.list_penalties().await?))
}

/// Get a penalty by ID
#[utoipa::path(
    get,
    path = "/penalties/{id}",
    tag = "penalties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Penalty ID")),
    responses(
        (status = 200, description = "Penalty details", body = Penalty),
        (status = 404, description = "Penalty not found")
    )
)]
pub async fn get_penalty(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Penalty>> {
    Ok(Json(state.services.loans.get_penalty(id).await?))
}

/// Create a penalty
#[utoipa::path(
    post,
    path = "/penalties",
    tag = "penalties",
    security(("bearer_auth" = [])),
    request_body = CreatePenalty,
    responses(
        (status = 201, description = "Penalty created", body = Penalty),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_penalty(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(data): Json<CreatePenalty>,
) -> AppResult<(StatusCode, Json<Penalty>)> {
    let created = state.services.loans.create_penalty(data, user.id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a penalty
#[utoipa::path(
    patch,
    path = "/penalties/{id}",
    tag = "penalties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Penalty ID")),
    request_body = UpdatePenalty,
    responses(
        (status = 200, description = "Penalty updated", body = Penalty),
        (status = 400, description = "Invalid input, duplicate or unknown reference", body = crate::error::ErrorResponse),
        (status = 404, description = "Penalty not found")
    )
)]
pub async fn update_penalty(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdatePenalty>,
) -> AppResult<Json<Penalty>> {
    Ok(Json(state.services.loans.update_penalty(id, data).await?))
}

/// Delete a penalty
#[utoipa::path(
    delete,
    path = "/penalties/{id}",
    tag = "penalties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Penalty ID")),
    responses(
        (status = 200, description = "Deleted penalty", body = Penalty),
        (status = 404, description = "Penalty not found")
    )
)]
pub async fn delete_penalty(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Penalty>> {
    Ok(Json(state.services.loans.delete_penalty(id).await?))
}
