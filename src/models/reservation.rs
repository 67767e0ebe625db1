//! Reservation model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::ReservationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reservation {
    pub id: i32,
    pub member_id: i32,
    pub document_id: i32,
    pub reservation_date: DateTime<Utc>,
    pub status: ReservationStatus,
    /// Last status change
    pub status_date: DateTime<Utc>,
    /// When a copy was set aside for the member
    pub available_date: Option<DateTime<Utc>>,
    /// End of the hold on the set-aside copy
    pub hold_expiry_date: Option<DateTime<Utc>>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservation {
    pub member_id: i32,
    pub document_id: i32,
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReservation {
    pub status: Option<ReservationStatus>,
    pub available_date: Option<DateTime<Utc>>,
    pub hold_expiry_date: Option<DateTime<Utc>>,
}
