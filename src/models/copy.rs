//! Copy (physical instance of a document) model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::CopyStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Copy {
    pub id: i32,
    /// Inventory number, unique across the library
    pub inventory_number: String,
    /// Physical condition ("new", "good", "worn", ...)
    pub condition: String,
    pub status: CopyStatus,
    pub service_date: NaiveDate,
    pub location_id: i32,
    pub document_id: i32,
    pub added_by: i32,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCopy {
    #[validate(length(min = 1, max = 50))]
    pub inventory_number: String,
    #[validate(length(min = 1, max = 50))]
    pub condition: String,
    pub status: Option<CopyStatus>,
    /// Defaults to today
    pub service_date: Option<NaiveDate>,
    pub location_id: i32,
    pub document_id: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCopy {
    #[validate(length(min = 1, max = 50))]
    pub inventory_number: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub condition: Option<String>,
    pub status: Option<CopyStatus>,
    pub service_date: Option<NaiveDate>,
    pub location_id: Option<i32>,
    pub document_id: Option<i32>,
}
