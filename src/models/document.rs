//! Catalog document model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Document with the ids of its authors
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Document {
    pub id: i32,
    pub title: String,
    /// ISBN-10 or ISBN-13, unique when present
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub summary: Option<String>,
    pub category_id: i32,
    pub publisher_id: i32,
    /// System user who catalogued the document
    pub created_by: i32,
    pub author_ids: Vec<i32>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDocument {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10 to 13 characters"))]
    pub isbn: Option<String>,
    #[validate(range(min = 0, max = 9999))]
    pub publication_year: Option<i32>,
    pub summary: Option<String>,
    pub category_id: i32,
    pub publisher_id: i32,
    #[serde(default)]
    pub author_ids: Vec<i32>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDocument {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10 to 13 characters"))]
    pub isbn: Option<String>,
    #[validate(range(min = 0, max = 9999))]
    pub publication_year: Option<i32>,
    pub summary: Option<String>,
    pub category_id: Option<i32>,
    pub publisher_id: Option<i32>,
    /// Replaces the whole author list when provided
    pub author_ids: Option<Vec<i32>>,
}
