//! Loan model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub member_id: i32,
    pub copy_id: i32,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    /// Set once the copy is back
    pub returned_date: Option<DateTime<Utc>>,
    pub lent_by: i32,
    pub returned_by: Option<i32>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Loan {
    pub fn is_open(&self) -> bool {
        self.returned_date.is_none()
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && self.due_date < now
    }
}

/// Create loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLoan {
    pub member_id: i32,
    pub copy_id: i32,
    /// Defaults to now
    pub loan_date: Option<DateTime<Utc>>,
    /// Defaults to loan date plus the member type's loan duration
    pub due_date: Option<DateTime<Utc>>,
}

/// Update loan request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLoan {
    pub due_date: Option<DateTime<Utc>>,
}

/// Outcome of a return
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReturnOutcome {
    pub loan: Loan,
    /// Late-return penalty recorded for this return, if any
    pub penalty_id: Option<i32>,
}
