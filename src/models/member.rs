//! Member (patron) and member type (lending policy) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Lending policy attached to every member
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MemberType {
    pub id: i32,
    pub name: String,
    /// Maximum number of simultaneous open loans
    pub max_loans: i32,
    pub loan_duration_days: i32,
    /// Amount charged per day of late return
    pub daily_penalty_rate: Decimal,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_rate"))]
pub struct CreateMemberType {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(min = 0))]
    pub max_loans: i32,
    #[validate(range(min = 1, max = 3650))]
    pub loan_duration_days: i32,
    pub daily_penalty_rate: Decimal,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_rate"))]
pub struct UpdateMemberType {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub max_loans: Option<i32>,
    #[validate(range(min = 1, max = 3650))]
    pub loan_duration_days: Option<i32>,
    pub daily_penalty_rate: Option<Decimal>,
}

/// Largest rate the NUMERIC(4,2) column holds
pub fn max_daily_rate() -> Decimal {
    Decimal::new(9999, 2)
}

fn check_rate(rate: Decimal) -> Result<(), ValidationError> {
    let message = if rate.is_sign_negative() {
        "Daily penalty rate cannot be negative"
    } else if rate > max_daily_rate() {
        "Daily penalty rate cannot exceed 99.99"
    } else if rate.scale() > 2 {
        "Daily penalty rate has at most two decimal places"
    } else {
        return Ok(());
    };
    let mut err = ValidationError::new("daily_penalty_rate");
    err.message = Some(message.into());
    Err(err)
}

fn validate_create_rate(data: &CreateMemberType) -> Result<(), ValidationError> {
    check_rate(data.daily_penalty_rate)
}

fn validate_update_rate(data: &UpdateMemberType) -> Result<(), ValidationError> {
    data.daily_penalty_rate.map(check_rate).unwrap_or(Ok(()))
}

/// Member row joined with its type name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: i32,
    pub lastname: String,
    pub firstname: String,
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub member_type_id: i32,
    pub member_type_name: String,
    pub is_active: bool,
    pub join_date: DateTime<Utc>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, max = 100))]
    pub lastname: String,
    #[validate(length(min = 1, max = 100))]
    pub firstname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(max = 100))]
    pub address: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub member_type_id: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMember {
    #[validate(length(min = 1, max = 100))]
    pub lastname: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub firstname: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub address: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub member_type_id: Option<i32>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_negative_rate_rejected() {
        let data = CreateMemberType {
            name: "night owl".to_string(),
            max_loans: 2,
            loan_duration_days: 7,
            daily_penalty_rate: Decimal::from_str("-0.50").unwrap(),
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let data = UpdateMemberType {
            loan_duration_days: Some(0),
            ..Default::default()
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_duration_capped_at_ten_years() {
        let data = UpdateMemberType {
            loan_duration_days: Some(3650),
            ..Default::default()
        };
        assert!(data.validate().is_ok());

        let data = UpdateMemberType {
            loan_duration_days: Some(i32::MAX),
            ..Default::default()
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_update_member_ignores_unknown_fields() {
        let data: UpdateMember = serde_json::from_str(r#"{"is_active": false, "join_date": "2024-01-01"}"#).unwrap();
        assert_eq!(data.is_active, Some(false));
    }

    #[test]
    fn test_rate_must_fit_column() {
        assert!(check_rate(Decimal::from_str("99.99").unwrap()).is_ok());
        assert!(check_rate(Decimal::from(100)).is_err());
        assert!(check_rate(Decimal::from_str("0.125").unwrap()).is_err());
    }
}
