//! Penalty model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::enums::PenaltyStatus;

/// Reason recorded for penalties created on late returns
pub const LATE_RETURN_REASON: &str = "late_return";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Penalty {
    pub id: i32,
    pub member_id: i32,
    pub loan_id: Option<i32>,
    pub amount_due: Decimal,
    pub amount_paid: Decimal,
    pub reason: String,
    pub status: PenaltyStatus,
    pub status_date: DateTime<Utc>,
    pub created_by: i32,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_amounts"))]
pub struct CreatePenalty {
    pub member_id: i32,
    pub loan_id: Option<i32>,
    pub amount_due: Decimal,
    /// Defaults to zero
    pub amount_paid: Option<Decimal>,
    #[validate(length(min = 1, max = 50))]
    pub reason: String,
    pub status: Option<PenaltyStatus>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePenalty {
    pub amount_due: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    #[validate(length(min = 1, max = 50))]
    pub reason: Option<String>,
    pub status: Option<PenaltyStatus>,
}

/// Largest amount the NUMERIC(6,2) columns hold
pub fn max_amount() -> Decimal {
    Decimal::new(999_999, 2)
}

/// Both amounts non-negative, within the column range, and paid never above due
pub fn check_amounts(due: Decimal, paid: Decimal) -> Result<(), ValidationError> {
    let message = if due.is_sign_negative() || paid.is_sign_negative() {
        "Amounts cannot be negative"
    } else if due > max_amount() || paid > max_amount() {
        "Amounts cannot exceed 9999.99"
    } else if due.scale() > 2 || paid.scale() > 2 {
        "Amounts have at most two decimal places"
    } else if paid > due {
        "Amount paid cannot exceed amount due"
    } else {
        return Ok(());
    };
    let mut err = ValidationError::new("amounts");
    err.message = Some(message.into());
    Err(err)
}

fn validate_create_amounts(data: &CreatePenalty) -> Result<(), ValidationError> {
    check_amounts(data.amount_due, data.amount_paid.unwrap_or(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_overpayment_rejected() {
        let data = CreatePenalty {
            member_id: 1,
            loan_id: None,
            amount_due: dec("3.00"),
            amount_paid: Some(dec("3.50")),
            reason: "damaged".to_string(),
            status: None,
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_amount_bounds() {
        assert!(check_amounts(dec("3.00"), dec("3.00")).is_ok());
        assert!(check_amounts(dec("3.00"), Decimal::ZERO).is_ok());
        assert!(check_amounts(dec("-1.00"), Decimal::ZERO).is_err());
    }

    #[test]
    fn test_amounts_must_fit_column() {
        assert!(check_amounts(dec("9999.99"), dec("9999.99")).is_ok());
        assert!(check_amounts(dec("10000"), Decimal::ZERO).is_err());
        assert!(check_amounts(dec("1.005"), Decimal::ZERO).is_err());
    }
}
