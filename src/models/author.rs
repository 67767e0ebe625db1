//! Author model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub lastname: String,
    pub firstname: Option<String>,
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 100))]
    pub lastname: String,
    #[validate(length(max = 100))]
    pub firstname: Option<String>,
    #[validate(length(max = 100))]
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
}

/// Update author request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_dates"))]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 100))]
    pub lastname: Option<String>,
    #[validate(length(max = 100))]
    pub firstname: Option<String>,
    #[validate(length(max = 100))]
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
}

fn check_life_span(birth: Option<NaiveDate>, death: Option<NaiveDate>) -> Result<(), ValidationError> {
    match (birth, death) {
        (Some(birth), Some(death)) if death < birth => {
            let mut err = ValidationError::new("life_span");
            err.message = Some("Death date precedes birth date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

fn validate_create_dates(author: &CreateAuthor) -> Result<(), ValidationError> {
    check_life_span(author.birth_date, author.death_date)
}

fn validate_update_dates(author: &UpdateAuthor) -> Result<(), ValidationError> {
    check_life_span(author.birth_date, author.death_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_death_before_birth_rejected() {
        let author = CreateAuthor {
            lastname: "Hugo".to_string(),
            firstname: Some("Victor".to_string()),
            nationality: None,
            birth_date: NaiveDate::from_ymd_opt(1885, 5, 22),
            death_date: NaiveDate::from_ymd_opt(1802, 2, 26),
        };
        assert!(author.validate().is_err());
    }

    #[test]
    fn test_partial_dates_accepted() {
        let author = UpdateAuthor {
            death_date: NaiveDate::from_ymd_opt(1885, 5, 22),
            ..Default::default()
        };
        assert!(author.validate().is_ok());
    }
}
