//! Lending service: loans, returns, reservations and penalties

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        loan::{CreateLoan, Loan, ReturnOutcome, UpdateLoan},
        penalty::{check_amounts, max_amount, CreatePenalty, Penalty, UpdatePenalty},
        reservation::{CreateReservation, Reservation, UpdateReservation},
    },
    repository::Repository,
};

/// Due date of a loan starting at `loan_date` under a policy of `duration_days`
pub fn default_due_date(loan_date: DateTime<Utc>, duration_days: i32) -> AppResult<DateTime<Utc>> {
    loan_date
        .checked_add_signed(Duration::days(i64::from(duration_days)))
        .ok_or_else(|| AppError::Validation("Loan duration puts the due date out of range".to_string()))
}

/// Fee owed for a loan returned at `returned` that was due at `due`.
/// Every started day past the due date counts, capped at the largest
/// storable penalty; `None` when nothing is owed.
pub fn late_fee(due: DateTime<Utc>, returned: DateTime<Utc>, daily_rate: Decimal) -> Option<Decimal> {
    if returned <= due || daily_rate <= Decimal::ZERO {
        return None;
    }
    let late = returned - due;
    let mut days = late.num_days();
    if late > Duration::days(days) {
        days += 1;
    }
    let fee = daily_rate
        .checked_mul(Decimal::from(days))
        .unwrap_or_else(max_amount);
    Some(fee.min(max_amount()))
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // --- loans ---

    pub async fn list(&self) -> AppResult<Vec<Loan>> {
        self.repository.loans.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Loan> {
        self.repository.loans.get_by_id(id).await
    }

    /// Lend a copy to a member
    pub async fn create(&self, data: CreateLoan, lent_by: i32) -> AppResult<Loan> {
        data.validate()?;

        let member = self
            .repository
            .members
            .find_by_id(data.member_id)
            .await?
            .ok_or_else(|| AppError::BusinessRule(format!("Member {} does not exist", data.member_id)))?;
        if !member.is_active {
            return Err(AppError::BusinessRule(format!("Member {} is not active", member.id)));
        }

        let policy = self.repository.member_types.get_by_id(member.member_type_id).await?;

        let loan_date = data.loan_date.unwrap_or_else(Utc::now);
        let due_date = match data.due_date {
            Some(due_date) => due_date,
            None => default_due_date(loan_date, policy.loan_duration_days)?,
        };
        if due_date < loan_date {
            return Err(AppError::Validation("Due date cannot precede loan date".to_string()));
        }

        let loan = self
            .repository
            .loans
            .create(member.id, data.copy_id, loan_date, due_date, lent_by, policy.max_loans)
            .await?;

        tracing::info!(
            loan_id = loan.id,
            member_id = loan.member_id,
            copy_id = loan.copy_id,
            due_date = %loan.due_date,
            "Loan created"
        );
        Ok(loan)
    }

    /// Return a lent copy, charging a late fee when due
    pub async fn return_loan(&self, id: i32, returned_by: i32) -> AppResult<ReturnOutcome> {
        let loan = self.repository.loans.get_by_id(id).await?;
        if !loan.is_open() {
            return Err(AppError::BusinessRule(format!("Loan {} is already returned", id)));
        }

        let now = Utc::now();
        let fee = if loan.is_overdue(now) {
            let member = self.repository.members.get_by_id(loan.member_id).await?;
            let policy = self.repository.member_types.get_by_id(member.member_type_id).await?;
            late_fee(loan.due_date, now, policy.daily_penalty_rate)
        } else {
            None
        };

        let outcome = self.repository.loans.return_loan(id, returned_by, now, fee).await?;

        match outcome.penalty_id {
            Some(penalty_id) => tracing::info!(loan_id = id, penalty_id, fee = ?fee, "Loan returned late"),
            None => tracing::info!(loan_id = id, "Loan returned"),
        }
        Ok(outcome)
    }

    pub async fn update(&self, id: i32, data: UpdateLoan) -> AppResult<Loan> {
        data.validate()?;
        let loan = self.repository.loans.get_by_id(id).await?;
        if let Some(due_date) = data.due_date {
            if due_date < loan.loan_date {
                return Err(AppError::Validation("Due date cannot precede loan date".to_string()));
            }
        }
        self.repository.loans.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<Loan> {
        self.repository.loans.delete(id).await
    }

    // --- reservations ---

    pub async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        self.repository.reservations.list().await
    }

    pub async fn get_reservation(&self, id: i32) -> AppResult<Reservation> {
        self.repository.reservations.get_by_id(id).await
    }

    pub async fn create_reservation(&self, data: CreateReservation) -> AppResult<Reservation> {
        data.validate()?;
        if !self.repository.members.exists(data.member_id).await? {
            return Err(AppError::BusinessRule(format!("Member {} does not exist", data.member_id)));
        }
        if !self.repository.documents.exists(data.document_id).await? {
            return Err(AppError::BusinessRule(format!("Document {} does not exist", data.document_id)));
        }
        self.repository.reservations.create(&data).await
    }

    pub async fn update_reservation(&self, id: i32, data: UpdateReservation) -> AppResult<Reservation> {
        data.validate()?;
        self.repository.reservations.update(id, &data).await
    }

    pub async fn delete_reservation(&self, id: i32) -> AppResult<Reservation> {
        self.repository.reservations.delete(id).await
    }

    // --- penalties ---

    pub async fn list_penalties(&self) -> AppResult<Vec<Penalty>> {
        self.repository.penalties.list().await
    }

    pub async fn get_penalty(&self, id: i32) -> AppResult<Penalty> {
        self.repository.penalties.get_by_id(id).await
    }

    pub async fn create_penalty(&self, data: CreatePenalty, created_by: i32) -> AppResult<Penalty> {
        data.validate()?;
        if !self.repository.members.exists(data.member_id).await? {
            return Err(AppError::BusinessRule(format!("Member {} does not exist", data.member_id)));
        }
        if let Some(loan_id) = data.loan_id {
            if !self.repository.loans.exists(loan_id).await? {
                return Err(AppError::BusinessRule(format!("Loan {} does not exist", loan_id)));
            }
        }
        self.repository.penalties.create(&data, created_by).await
    }

    pub async fn update_penalty(&self, id: i32, data: UpdatePenalty) -> AppResult<Penalty> {
        data.validate()?;
        let current = self.repository.penalties.get_by_id(id).await?;

        let due = data.amount_due.unwrap_or(current.amount_due);
        let paid = data.amount_paid.unwrap_or(current.amount_paid);
        check_amounts(due, paid).map_err(|e| {
            AppError::Validation(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid amounts".to_string()),
            )
        })?;

        self.repository.penalties.update(id, &data).await
    }

    pub async fn delete_penalty(&self, id: i32) -> AppResult<Penalty> {
        self.repository.penalties.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_due_date() {
        assert_eq!(default_due_date(at(1, 10), 14).unwrap(), at(15, 10));
    }

    #[test]
    fn test_due_date_overflow_is_rejected() {
        let result = default_due_date(Utc::now(), i32::MAX);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_no_fee_when_on_time() {
        assert_eq!(late_fee(at(15, 10), at(15, 10), dec("0.25")), None);
        assert_eq!(late_fee(at(15, 10), at(14, 9), dec("0.25")), None);
    }

    #[test]
    fn test_fee_per_started_day() {
        assert_eq!(late_fee(at(15, 10), at(18, 10), dec("0.25")), Some(dec("0.75")));
        assert_eq!(late_fee(at(15, 10), at(15, 11), dec("0.20")), Some(dec("0.20")));
        assert_eq!(late_fee(at(15, 10), at(17, 11), dec("0.10")), Some(dec("0.30")));
    }

    #[test]
    fn test_fee_capped_at_storable_amount() {
        let due = at(1, 10);
        let returned = due + Duration::days(2000);
        assert_eq!(late_fee(due, returned, dec("5.00")), Some(max_amount()));
        assert_eq!(late_fee(due, returned, dec("0.01")), Some(dec("20.00")));
    }

    #[test]
    fn test_no_fee_with_zero_rate() {
        assert_eq!(late_fee(at(15, 10), at(20, 10), Decimal::ZERO), None);
    }
}
