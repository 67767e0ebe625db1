//! Loans repository for database operations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::push_set;
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{CopyStatus, PenaltyStatus},
        loan::{Loan, ReturnOutcome, UpdateLoan},
        penalty::LATE_RETURN_REASON,
    },
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all loans, most recent first
    pub async fn list(&self) -> AppResult<Vec<Loan>> {
        let rows = sqlx::query_as::<_, Loan>("SELECT * FROM loans ORDER BY loan_date DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM loans WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Get loans for a member, open ones first
    pub async fn list_by_member(&self, member_id: i32) -> AppResult<Vec<Loan>> {
        let rows = sqlx::query_as::<_, Loan>(
            r#"
            SELECT * FROM loans
            WHERE member_id = $1
            ORDER BY (returned_date IS NULL) DESC, loan_date DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a loan and mark the copy as lent.
    ///
    /// The member row is locked first, then the copy row, so the member's
    /// open-loan count and the copy status cannot change until commit.
    pub async fn create(
        &self,
        member_id: i32,
        copy_id: i32,
        loan_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
        lent_by: i32,
        max_loans: i32,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let is_active: bool = sqlx::query_scalar("SELECT is_active FROM members WHERE id = $1 FOR UPDATE")
            .bind(member_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::BusinessRule(format!("Member {} does not exist", member_id)))?;

        if !is_active {
            return Err(AppError::BusinessRule(format!("Member {} is not active", member_id)));
        }

        let open_loans: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE member_id = $1 AND returned_date IS NULL",
        )
        .bind(member_id)
        .fetch_one(&mut *tx)
        .await?;

        if open_loans >= i64::from(max_loans) {
            return Err(AppError::BusinessRule(format!(
                "Maximum loans reached ({}/{})",
                open_loans, max_loans
            )));
        }

        let status: CopyStatus = sqlx::query_scalar("SELECT status FROM copies WHERE id = $1 FOR UPDATE")
            .bind(copy_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::BusinessRule(format!("Copy {} does not exist", copy_id)))?;

        if status != CopyStatus::Available {
            return Err(AppError::BusinessRule(format!(
                "Copy {} is not available (status: {})",
                copy_id, status
            )));
        }

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (member_id, copy_id, loan_date, due_date, lent_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(member_id)
        .bind(copy_id)
        .bind(loan_date)
        .bind(due_date)
        .bind(lent_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE copies SET status = $1, modif_date = $2 WHERE id = $3")
            .bind(CopyStatus::OnLoan)
            .bind(Utc::now())
            .bind(copy_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(loan)
    }

    /// Close a loan, free its copy and record the late fee if any
    pub async fn return_loan(
        &self,
        id: i32,
        returned_by: i32,
        returned_at: DateTime<Utc>,
        late_fee: Option<Decimal>,
    ) -> AppResult<ReturnOutcome> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET returned_date = $1, returned_by = $2, modif_date = $1
            WHERE id = $3 AND returned_date IS NULL
            RETURNING *
            "#,
        )
        .bind(returned_at)
        .bind(returned_by)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::BusinessRule(format!("Loan {} is already returned", id)))?;

        sqlx::query("UPDATE copies SET status = $1, modif_date = $2 WHERE id = $3")
            .bind(CopyStatus::Available)
            .bind(returned_at)
            .bind(loan.copy_id)
            .execute(&mut *tx)
            .await?;

        let penalty_id = match late_fee {
            Some(amount) => Some(
                sqlx::query_scalar::<_, i32>(
                    r#"
                    INSERT INTO penalties (member_id, loan_id, amount_due, reason, status, created_by)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING id
                    "#,
                )
                .bind(loan.member_id)
                .bind(loan.id)
                .bind(amount)
                .bind(LATE_RETURN_REASON)
                .bind(PenaltyStatus::Unpaid)
                .bind(returned_by)
                .fetch_one(&mut *tx)
                .await?,
            ),
            None => None,
        };

        tx.commit().await?;

        Ok(ReturnOutcome { loan, penalty_id })
    }

    /// Update loan (due date only)
    pub async fn update(&self, id: i32, data: &UpdateLoan) -> AppResult<Loan> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE loans SET modif_date = ");
        builder.push_bind(Utc::now());

        push_set!(builder, "due_date", data.due_date);

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Loan>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", id)))
    }

    /// Delete a loan; an open loan gives its copy back
    pub async fn delete(&self, id: i32) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>("DELETE FROM loans WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", id)))?;

        if loan.is_open() {
            sqlx::query("UPDATE copies SET status = $1, modif_date = $2 WHERE id = $3")
                .bind(CopyStatus::Available)
                .bind(Utc::now())
                .bind(loan.copy_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(loan)
    }
}
