//! Penalties repository

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::push_set;
use crate::{
    error::{AppError, AppResult},
    models::penalty::{CreatePenalty, Penalty, UpdatePenalty},
};

#[derive(Clone)]
pub struct PenaltiesRepository {
    pool: Pool<Postgres>,
}

impl PenaltiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Penalty>> {
        let rows = sqlx::query_as::<_, Penalty>("SELECT * FROM penalties ORDER BY crea_date DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Penalty> {
        sqlx::query_as::<_, Penalty>("SELECT * FROM penalties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Penalty {} not found", id)))
    }

    pub async fn create(&self, data: &CreatePenalty, created_by: i32) -> AppResult<Penalty> {
        let row = sqlx::query_as::<_, Penalty>(
            r#"
            INSERT INTO penalties (member_id, loan_id, amount_due, amount_paid, reason, status, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.member_id)
        .bind(data.loan_id)
        .bind(data.amount_due)
        .bind(data.amount_paid.unwrap_or(Decimal::ZERO))
        .bind(&data.reason)
        .bind(data.status.unwrap_or_default())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update penalty; a status change stamps `status_date`
    pub async fn update(&self, id: i32, data: &UpdatePenalty) -> AppResult<Penalty> {
        let now = Utc::now();
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE penalties SET modif_date = ");
        builder.push_bind(now);

        push_set!(builder, "amount_due", data.amount_due);
        push_set!(builder, "amount_paid", data.amount_paid);
        push_set!(builder, "reason", data.reason);
        if let Some(status) = data.status {
            builder
                .push(", status = ")
                .push_bind(status)
                .push(", status_date = ")
                .push_bind(now);
        }

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Penalty>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Penalty {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<Penalty> {
        sqlx::query_as::<_, Penalty>("DELETE FROM penalties WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Penalty {} not found", id)))
    }
}
