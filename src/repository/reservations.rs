//! Reservations repository

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::push_set;
use crate::{
    error::{AppError, AppResult},
    models::reservation::{CreateReservation, Reservation, UpdateReservation},
};

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations ORDER BY reservation_date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    pub async fn create(&self, data: &CreateReservation) -> AppResult<Reservation> {
        let row = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (member_id, document_id, status)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(data.member_id)
        .bind(data.document_id)
        .bind(data.status.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update reservation; a status change stamps `status_date`
    pub async fn update(&self, id: i32, data: &UpdateReservation) -> AppResult<Reservation> {
        let now = Utc::now();
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE reservations SET modif_date = ");
        builder.push_bind(now);

        if let Some(status) = data.status {
            builder
                .push(", status = ")
                .push_bind(status)
                .push(", status_date = ")
                .push_bind(now);
        }
        push_set!(builder, "available_date", data.available_date);
        push_set!(builder, "hold_expiry_date", data.hold_expiry_date);

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Reservation>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("DELETE FROM reservations WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }
}
