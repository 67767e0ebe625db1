//! Copies repository

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::push_set;
use crate::{
    error::{AppError, AppResult},
    models::copy::{Copy, CreateCopy, UpdateCopy},
};

#[derive(Clone)]
pub struct CopiesRepository {
    pool: Pool<Postgres>,
}

impl CopiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Copy>> {
        let rows = sqlx::query_as::<_, Copy>("SELECT * FROM copies ORDER BY inventory_number")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Copy> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copy {} not found", id)))
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Copy>> {
        let row = sqlx::query_as::<_, Copy>("SELECT * FROM copies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn inventory_number_exists(
        &self,
        inventory_number: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM copies WHERE inventory_number = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(inventory_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &CreateCopy, added_by: i32) -> AppResult<Copy> {
        let row = sqlx::query_as::<_, Copy>(
            r#"
            INSERT INTO copies (inventory_number, condition, status, service_date, location_id, document_id, added_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.inventory_number)
        .bind(&data.condition)
        .bind(data.status.unwrap_or_default())
        .bind(data.service_date.unwrap_or_else(|| Utc::now().date_naive()))
        .bind(data.location_id)
        .bind(data.document_id)
        .bind(added_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateCopy) -> AppResult<Copy> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE copies SET modif_date = ");
        builder.push_bind(Utc::now());

        push_set!(builder, "inventory_number", data.inventory_number);
        push_set!(builder, "condition", data.condition);
        push_set!(builder, "status", data.status);
        push_set!(builder, "service_date", data.service_date);
        push_set!(builder, "location_id", data.location_id);
        push_set!(builder, "document_id", data.document_id);

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Copy>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copy {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<Copy> {
        sqlx::query_as::<_, Copy>("DELETE FROM copies WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copy {} not found", id)))
    }
}
