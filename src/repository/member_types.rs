//! Member types (lending policies) repository

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::push_set;
use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMemberType, MemberType, UpdateMemberType},
};

#[derive(Clone)]
pub struct MemberTypesRepository {
    pool: Pool<Postgres>,
}

impl MemberTypesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<MemberType>> {
        let rows = sqlx::query_as::<_, MemberType>("SELECT * FROM member_types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MemberType> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member type {} not found", id)))
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<MemberType>> {
        let row = sqlx::query_as::<_, MemberType>("SELECT * FROM member_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM member_types WHERE LOWER(name) = LOWER($1) AND id IS DISTINCT FROM $2)",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &CreateMemberType) -> AppResult<MemberType> {
        let row = sqlx::query_as::<_, MemberType>(
            r#"
            INSERT INTO member_types (name, max_loans, loan_duration_days, daily_penalty_rate)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.max_loans)
        .bind(data.loan_duration_days)
        .bind(data.daily_penalty_rate)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateMemberType) -> AppResult<MemberType> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE member_types SET modif_date = ");
        builder.push_bind(Utc::now());

        push_set!(builder, "name", data.name);
        push_set!(builder, "max_loans", data.max_loans);
        push_set!(builder, "loan_duration_days", data.loan_duration_days);
        push_set!(builder, "daily_penalty_rate", data.daily_penalty_rate);

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<MemberType>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member type {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<MemberType> {
        sqlx::query_as::<_, MemberType>("DELETE FROM member_types WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member type {} not found", id)))
    }
}
