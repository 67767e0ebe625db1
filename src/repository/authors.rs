//! Authors repository

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::push_set;
use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor, UpdateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY lastname, firstname, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Ids from `ids` that match no author
    pub async fn missing_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        let missing: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT wanted.id FROM UNNEST($1::int[]) AS wanted(id)
            WHERE NOT EXISTS (SELECT 1 FROM authors a WHERE a.id = wanted.id)
            ORDER BY wanted.id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(missing)
    }

    /// Check whether an author with the same full name exists (case-insensitive)
    pub async fn name_exists(
        &self,
        lastname: &str,
        firstname: Option<&str>,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM authors
                WHERE LOWER(lastname) = LOWER($1)
                  AND LOWER(COALESCE(firstname, '')) = LOWER(COALESCE($2, ''))
                  AND id IS DISTINCT FROM $3
            )
            "#,
        )
        .bind(lastname)
        .bind(firstname)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create author
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (lastname, firstname, nationality, birth_date, death_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.lastname)
        .bind(&data.firstname)
        .bind(&data.nationality)
        .bind(data.birth_date)
        .bind(data.death_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update author
    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE authors SET modif_date = ");
        builder.push_bind(Utc::now());

        push_set!(builder, "lastname", data.lastname);
        push_set!(builder, "firstname", data.firstname);
        push_set!(builder, "nationality", data.nationality);
        push_set!(builder, "birth_date", data.birth_date);
        push_set!(builder, "death_date", data.death_date);

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Author>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Delete author
    pub async fn delete(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("DELETE FROM authors WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }
}
