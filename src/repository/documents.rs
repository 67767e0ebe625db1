//! Documents repository for catalog operations

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder, Transaction};

use super::push_set;
use crate::{
    error::{AppError, AppResult},
    models::document::{CreateDocument, Document, UpdateDocument},
};

const SELECT_DOCUMENT: &str = r#"
    SELECT d.*,
           COALESCE(
               array_agg(da.author_id ORDER BY da.author_id) FILTER (WHERE da.author_id IS NOT NULL),
               '{}'
           ) AS author_ids
    FROM documents d
    LEFT JOIN document_authors da ON da.document_id = d.id
"#;

#[derive(Clone)]
pub struct DocumentsRepository {
    pool: Pool<Postgres>,
}

impl DocumentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, Document>(&format!(
            "{} GROUP BY d.id ORDER BY d.title, d.id",
            SELECT_DOCUMENT
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(&format!("{} WHERE d.id = $1 GROUP BY d.id", SELECT_DOCUMENT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM documents WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn isbn_exists(&self, isbn: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM documents WHERE isbn = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(isbn)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Insert a document and its author links in one transaction
    pub async fn create(&self, data: &CreateDocument, created_by: i32) -> AppResult<Document> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO documents (title, isbn, publication_year, summary, category_id, publisher_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(&data.isbn)
        .bind(data.publication_year)
        .bind(&data.summary)
        .bind(data.category_id)
        .bind(data.publisher_id)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        Self::link_authors(&mut tx, id, &data.author_ids).await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update document fields; a provided author list replaces the current one
    pub async fn update(&self, id: i32, data: &UpdateDocument) -> AppResult<Document> {
        let mut tx = self.pool.begin().await?;

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE documents SET modif_date = ");
        builder.push_bind(Utc::now());

        push_set!(builder, "title", data.title);
        push_set!(builder, "isbn", data.isbn);
        push_set!(builder, "publication_year", data.publication_year);
        push_set!(builder, "summary", data.summary);
        push_set!(builder, "category_id", data.category_id);
        push_set!(builder, "publisher_id", data.publisher_id);

        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Document {} not found", id)));
        }

        if let Some(ref author_ids) = data.author_ids {
            sqlx::query("DELETE FROM document_authors WHERE document_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::link_authors(&mut tx, id, author_ids).await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a document; author links go with it
    pub async fn delete(&self, id: i32) -> AppResult<Document> {
        let document = self.get_by_id(id).await?;
        sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(document)
    }

    async fn link_authors(
        tx: &mut Transaction<'_, Postgres>,
        document_id: i32,
        author_ids: &[i32],
    ) -> AppResult<()> {
        if author_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            r#"
            INSERT INTO document_authors (document_id, author_id)
            SELECT $1, author_id FROM UNNEST($2::int[]) AS t(author_id)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(document_id)
        .bind(author_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
