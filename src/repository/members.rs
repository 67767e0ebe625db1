//! Members (patrons) repository

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::push_set;
use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, UpdateMember},
};

const SELECT_MEMBER: &str = r#"
    SELECT m.*, t.name AS member_type_name
    FROM members m
    JOIN member_types t ON t.id = m.member_type_id
"#;

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, Member>(&format!(
            "{} ORDER BY m.lastname, m.firstname, m.id",
            SELECT_MEMBER
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Member> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Member>> {
        let row = sqlx::query_as::<_, Member>(&format!("{} WHERE m.id = $1", SELECT_MEMBER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM members WHERE LOWER(email) = LOWER($1) AND id IS DISTINCT FROM $2)",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Number of members attached to a member type
    pub async fn count_by_type(&self, member_type_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE member_type_id = $1")
            .bind(member_type_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn create(&self, data: &CreateMember) -> AppResult<Member> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO members (lastname, firstname, email, address, phone, member_type_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&data.lastname)
        .bind(&data.firstname)
        .bind(&data.email)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(data.member_type_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateMember) -> AppResult<Member> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE members SET modif_date = ");
        builder.push_bind(Utc::now());

        push_set!(builder, "lastname", data.lastname);
        push_set!(builder, "firstname", data.firstname);
        push_set!(builder, "email", data.email);
        push_set!(builder, "address", data.address);
        push_set!(builder, "phone", data.phone);
        push_set!(builder, "member_type_id", data.member_type_id);
        push_set!(builder, "is_active", data.is_active);

        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member {} not found", id)));
        }

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<Member> {
        let member = self.get_by_id(id).await?;
        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(member)
    }
}
