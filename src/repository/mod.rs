//! Repository layer for database operations

/// Appends `, column = $n` to an UPDATE builder when the field was provided.
macro_rules! push_set {
    ($builder:ident, $column:literal, $value:expr) => {
        if let Some(value) = $value.clone() {
            $builder.push(concat!(", ", $column, " = ")).push_bind(value);
        }
    };
}

pub(crate) use push_set;

pub mod authors;
pub mod categories;
pub mod copies;
pub mod documents;
pub mod loans;
pub mod locations;
pub mod member_types;
pub mod members;
pub mod penalties;
pub mod publishers;
pub mod reservations;
pub mod roles;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub roles: roles::RolesRepository,
    pub authors: authors::AuthorsRepository,
    pub categories: categories::CategoriesRepository,
    pub publishers: publishers::PublishersRepository,
    pub locations: locations::LocationsRepository,
    pub documents: documents::DocumentsRepository,
    pub copies: copies::CopiesRepository,
    pub member_types: member_types::MemberTypesRepository,
    pub members: members::MembersRepository,
    pub loans: loans::LoansRepository,
    pub reservations: reservations::ReservationsRepository,
    pub penalties: penalties::PenaltiesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            roles: roles::RolesRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            publishers: publishers::PublishersRepository::new(pool.clone()),
            locations: locations::LocationsRepository::new(pool.clone()),
            documents: documents::DocumentsRepository::new(pool.clone()),
            copies: copies::CopiesRepository::new(pool.clone()),
            member_types: member_types::MemberTypesRepository::new(pool.clone()),
            members: members::MembersRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            penalties: penalties::PenaltiesRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
