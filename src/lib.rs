//! Biblio library management server
//!
//! REST JSON API for managing a library: catalog (documents, copies, authors,
//! publishers, categories, shelf locations), members and their lending
//! policies, loans, reservations and penalties, plus staff accounts
//! authenticated with JWT bearer tokens.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use api::router;
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build services over `pool` with the given configuration
    pub fn new(config: AppConfig, pool: sqlx::PgPool) -> AppResult<Self> {
        let repository = repository::Repository::new(pool);
        let services = services::Services::new(repository, config.auth.clone())?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
