//! Income Dashboard Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod pages;
pub mod pipeline;
pub mod render;
pub mod routes;
pub mod session;

pub use auth::CredentialStore;
pub use config::{Config, ConfigError};
pub use error::{AppError, Result};
pub use routes::router;

use std::sync::Arc;

use thiserror::Error;

use pages::DataSources;
use render::Templates;
use session::SessionKeys;

/// Failure while preparing shared state before serving
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Unusable SECRET_KEY: {0}")]
    SecretKey(#[from] hmac::digest::InvalidLength),
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn CredentialStore>,
    pub sessions: SessionKeys,
    pub templates: Arc<Templates>,
    pub sources: DataSources,
}

impl AppState {
    /// Create a new AppState with the given credential store and configuration
    pub fn new(
        config: Config,
        users: Arc<dyn CredentialStore>,
    ) -> std::result::Result<Self, StartupError> {
        Ok(Self {
            sessions: SessionKeys::new(&config.secret_key)?,
            templates: Arc::new(Templates::new()?),
            sources: DataSources::new(config.data_dir.clone()),
            config,
            users,
        })
    }
}
