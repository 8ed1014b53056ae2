//! Firefighter Gear Inventory
//!
//! Form model and submission pipeline for recording a firefighter's
//! protective gear: identity, eight gear categories with a primary and a
//! secondary item each, free-form extra equipment, and tag photos uploaded
//! to an object store before the inventory document is written.

use std::sync::Arc;

pub mod config;
pub mod draft;
pub mod error;
pub mod form;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared by every form opened in this process
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, services: services::Services) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }

    /// Open a blank form bound to the configured stores
    pub fn open_form(&self) -> form::FormController {
        form::FormController::new(
            form::FormSession::default(),
            self.services.submission.clone(),
            self.config.form.reset_delay(),
        )
    }
}
