// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Auth core and HTTP surface for the task manager backend.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod user;
pub mod validation;

use crate::auth::{AuthService, Clock, DefaultAuth, SystemClock};
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::Storage;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Storage backend
    pub storage: S,
}

impl<S: Storage + Clone + 'static> AppState<S> {
    /// Create a new application state on the wall clock
    pub fn new(storage: S, settings: &Settings) -> Result<Self, AppError> {
        Self::with_clock(storage, settings, Arc::new(SystemClock))
    }

    /// Create a new application state with an explicit time source
    pub fn with_clock(
        storage: S,
        settings: &Settings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let auth = Arc::new(DefaultAuth::new(storage.clone(), settings, clock)?);
        Ok(Self { auth, storage })
    }
}
