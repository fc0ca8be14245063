//! Application state for the HRIS API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::HrService;
use crate::store::{HrStore, InMemoryStore};

/// Shared application state.
///
/// Holds the service every handler calls into; the service owns the store
/// and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    service: Arc<HrService>,
}

impl AppState {
    /// Creates the state over a store.
    pub fn new(config: ConfigLoader, store: Arc<dyn HrStore>) -> Self {
        Self {
            service: Arc::new(HrService::new(store, config.config().clone())),
        }
    }

    /// Creates the state over an empty [`InMemoryStore`].
    pub fn in_memory(config: ConfigLoader) -> Self {
        Self::new(config, Arc::new(InMemoryStore::new()))
    }

    /// Returns the HR service.
    pub fn service(&self) -> &HrService {
        &self.service
    }
}
