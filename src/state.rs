// src/state.rs

use std::sync::Arc;

use crate::api::http::PageSource;
use crate::config::AppConfig;
use crate::convert::Dispatcher;
use crate::oracle::{GeminiOracle, Oracle, OracleError};

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub page: Arc<PageSource>,
    /// Model name reported by the status endpoint
    pub model: String,
}

impl AppState {
    pub fn new(oracle: Arc<dyn Oracle>, page: PageSource, model: impl Into<String>) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(oracle)),
            page: Arc::new(page),
            model: model.into(),
        }
    }

    /// Wire up the Gemini oracle from resolved configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, OracleError> {
        let oracle = GeminiOracle::new(&config.oracle)?;
        Ok(Self::new(
            Arc::new(oracle),
            PageSource::from_path(config.server.page.clone()),
            config.oracle.model.clone(),
        ))
    }
}
