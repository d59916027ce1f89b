//! Application state shared across handlers

use crate::config::Settings;
use crate::metrics::Metrics;
use crate::network::Fetcher;
use crate::resolver::Resolver;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Question resolver
    pub resolver: Arc<Resolver>,
    /// Resolution counters
    pub metrics: Arc<Metrics>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, fetcher: Arc<dyn Fetcher>) -> anyhow::Result<Self> {
        let resolver = Arc::new(Resolver::with_settings(fetcher, &settings));
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            resolver,
            metrics: Arc::new(Metrics::new()),
            templates,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
