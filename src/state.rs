use crate::config::Config;
use std::sync::Arc;

/// Shared handler state. The extractor itself is stateless; the only
/// thing handlers need is the immutable configuration.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
