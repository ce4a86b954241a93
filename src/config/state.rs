// Application state module
// Holds the collaborators shared by every request

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::types::Config;
use crate::downloads::DownloadStore;
use crate::translator::Translator;

/// Application state
pub struct AppState {
    pub config: Config,
    pub translator: Translator,
    pub downloads: Arc<DownloadStore>,

    // Cached config values for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &Config, translator: Translator, downloads: Arc<DownloadStore>) -> Self {
        Self {
            config: config.clone(),
            translator,
            downloads,
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        }
    }
}
