use crate::config::Config;
use crate::listing::FileLister;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub version: &'static str,
    pub lister: FileLister,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config) -> SharedState {
        let settings = config.listing_settings();
        tracing::debug!(folder = %settings.folder.display(), file_types = ?settings.file_types, "listing settings resolved");
        Arc::new(AppState {
            version: env!("CARGO_PKG_VERSION"),
            lister: FileLister::new(settings),
        })
    }

    /// Flags in-flight and future listings to stop; the server drains them.
    pub fn begin_shutdown(&self) {
        self.lister.begin_shutdown();
    }
}
