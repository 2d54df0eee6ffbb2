pub mod error;
pub mod model;
pub mod scan;

pub use error::ListingError;
pub use model::{EntryKind, FileEntry, ListingResult};

use crate::config::ListingSettings;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Lists the configured folder. The folder name passed by callers is a label
/// that is echoed back; it never selects what gets read.
#[derive(Clone)]
pub struct FileLister {
    inner: Arc<Inner>,
}

struct Inner {
    settings: ListingSettings,
    shutting_down: AtomicBool,
}

impl FileLister {
    pub fn new(settings: ListingSettings) -> Self {
        Self {
            inner: Arc::new(Inner { settings, shutting_down: AtomicBool::new(false) }),
        }
    }

    pub fn settings(&self) -> &ListingSettings { &self.inner.settings }

    /// Set once on the shutdown signal; never cleared.
    pub fn begin_shutdown(&self) {
        self.inner.shutting_down.store(true, Ordering::SeqCst);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.inner.shutting_down.load(Ordering::SeqCst)
    }

    fn ensure_running(&self) -> Result<(), ListingError> {
        if self.is_shutting_down() { Err(ListingError::ShuttingDown) } else { Ok(()) }
    }

    async fn simulate_latency(&self) {
        let latency = self.inner.settings.latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    /// Entries of the folder, optionally restricted to names starting with
    /// `prefix`. `count` truncates: 0 returns everything, `n` the first `n`.
    pub async fn list(&self, folder_name: &str, count: i64, prefix: Option<&str>) -> Result<ListingResult, ListingError> {
        if count < 0 {
            return Err(ListingError::invalid_count());
        }
        self.simulate_latency().await;
        self.ensure_running()?;

        let entries = scan::scan_folder(&self.inner.settings.folder, folder_name, prefix).await?;
        self.ensure_running()?;

        let files = scan::truncate(entries, count)?;
        debug!(folder = folder_name, entries = files.len(), "listing built");
        Ok(ListingResult { folder_name: folder_name.to_string(), files })
    }

    pub async fn filter_by_name(&self, folder_name: &str, prefix: &str) -> Result<ListingResult, ListingError> {
        let mut result = self.list(folder_name, 0, None).await?;
        result.files.retain(|f| f.name.starts_with(prefix));
        Ok(result)
    }

    pub async fn order_by_size(&self, folder_name: &str) -> Result<ListingResult, ListingError> {
        let mut result = self.list(folder_name, 0, None).await?;
        scan::sort_by_size(&mut result.files);
        Ok(result)
    }

    pub async fn filter_by_type(&self, folder_name: &str, file_type: &str) -> Result<ListingResult, ListingError> {
        let wanted = file_type.to_lowercase();
        if !self.inner.settings.file_types.contains(&wanted) {
            return Err(ListingError::InvalidParameter(format!("Invalid file type: {file_type}")));
        }
        let mut result = self.list(folder_name, 0, None).await?;
        let suffix = format!(".{wanted}");
        result.files.retain(|f| f.extension.to_lowercase() == suffix);
        Ok(result)
    }
}
