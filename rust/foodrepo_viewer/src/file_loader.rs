use foodrepo::SampleCatalog;
use std::path::{
    Path,
    PathBuf,
};

use crate::error::ViewerError;

/// Handles the catalog file dialog and loading
pub struct FileLoader {
    /// Catalog path picked in the dialog and not yet loaded
    pub pending_catalog_path: Option<PathBuf>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self {
            pending_catalog_path: None,
        }
    }

    /// Open a file dialog for the sample list CSV file
    pub fn open_catalog_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .pick_file()
        {
            self.pending_catalog_path = Some(path);
        }
    }

    /// Take the path picked in the dialog, if any
    pub fn take_pending_catalog_path(&mut self) -> Option<PathBuf> {
        self.pending_catalog_path.take()
    }

    /// Load the sample catalog from a CSV file
    pub fn load_catalog(&self, path: &Path) -> Result<SampleCatalog, ViewerError> {
        Ok(SampleCatalog::load(path)?)
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}
