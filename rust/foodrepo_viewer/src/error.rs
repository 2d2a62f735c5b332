use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to open session log at '{path}': {source}")]
    SessionLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    FoodRepo(#[from] foodrepo::FoodRepoError),

    #[error("UI error: {0}")]
    Eframe(#[from] eframe::Error),
}
