use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    FoodRepo(#[from] foodrepo::FoodRepoError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
