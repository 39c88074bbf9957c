use thiserror::Error;

pub type Result<T> = std::result::Result<T, WizardError>;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
