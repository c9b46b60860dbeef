use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}
