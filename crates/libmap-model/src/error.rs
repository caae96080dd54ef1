use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("not a canonical geographic identifier: '{value}'")]
    InvalidGeoId { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
