//! Error types for quote comparison

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("At least {min} documents are required for a comparison, got {actual}")]
    BatchTooSmall { min: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
