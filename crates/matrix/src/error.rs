use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatrixError>;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Catalog error: {0}")]
    CatalogError(#[from] heatmap_catalog::CatalogError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid backing values: {0}")]
    InvalidBacking(String),
}

impl MatrixError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn invalid_backing(msg: impl Into<String>) -> Self {
        Self::InvalidBacking(msg.into())
    }
}
