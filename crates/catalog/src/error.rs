use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while reading a catalog. Building and querying an index never fails.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog is not valid JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Catalog JSON has the wrong shape
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CatalogError {
    /// Create an invalid catalog error
    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
