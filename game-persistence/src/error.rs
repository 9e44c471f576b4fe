use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Local storage error: {0}")]
    Database(#[from] DbErr),
    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
