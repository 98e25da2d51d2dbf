use crate::forms::FormRejection;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{collection} record not found: {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },
    #[error(transparent)]
    Validation(#[from] FormRejection),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to delete record: {0}")]
    FileDelete(std::io::Error),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("failed to deserialize YAML (path: {path}): schema mismatch at {at}: {message}")]
    YamlDeserialization {
        path: std::path::PathBuf,
        at: String,
        message: String,
    },
    #[error("list field error: {0}")]
    ListField(#[from] list_field::ListFieldError),
    #[error("identifier error: {0}")]
    Uuid(#[from] becc_uuid::UuidError),
}

pub type SiteResult<T> = std::result::Result<T, SiteError>;
