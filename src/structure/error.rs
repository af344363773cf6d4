// Fri Jan 16 2026 - Alex

use crate::decl::DeclId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StructureError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Serializer produced invalid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Record #{0} not found")]
    RecordNotFound(DeclId),
    #[error("Validation failed at {path}: {reason}")]
    ValidationFailed { path: String, reason: String },
}
