use crate::document::Method;

const OPERATION_OBJECT_DOCS: &str = "https://swagger.io/specification/#operation-object";

/// Document validation failures. Any of them aborts the whole run before
/// output is written.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("OpenAPI version is not defined")]
    MissingVersion,
    #[error("operationId is not defined for {method} {path}, see {OPERATION_OBJECT_DOCS}")]
    MissingOperationId { method: Method, path: String },
    #[error("operationId `{0}` is not a valid method name")]
    InvalidOperationId(String),
    #[error("operation's tag is not defined for `{operation_id}`, see {OPERATION_OBJECT_DOCS}")]
    MissingTags { operation_id: String },
    #[error("operationId `{0}` is used by more than one operation")]
    DuplicateOperationId(String),
}
