//! TypeScript generation from a loaded [`Document`].
//!
//! Everything here is pure: the whole output is rendered in memory and only
//! handed to the emitter once every operation has been validated.

mod api;
mod chain;
mod handlers;
mod text;
mod type_resolver;

use tracing::debug;

pub use api::render_api;
pub use chain::HandlerChain;
pub use handlers::{RenderSchema, SchemaHandler};
pub use type_resolver::resolve;

use crate::document::Document;
use crate::error::GenerateError;

/// Rendered contents of the generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// `models.ts`
    pub models: String,
    /// `api.ts`
    pub api: String,
}

pub fn generate(document: &Document) -> Result<GeneratedFiles, GenerateError> {
    match document.openapi.as_deref() {
        Some(version) if !version.trim().is_empty() => debug!(version, "OpenAPI version."),
        _ => return Err(GenerateError::MissingVersion),
    }

    let api = render_api(document)?;
    let models = HandlerChain::standard().render(&document.components.schemas);
    debug!(
        schemas = document.components.schemas.len(),
        paths = document.paths.len(),
        "Generated models and API."
    );

    Ok(GeneratedFiles { models, api })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_version_is_rejected_before_generation() {
        let err = generate(&document(json!({
            "paths": { "/x": { "get": { "tags": ["A"] } } }
        })))
        .unwrap_err();
        assert!(matches!(err, GenerateError::MissingVersion));
        assert_eq!(err.to_string(), "OpenAPI version is not defined");
    }

    #[test]
    fn invalid_operation_produces_no_output() {
        let result = generate(&document(json!({
            "openapi": "3.0.3",
            "components": { "schemas": { "Name": { "type": "string" } } },
            "paths": { "/x": { "get": { "tags": ["A"] } } }
        })));
        assert!(matches!(result, Err(GenerateError::MissingOperationId { .. })));
    }

    #[test]
    fn generates_models_and_api() {
        let files = generate(&document(json!({
            "openapi": "3.0.3",
            "components": {
                "schemas": {
                    "User": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string", "nullable": false }
                        }
                    },
                    "Color": { "type": "string", "enum": ["RED", "GREEN"] }
                }
            },
            "paths": {
                "/users": {
                    "post": {
                        "operationId": "createUser",
                        "tags": ["User"],
                        "requestBody": {
                            "content": {
                                "application/json": { "schema": { "$ref": "#/components/schemas/User" } }
                            }
                        }
                    }
                }
            }
        })))
        .unwrap();

        assert!(files.models.contains("export class User {"));
        assert!(files.models.contains("    name: string;\n"));
        assert!(files.models.contains("    RED = 'RED',\n    GREEN = 'GREEN',\n"));
        assert!(files.api.contains("        body: Models.User;\n"));
        assert!(files.api.contains("            method: 'post',\n"));
    }

    #[test]
    fn documents_without_schemas_have_empty_models() {
        let files = generate(&document(json!({ "openapi": "3.0.0" }))).unwrap();
        assert_eq!(files.models, "");
    }
}
