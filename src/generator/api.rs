//! Operations to static request methods, one class per tag.

use std::collections::HashSet;

use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::{debug, warn};

use super::text::{
    doc_block, indent_lines, is_identifier, member_access, member_name, string_literal, INDENT,
};
use super::type_resolver::resolve;
use crate::document::{
    Document, Method, Operation, Parameter, ParameterLocation, PathItem, ReferenceOr, Schema,
};
use crate::error::GenerateError;

/// Namespace the API file imports the models under.
pub(crate) const MODELS_NAMESPACE: &str = "Models";

const DEFAULT_CONTENT_TYPE: &str = "application/json";

const API_PRELUDE: &str = "import { Request } from './request';\nimport * as Models from './models';\n";

/// Renders the API file. Fails on the first operation without an
/// `operationId` or tags, on an `operationId` that cannot name a method, or
/// on a repeated `operationId`.
pub fn render_api(document: &Document) -> Result<String, GenerateError> {
    let mut classes: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut operation_ids: HashSet<&str> = HashSet::new();

    for (path, path_item) in &document.paths {
        for (method, operation) in path_item.operations() {
            let operation_id = operation
                .operation_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| GenerateError::MissingOperationId {
                    method,
                    path: path.clone(),
                })?;
            if !is_identifier(operation_id) {
                return Err(GenerateError::InvalidOperationId(operation_id.to_owned()));
            }
            if operation.tags.is_empty() {
                return Err(GenerateError::MissingTags {
                    operation_id: operation_id.to_owned(),
                });
            }
            if !operation_ids.insert(operation_id) {
                return Err(GenerateError::DuplicateOperationId(operation_id.to_owned()));
            }

            let inputs = OperationInputs::collect(document, path_item, operation);
            let rendered = render_method(operation_id, method, path, operation, &inputs);
            debug!(%method, %path, operation_id, tags = ?operation.tags, "Rendered operation.");

            for class in operation.tags.iter().map(|tag| class_name(tag)).unique() {
                classes.entry(class).or_default().push(rendered.clone());
            }
        }
    }

    let mut out = API_PRELUDE.to_owned();
    for (name, methods) in &classes {
        out.push_str(&format!(
            "\nexport class {name} {{\n{}\n}}\n",
            methods.join("\n\n")
        ));
    }
    Ok(out)
}

fn class_name(tag: &str) -> String {
    let name = tag.to_upper_camel_case();
    if is_identifier(&name) {
        name
    } else {
        format!("_{name}")
    }
}

/// Typed members of one keyed input group, e.g. `id: number`.
#[derive(Debug, Default)]
struct Group {
    names: Vec<String>,
    members: Vec<String>,
}

impl Group {
    fn push(&mut self, parameter: &Parameter, ty: String) {
        let optional = if is_required_parameter(parameter) { "" } else { "?" };
        self.members
            .push(format!("{}{optional}: {ty}", member_name(&parameter.name)));
        self.names.push(parameter.name.clone());
    }

    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn type_literal(&self) -> String {
        format!("{{ {} }}", self.members.join("; "))
    }
}

/// Required when flagged as such, or when the schema says anything about
/// nullability.
fn is_required_parameter(parameter: &Parameter) -> bool {
    let nullable = parameter
        .schema
        .as_ref()
        .and_then(ReferenceOr::as_item)
        .and_then(|schema: &Schema| schema.nullable);
    parameter.required == Some(true) || nullable.is_some()
}

#[derive(Debug, Default)]
struct OperationInputs {
    query: Group,
    path: Group,
    header: Group,
    body: Option<String>,
    content_type: Option<String>,
}

impl OperationInputs {
    fn collect(document: &Document, path_item: &PathItem, operation: &Operation) -> Self {
        let mut inputs = OperationInputs::default();

        for parameter in effective_parameters(document, path_item, operation) {
            let Some(schema) = &parameter.schema else {
                continue;
            };
            let Some(ty) = resolve(schema, Some(MODELS_NAMESPACE)) else {
                continue;
            };
            match parameter.location {
                ParameterLocation::Query => inputs.query.push(parameter, ty),
                ParameterLocation::Path => inputs.path.push(parameter, ty),
                ParameterLocation::Header => inputs.header.push(parameter, ty),
                ParameterLocation::Cookie => {}
            }
        }

        if let Some(request_body) = &operation.request_body {
            match document.request_body(request_body) {
                Some(request_body) => {
                    let first = request_body.content.as_ref().and_then(|c| c.first());
                    inputs.content_type = Some(
                        first
                            .map(|(content_type, _)| content_type.clone())
                            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned()),
                    );
                    inputs.body = first
                        .and_then(|(_, media_type)| media_type.schema.as_ref())
                        .and_then(|schema| resolve(schema, Some(MODELS_NAMESPACE)));
                }
                None => warn!(
                    reference = ?request_body.reference_name(),
                    "Unresolved request body reference, body skipped."
                ),
            }
        }

        inputs
    }
}

/// Path-level parameters, overridden by operation-level ones with the same
/// name and location.
fn effective_parameters<'a>(
    document: &'a Document,
    path_item: &'a PathItem,
    operation: &'a Operation,
) -> Vec<&'a Parameter> {
    let mut merged: IndexMap<(&str, ParameterLocation), &Parameter> = IndexMap::new();
    for parameter in path_item.parameters.iter().chain(&operation.parameters) {
        match document.parameter(parameter) {
            Some(resolved) => {
                merged.insert((resolved.name.as_str(), resolved.location), resolved);
            }
            None => warn!(
                reference = ?parameter.reference_name(),
                "Unresolved parameter reference, parameter skipped."
            ),
        }
    }
    merged.into_values().collect()
}

fn render_method(
    operation_id: &str,
    method: Method,
    path: &str,
    operation: &Operation,
    inputs: &OperationInputs,
) -> String {
    let mut arguments: Vec<(&str, String)> = vec![];
    if !inputs.query.is_empty() {
        arguments.push(("query", inputs.query.type_literal()));
    }
    if let Some(body) = &inputs.body {
        arguments.push(("body", body.clone()));
    }
    if !inputs.path.is_empty() {
        arguments.push(("path", inputs.path.type_literal()));
    }
    if !inputs.header.is_empty() {
        arguments.push(("header", inputs.header.type_literal()));
    }

    let signature = if arguments.is_empty() {
        format!("static {operation_id}() {{")
    } else {
        format!(
            "static {operation_id}({{\n{}\n}}: {{\n{}\n}}) {{",
            arguments
                .iter()
                .map(|(key, _)| format!("{INDENT}{key},"))
                .join("\n"),
            arguments
                .iter()
                .map(|(key, ty)| format!("{INDENT}{key}: {ty};"))
                .join("\n"),
        )
    };

    let mut options = vec![
        format!("url: {},", url_expression(path, &inputs.path.names)),
        format!("method: {},", string_literal(method.as_str())),
    ];
    if !inputs.query.is_empty() {
        options.push("params: query,".to_owned());
    }
    if inputs.body.is_some() {
        options.push("data: body,".to_owned());
    }

    let mut body = format!(
        "const request = new Request({{\n{}\n}});\n",
        options.iter().map(|option| format!("{INDENT}{option}")).join("\n")
    );

    let mut headers: Vec<String> = vec![];
    if let Some(content_type) = &inputs.content_type {
        headers.push(format!("'Content-Type': {},", string_literal(content_type)));
    }
    for name in &inputs.header.names {
        headers.push(format!(
            "{}: {},",
            string_literal(name),
            member_access("header", name)
        ));
    }
    if !headers.is_empty() {
        body.push_str(&format!(
            "request.headers({{\n{}\n}});\n",
            headers.iter().map(|header| format!("{INDENT}{header}")).join("\n")
        ));
    }
    body.push_str("return request;");

    let doc = doc_block(operation.summary.as_deref().unwrap_or("..."), INDENT);
    let method_text = format!("{signature}\n{}\n}}", indent_lines(&body, INDENT));
    format!("{doc}{}", indent_lines(&method_text, INDENT))
}

/// `'/users'`, or a template literal substituting path parameters:
/// `` `/users/${path.id}` ``.
fn url_expression(path: &str, path_names: &[String]) -> String {
    let mut url = path.to_owned();
    let mut substituted = false;
    for name in path_names {
        let placeholder = format!("{{{name}}}");
        if url.contains(&placeholder) {
            url = url.replace(&placeholder, &format!("${{{}}}", member_access("path", name)));
            substituted = true;
        }
    }
    if substituted {
        format!("`{url}`")
    } else {
        string_literal(&url)
    }
}
