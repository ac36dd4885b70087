//! The subset of the OpenAPI 3.0 object model consumed by the generator.
//!
//! Maps are [`IndexMap`]s so that schemas, properties, paths and content types
//! keep the order in which the document declares them.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// Either a `$ref` pointer or an inline item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReferenceOr<T> {
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Item(T),
}

impl<T> ReferenceOr<T> {
    pub fn as_item(&self) -> Option<&T> {
        match self {
            ReferenceOr::Reference { .. } => None,
            ReferenceOr::Item(item) => Some(item),
        }
    }

    /// Name of the referenced component, the last segment of the pointer.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            ReferenceOr::Reference { reference } => Some(component_name(reference)),
            ReferenceOr::Item(_) => None,
        }
    }
}

/// `#/components/schemas/User` -> `User`
pub fn component_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

#[derive(Debug, Default, Deserialize)]
pub struct Document {
    pub openapi: Option<String>,
    #[serde(default)]
    pub components: Components,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

impl Document {
    /// Follows a parameter reference into `components.parameters`.
    pub fn parameter<'a>(&'a self, parameter: &'a ReferenceOr<Parameter>) -> Option<&'a Parameter> {
        match parameter {
            ReferenceOr::Item(parameter) => Some(parameter),
            ReferenceOr::Reference { reference } => self
                .components
                .parameters
                .get(component_name(reference))
                .and_then(ReferenceOr::as_item),
        }
    }

    /// Follows a request body reference into `components.requestBodies`.
    pub fn request_body<'a>(
        &'a self,
        request_body: &'a ReferenceOr<RequestBody>,
    ) -> Option<&'a RequestBody> {
        match request_body {
            ReferenceOr::Item(request_body) => Some(request_body),
            ReferenceOr::Reference { reference } => self
                .components
                .request_bodies
                .get(component_name(reference))
                .and_then(ReferenceOr::as_item),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, ReferenceOr<Schema>>,
    #[serde(default)]
    pub parameters: IndexMap<String, ReferenceOr<Parameter>>,
    #[serde(default)]
    pub request_bodies: IndexMap<String, ReferenceOr<RequestBody>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Boolean,
    Number,
    Integer,
    Array,
    Object,
    Null,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: Option<SchemaKind>,
    #[serde(rename = "enum")]
    pub enumeration: Option<Vec<serde_json::Value>>,
    pub format: Option<String>,
    pub items: Option<Box<ReferenceOr<Schema>>>,
    pub properties: Option<IndexMap<String, ReferenceOr<Schema>>>,
    /// Unset and `false` are distinct: only an explicit `false` makes a
    /// property required.
    pub nullable: Option<bool>,
    pub description: Option<String>,
    pub default: Option<serde_json::Value>,
}

impl Schema {
    pub fn is_kind(&self, kind: SchemaKind) -> bool {
        self.kind == Some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    pub const ALL: [Method; 8] = [
        Method::Get,
        Method::Put,
        Method::Post,
        Method::Delete,
        Method::Options,
        Method::Head,
        Method::Patch,
        Method::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Put => "put",
            Method::Post => "post",
            Method::Delete => "delete",
            Method::Options => "options",
            Method::Head => "head",
            Method::Patch => "patch",
            Method::Trace => "trace",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
    /// Shared by every operation of the path unless overridden.
    #[serde(default)]
    pub parameters: Vec<ReferenceOr<Parameter>>,
}

impl PathItem {
    pub fn operation(&self, method: Method) -> Option<&Operation> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Head => self.head.as_ref(),
            Method::Patch => self.patch.as_ref(),
            Method::Trace => self.trace.as_ref(),
        }
    }

    pub fn operations(&self) -> Operations<'_> {
        Operations {
            path_item: self,
            step: 0,
        }
    }
}

/// Declared operations of a path item in [`Method::ALL`] order.
pub struct Operations<'a> {
    path_item: &'a PathItem,
    step: usize,
}

impl<'a> Iterator for Operations<'a> {
    type Item = (Method, &'a Operation);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let method = *Method::ALL.get(self.step)?;
            self.step += 1;
            if let Some(operation) = self.path_item.operation(method) {
                return Some((method, operation));
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ReferenceOr<Parameter>>,
    pub request_body: Option<ReferenceOr<RequestBody>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: Option<bool>,
    pub schema: Option<ReferenceOr<Schema>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    pub content: Option<IndexMap<String, MediaType>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    pub schema: Option<ReferenceOr<Schema>>,
}
