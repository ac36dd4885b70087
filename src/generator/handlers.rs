//! Declaration renderers for named component schemas.
//!
//! Each handler recognizes one schema shape and renders a top-level
//! TypeScript declaration for it, or returns `None` so that the next handler
//! of the [`HandlerChain`](super::chain::HandlerChain) gets a chance.

use heck::ToLowerCamelCase;
use itertools::Itertools;

use super::text::{
    doc_block, is_binding_identifier, is_numeric_name, literal_text, member_access, member_name,
    string_literal, INDENT,
};
use super::type_resolver::{property_signature, resolve};
use crate::document::{ReferenceOr, Schema, SchemaKind};

pub trait RenderSchema {
    fn render(&self, name: &str, node: &ReferenceOr<Schema>) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaHandler {
    /// `type: object` -> `export class`
    Object,
    /// `enum` -> `export enum` for strings, literal union alias for numbers
    Enum,
    /// Any other primitive or array -> `export type` alias
    Common,
}

impl SchemaHandler {
    /// Objects are claimed first so they never fall through to an alias.
    pub const DEFAULT_ORDER: [SchemaHandler; 3] =
        [SchemaHandler::Object, SchemaHandler::Enum, SchemaHandler::Common];
}

impl RenderSchema for SchemaHandler {
    fn render(&self, name: &str, node: &ReferenceOr<Schema>) -> Option<String> {
        let schema = node.as_item()?;
        match self {
            SchemaHandler::Object => render_object(name, schema),
            SchemaHandler::Enum => render_enum(name, node, schema),
            SchemaHandler::Common => render_alias(name, node, schema),
        }
    }
}

/// One class field, shared by the field list and the constructor input.
struct Field<'a> {
    name: &'a str,
    binding: String,
    description: Option<&'a str>,
    signature: String,
    default: Option<String>,
}

impl<'a> Field<'a> {
    fn new(name: &'a str, property: &'a ReferenceOr<Schema>) -> Self {
        let schema = property.as_item();
        Field {
            name,
            binding: binding_name(name),
            description: schema.and_then(|s| s.description.as_deref()),
            signature: property_signature(name, property, None),
            default: schema.and_then(|s| s.default.as_ref()).and_then(default_literal),
        }
    }

    /// `name`, `name = 'x'` or `'x-tag': xTag = 1`
    fn destructure(&self) -> String {
        let mut pattern = if self.binding == self.name {
            self.binding.clone()
        } else {
            format!("{}: {}", member_name(self.name), self.binding)
        };
        if let Some(default) = &self.default {
            pattern.push_str(&format!(" = {default}"));
        }
        pattern
    }
}

fn binding_name(name: &str) -> String {
    if is_binding_identifier(name) {
        return name.to_owned();
    }
    let binding = name.to_lower_camel_case();
    if is_binding_identifier(&binding) {
        binding
    } else {
        format!("_{binding}")
    }
}

/// Only string, number and boolean defaults become constructor defaults.
fn default_literal(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(string_literal(s)),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn render_object(name: &str, schema: &Schema) -> Option<String> {
    if !schema.is_kind(SchemaKind::Object) {
        return None;
    }
    let fields: Vec<Field<'_>> = schema
        .properties
        .iter()
        .flatten()
        .map(|(name, property)| Field::new(name, property))
        .collect();
    if fields.is_empty() {
        return Some(format!("export class {name} {{}}"));
    }

    let inner = format!("{INDENT}{INDENT}");
    let declarations = fields
        .iter()
        .map(|field| {
            let doc = field
                .description
                .map(|d| doc_block(d, INDENT))
                .unwrap_or_default();
            format!("{doc}{INDENT}{};", field.signature)
        })
        .join("\n");
    let patterns = fields
        .iter()
        .map(|field| format!("{inner}{},", field.destructure()))
        .join("\n");
    let input_type = fields
        .iter()
        .map(|field| format!("{inner}{};", field.signature))
        .join("\n");
    let assignments = fields
        .iter()
        .map(|field| format!("{inner}{} = {};", member_access("this", field.name), field.binding))
        .join("\n");

    Some(format!(
        "export class {name} {{\n\
         {declarations}\n\
         \n\
         {INDENT}constructor({{\n\
         {patterns}\n\
         {INDENT}}}: {{\n\
         {input_type}\n\
         {INDENT}}}) {{\n\
         {assignments}\n\
         {INDENT}}}\n\
         }}"
    ))
}

fn render_enum(name: &str, node: &ReferenceOr<Schema>, schema: &Schema) -> Option<String> {
    let values = schema.enumeration.as_ref()?;
    match schema.kind? {
        SchemaKind::String => {
            if values.is_empty() {
                return Some(format!("export enum {name} {{}}"));
            }
            let members = values
                .iter()
                .map(|value| {
                    let text = literal_text(value);
                    format!("{INDENT}{} = {},", enum_member_name(&text), string_literal(&text))
                })
                .join("\n");
            Some(format!("export enum {name} {{\n{members}\n}}"))
        }
        SchemaKind::Number | SchemaKind::Integer => {
            Some(format!("export type {name} = {};", resolve(node, None)?))
        }
        _ => None,
    }
}

/// Enum members cannot have numeric names, so `'1'` becomes `_1`.
fn enum_member_name(text: &str) -> String {
    if is_numeric_name(text) {
        member_name(&format!("_{text}")).into_owned()
    } else {
        member_name(text).into_owned()
    }
}

fn render_alias(name: &str, node: &ReferenceOr<Schema>, schema: &Schema) -> Option<String> {
    match schema.kind? {
        SchemaKind::Array
        | SchemaKind::String
        | SchemaKind::Number
        | SchemaKind::Integer
        | SchemaKind::Null
        | SchemaKind::Boolean => Some(format!("export type {name} = {};", resolve(node, None)?)),
        SchemaKind::Object | SchemaKind::Unknown => None,
    }
}
