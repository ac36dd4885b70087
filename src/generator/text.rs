//! Small TypeScript text helpers shared by the renderers.

use std::borrow::Cow;

use itertools::Itertools;

pub(crate) const INDENT: &str = "    ";

const DOC_WIDTH: usize = 80;

/// Words that are valid member names but cannot name a local binding.
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Whether `name` can be used unquoted as a TypeScript member name.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Whether `name` can be declared as a parameter or local variable.
pub(crate) fn is_binding_identifier(name: &str) -> bool {
    is_identifier(name) && !RESERVED_WORDS.contains(&name)
}

/// Whether TypeScript would read `name` as a numeric literal, which enum
/// members may not be named after.
pub(crate) fn is_numeric_name(name: &str) -> bool {
    !name.trim().is_empty() && name.trim() == name && name.parse::<f64>().is_ok()
}

/// Single-quoted TypeScript string literal.
pub(crate) fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Member name for a property or enum member, quoted when needed.
pub(crate) fn member_name(name: &str) -> Cow<'_, str> {
    if is_identifier(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(string_literal(name))
    }
}

/// Member access on `object`: `path.id` or `header['X-Id']`.
pub(crate) fn member_access(object: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{object}.{name}")
    } else {
        format!("{object}[{}]", string_literal(name))
    }
}

/// Text of a JSON literal as it appears in a generated union or enum.
pub(crate) fn literal_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/")
}

/// Multi-line `@description` block, each line prefixed by `indent`.
pub(crate) fn doc_block(description: &str, indent: &str) -> String {
    let text = format!("@description {}", escape_comment(description.trim()));
    let width = DOC_WIDTH.saturating_sub(indent.len() + 3).max(20);
    let body = text
        .lines()
        .flat_map(|line| textwrap::wrap(line, width))
        .map(|line| format!("{indent} * {line}"))
        .join("\n");
    format!("{indent}/**\n{body}\n{indent} */\n")
}

/// Single-line `/** @description ... */ ` prefix for inline type literals.
pub(crate) fn doc_inline(description: &str) -> String {
    let text = description.split_whitespace().join(" ");
    format!("/** @description {} */ ", escape_comment(&text))
}

pub(crate) fn indent_lines(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .join("\n")
}
