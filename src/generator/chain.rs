use indexmap::IndexMap;
use tracing::debug;

use super::handlers::{RenderSchema, SchemaHandler};
use crate::document::{ReferenceOr, Schema};

/// Ordered handlers tried against every named schema; the first handler that
/// renders a declaration wins.
#[derive(Debug, Clone)]
pub struct HandlerChain<H = SchemaHandler> {
    handlers: Vec<H>,
}

impl<H> Default for HandlerChain<H> {
    fn default() -> Self {
        HandlerChain { handlers: vec![] }
    }
}

impl HandlerChain<SchemaHandler> {
    /// Object, then Enum, then Common.
    pub fn standard() -> Self {
        SchemaHandler::DEFAULT_ORDER
            .into_iter()
            .fold(HandlerChain::default(), HandlerChain::register)
    }
}

impl<H: RenderSchema> HandlerChain<H> {
    pub fn register(mut self, handler: H) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Renders the first matching declaration of each schema, in the order of
    /// `schemas`. Schemas no handler recognizes are skipped.
    pub fn render(&self, schemas: &IndexMap<String, ReferenceOr<Schema>>) -> String {
        let declarations: Vec<String> = schemas
            .iter()
            .filter_map(|(name, node)| {
                let declaration = self
                    .handlers
                    .iter()
                    .find_map(|handler| handler.render(name, node));
                if declaration.is_none() {
                    debug!(schema = %name, "No handler produced a declaration.");
                }
                declaration
            })
            .collect();

        if declarations.is_empty() {
            return String::new();
        }
        let mut out = declarations.join("\n\n");
        out.push('\n');
        out
    }
}
